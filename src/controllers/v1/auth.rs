use actix_web::http::header::ContentType;
use actix_web::web::{Data, Form};
use actix_web::{HttpRequest, HttpResponse};
use sea_orm::DatabaseConnection;

use crate::controllers::{html, see_other};
use crate::errors::{Error, Validation};
use crate::middlewares::v1::session::{clear_session_cookie, read_session_id, session_cookie};
use crate::requests::v1::auth::{LoginRequest, SignupRequest};
use crate::services;
use crate::state::AppState;
use crate::views;

#[get("/signup")]
pub async fn signup_form() -> HttpResponse {
    html(views::signup("", "", &Validation::new()))
}

/// Create an account, then continue to the login page
///
/// Fail if:
/// - a field is invalid, re-rendering the form with 422
/// - username or email is taken, re-rendering the form with 422
#[post("/signup")]
pub async fn signup(
    db: Data<DatabaseConnection>,
    state: Data<AppState>,
    Form(request): Form<SignupRequest>,
) -> Result<HttpResponse, Error> {
    let username = request.username.trim().to_string();
    let email = request.email.trim().to_string();

    match services::v1::auth::signup::signup(&db, &state, request).await {
        Ok(_) => Ok(see_other("/login")),
        Err(Error::Validation(validation)) => Ok(HttpResponse::UnprocessableEntity()
            .content_type(ContentType::html())
            .body(views::signup(&username, &email, &validation))),
        Err(e) => Err(e),
    }
}

#[get("/login")]
pub async fn login_form() -> HttpResponse {
    html(views::login("", []))
}

/// Open a session and continue to the home page
///
/// Fail if:
/// - email or password is missing (422)
/// - credentials do not match a user (401)
#[post("/login")]
pub async fn login(
    db: Data<DatabaseConnection>,
    state: Data<AppState>,
    Form(request): Form<LoginRequest>,
) -> Result<HttpResponse, Error> {
    let email = request.email.trim().to_string();

    match services::v1::auth::login::login(&db, &state, request).await {
        Ok(session) => {
            let cookie = session_cookie(&state.config.session, &state.key, session.id);
            let mut response = see_other("/home");
            response.add_cookie(&cookie).map_err(|e| anyhow::anyhow!("Invalid session cookie: {e}"))?;

            Ok(response)
        }
        Err(Error::Validation(validation)) => Ok(HttpResponse::UnprocessableEntity()
            .content_type(ContentType::html())
            .body(views::login(&email, validation.messages()))),
        Err(Error::InvalidCredentials) => Ok(HttpResponse::Unauthorized()
            .content_type(ContentType::html())
            .body(views::login(&email, ["Invalid credentials"]))),
        Err(e) => Err(e),
    }
}

/// Destroy the current session, if any, and clear the cookie
#[get("/logout")]
pub async fn logout(
    req: HttpRequest,
    db: Data<DatabaseConnection>,
    state: Data<AppState>,
) -> Result<HttpResponse, Error> {
    let session_id = read_session_id(&req, &state.config.session, &state.key);

    services::v1::auth::logout::logout(&db, &state, session_id).await?;

    let mut response = see_other("/login");
    response
        .add_cookie(&clear_session_cookie(&state.config.session))
        .map_err(|e| anyhow::anyhow!("Invalid removal cookie: {e}"))?;

    Ok(response)
}
