use actix_web::web::{self, Data};
use sea_orm::{DatabaseConnection, SqlErr};

use crate::entities::v1::users::Model;
use crate::errors::{Error, Validation};
use crate::requests::v1::auth::SignupRequest;
use crate::state::AppState;
use crate::validators;

/// Validate the form, hash the password and insert one user row
///
/// Fail if:
/// - a field breaks its validator or the password policy
/// - username or email is already taken
#[::tracing::instrument(skip_all, fields(username = %request.username.trim()))]
pub async fn signup(
    db: &DatabaseConnection,
    state: &Data<AppState>,
    request: SignupRequest,
) -> Result<Model, Error> {
    let request = request.normalized();
    let mut validation = Validation::new();

    if let Err(e) = validators::validate_username(&request.username) {
        validation.add("username", e);
    }

    if let Err(e) = validators::validate_email_format(&request.email) {
        validation.add("email", e);
    }

    if let Err(e) = validators::validate_password_complexity(&request.password, &state.config.password)
    {
        validation.add("password", e);
    }

    if !validation.has("username") && Model::username_exists(db, &request.username).await? {
        validation.add("username", "Username already exists");
    }

    if !validation.has("email") && Model::email_exists(db, &request.email).await? {
        validation.add("email", "Email already registered");
    }

    validation.into_result()?;

    let hasher = state.clone();
    let password = request.password;
    let hash = web::block(move || hasher.hasher.hash(&password)).await??;

    let user = Model::new(request.username, request.email, hash)
        .store(db)
        .await
        .map_err(|e| match e.sql_err() {
            // lost a race against a concurrent signup
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                let mut validation = Validation::new();
                validation.add("username", "Username or email already exists");
                Error::Validation(validation)
            }
            _ => Error::Database(e),
        })?;

    ::tracing::info!(user_id = %user.id, "User registered");

    Ok(user)
}
