//! End to end tests for the signup, login, home and logout pages

use actix_web::cookie::Cookie;
use actix_web::dev::ServiceResponse;
use actix_web::http::StatusCode;
use actix_web::http::header;
use actix_web::test::{TestRequest, call_service, read_body};
use lighter_signin::entities::v1::{sessions, users};
use lighter_signin::requests::v1::auth::{LoginRequest, SignupRequest};
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};

pub fn signup_request(username: &str, email: &str, password: &str) -> TestRequest {
    TestRequest::post().uri("/signup").set_form(SignupRequest {
        username: username.to_string(),
        email: email.to_string(),
        password: password.to_string(),
    })
}

pub fn login_request(email: &str, password: &str) -> TestRequest {
    TestRequest::post().uri("/login").set_form(LoginRequest {
        email: email.to_string(),
        password: password.to_string(),
    })
}

pub fn session_cookie<B>(response: &ServiceResponse<B>) -> Cookie<'static> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(|cookie| cookie.into_owned())
        .expect("response should set the session cookie")
}

pub fn location<B>(response: &ServiceResponse<B>) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
}

async fn body<B: actix_web::body::MessageBody>(response: ServiceResponse<B>) -> String {
    String::from_utf8(read_body(response).await.to_vec()).unwrap()
}

// =============================================================================
// SUCCESS PATH
// =============================================================================

/// signup -> login -> home -> logout -> home is refused again
#[actix_web::test]
async fn test_complete_flow() {
    let (service, db, _) = lighter_signin::service!();

    let response = call_service(
        &service,
        signup_request("john_doe", "John@Example.com", "Password123").to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");

    let user = users::Entity::find()
        .filter(users::Column::Username.eq("john_doe"))
        .one(db.get_ref())
        .await
        .unwrap()
        .expect("user row should exist");
    assert_eq!(user.email, "john@example.com");
    assert!(user.password.starts_with("$argon2id$"));

    let response = call_service(
        &service,
        login_request("john@example.com", "Password123").to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/home");

    let cookie = session_cookie(&response);
    assert_eq!(cookie.http_only(), Some(true));

    let response = call_service(
        &service,
        TestRequest::get().uri("/home").cookie(cookie.clone()).to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body(response).await.contains("Welcome, john_doe"));

    let response = call_service(
        &service,
        TestRequest::get().uri("/logout").cookie(cookie.clone()).to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
    assert_eq!(session_cookie(&response).value(), "");

    let remaining = sessions::Entity::find().count(db.get_ref()).await.unwrap();
    assert_eq!(remaining, 0);

    let response = call_service(
        &service,
        TestRequest::get().uri("/home").cookie(cookie).to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
}

#[actix_web::test]
async fn test_pages_render() {
    let (service, _, _) = lighter_signin::service!();

    for (uri, marker) in [
        ("/", "href=\"/signup\""),
        ("/signup", "action=\"/signup\""),
        ("/login", "action=\"/login\""),
    ] {
        let response = call_service(&service, TestRequest::get().uri(uri).to_request()).await;

        assert_eq!(response.status(), StatusCode::OK, "GET {uri}");
        assert!(body(response).await.contains(marker), "GET {uri}");
    }
}

// =============================================================================
// FAILURE PATHS
// =============================================================================

#[actix_web::test]
async fn test_duplicate_signup_rejected() {
    let (service, db, _) = lighter_signin::service!();

    let request = signup_request("john_doe", "john@example.com", "Password123");
    let response = call_service(&service, request.to_request()).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let request = signup_request("john_doe", "john@example.com", "Password123");
    let response = call_service(&service, request.to_request()).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let html = body(response).await;
    assert!(html.contains("Username already exists"));
    assert!(html.contains("Email already registered"));

    let count = users::Entity::find().count(db.get_ref()).await.unwrap();
    assert_eq!(count, 1);
}

#[actix_web::test]
async fn test_weak_password_rejected() {
    let (service, db, _) = lighter_signin::service!();

    let request = signup_request("john_doe", "john@example.com", "password");
    let response = call_service(&service, request.to_request()).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let html = body(response).await;
    assert!(html.contains("Password must contain at least one uppercase letter"));
    // entered values are kept, the password is not
    assert!(html.contains("value=\"john_doe\""));
    assert!(!html.contains("value=\"password\""));

    assert_eq!(users::Entity::find().count(db.get_ref()).await.unwrap(), 0);
}

#[actix_web::test]
async fn test_missing_fields_are_validation_errors() {
    let (service, _, _) = lighter_signin::service!();

    let request = TestRequest::post()
        .uri("/signup")
        .insert_header((header::CONTENT_TYPE, "application/x-www-form-urlencoded"))
        .set_payload("username=john_doe");
    let response = call_service(&service, request.to_request()).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let html = body(response).await;
    assert!(html.contains("Email is required"));
    assert!(html.contains("Password is required"));

    let request = TestRequest::post()
        .uri("/login")
        .insert_header((header::CONTENT_TYPE, "application/x-www-form-urlencoded"))
        .set_payload("");
    let response = call_service(&service, request.to_request()).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[actix_web::test]
async fn test_wrong_password_unauthorized() {
    let (service, db, state) = lighter_signin::service!();
    lighter_signin::testing::setup::create_user(
        db.get_ref(),
        &state,
        "john_doe",
        "john@example.com",
        "Password123",
    )
    .await;

    let response = call_service(
        &service,
        login_request("john@example.com", "WrongPassword1").to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(response.response().cookies().next().is_none());
    assert!(body(response).await.contains("Invalid credentials"));

    let response = call_service(
        &service,
        login_request("nobody@example.com", "Password123").to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_home_requires_session() {
    let (service, _, _) = lighter_signin::service!();

    let response = call_service(&service, TestRequest::get().uri("/home").to_request()).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
}

#[actix_web::test]
async fn test_logout_without_session_redirects() {
    let (service, _, _) = lighter_signin::service!();

    let response = call_service(&service, TestRequest::get().uri("/logout").to_request()).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
}
