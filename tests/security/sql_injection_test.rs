//! Form input reaches the database only as bound parameters

use actix_web::http::StatusCode;
use actix_web::test::{TestRequest, call_service};
use lighter_signin::entities::v1::users;
use lighter_signin::requests::v1::auth::{LoginRequest, SignupRequest};
use lighter_signin::testing::setup;
use sea_orm::{EntityTrait, PaginatorTrait};

#[actix_web::test]
async fn test_injection_in_login_email() {
    let (service, db, state) = lighter_signin::service!();
    setup::create_user(db.get_ref(), &state, "john_doe", "john@example.com", "Password123").await;

    for email in [
        "' OR '1'='1",
        "john@example.com' --",
        "x'; DROP TABLE users; --",
    ] {
        let request = TestRequest::post().uri("/login").set_form(LoginRequest {
            email: email.to_string(),
            password: "' OR '1'='1".to_string(),
        });
        let response = call_service(&service, request.to_request()).await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "email: {email}");
    }

    assert_eq!(users::Entity::find().count(db.get_ref()).await.unwrap(), 1);
}

#[actix_web::test]
async fn test_injection_in_signup_fields() {
    let (service, db, _) = lighter_signin::service!();

    let request = TestRequest::post().uri("/signup").set_form(SignupRequest {
        username: "x'); DROP TABLE users; --".to_string(),
        email: "test'; DROP TABLE users; --@example.com".to_string(),
        password: "Password123".to_string(),
    });
    let response = call_service(&service, request.to_request()).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    // table still exists and is empty
    assert_eq!(users::Entity::find().count(db.get_ref()).await.unwrap(), 0);
}
