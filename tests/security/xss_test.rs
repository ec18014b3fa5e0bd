//! Values echoed into pages are HTML-escaped

use actix_web::http::StatusCode;
use actix_web::test::{TestRequest, call_service, read_body};
use lighter_signin::requests::v1::auth::{LoginRequest, SignupRequest};

const PAYLOAD: &str = "\"><script>alert(1)</script>";

#[actix_web::test]
async fn test_signup_form_escapes_refilled_values() {
    let (service, _, _) = lighter_signin::service!();

    let request = TestRequest::post().uri("/signup").set_form(SignupRequest {
        username: PAYLOAD.to_string(),
        email: PAYLOAD.to_string(),
        password: "Password123".to_string(),
    });
    let response = call_service(&service, request.to_request()).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let html = String::from_utf8(read_body(response).await.to_vec()).unwrap();
    assert!(!html.contains("<script>"));
    assert!(html.contains("&quot;&gt;&lt;script&gt;alert(1)&lt;/script&gt;"));
}

#[actix_web::test]
async fn test_login_form_escapes_email() {
    let (service, _, _) = lighter_signin::service!();

    let request = TestRequest::post().uri("/login").set_form(LoginRequest {
        email: PAYLOAD.to_string(),
        password: "Password123".to_string(),
    });
    let response = call_service(&service, request.to_request()).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let html = String::from_utf8(read_body(response).await.to_vec()).unwrap();
    assert!(!html.contains("<script>"));
}
