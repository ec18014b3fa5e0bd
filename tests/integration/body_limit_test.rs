use actix_web::http::StatusCode;
use actix_web::test::call_service;
use lighter_signin::entities::v1::users;
use sea_orm::{EntityTrait, PaginatorTrait};

use super::auth_flow::{login_request, signup_request};

#[actix_web::test]
async fn test_oversized_form_is_rejected() {
    let mut config = lighter_signin::testing::setup::config();
    config.server.max_content_length = 64;
    let (service, db, _) = lighter_signin::service!(config);

    let username = "a".repeat(128);
    let response = call_service(
        &service,
        signup_request(&username, "john@example.com", "Password123").to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(users::Entity::find().count(db.get_ref()).await.unwrap(), 0);

    // small forms still go through
    let response = call_service(
        &service,
        login_request("john@example.com", "Password123").to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
