//! Session cookies cannot be forged or replayed

use actix_web::cookie::Cookie;
use actix_web::http::StatusCode;
use actix_web::test::{TestRequest, call_service};
use lighter_signin::entities::v1::sessions;
use lighter_signin::helpers::{base58, now};
use lighter_signin::middlewares::v1::session::session_cookie;
use lighter_signin::testing::setup;
use sea_orm::prelude::Uuid;

#[actix_web::test]
async fn test_unsigned_cookie_rejected() {
    let (service, db, state) = lighter_signin::service!();
    let user = setup::create_user(db.get_ref(), &state, "john_doe", "john@example.com", "Password123").await;
    let session = user
        .create_session(db.get_ref(), state.session_lifetime())
        .await
        .unwrap();

    // a real session id, but without the signature
    let forged = Cookie::new("session", base58::to_string(session.id));
    let response = call_service(
        &service,
        TestRequest::get().uri("/home").cookie(forged).to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let signed = session_cookie(&state.config.session, &state.key, session.id);
    let response = call_service(
        &service,
        TestRequest::get().uri("/home").cookie(signed).to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_expired_session_rejected() {
    let (service, db, state) = lighter_signin::service!();
    let user = setup::create_user(db.get_ref(), &state, "john_doe", "john@example.com", "Password123").await;
    let session = sessions::Model {
        id: Uuid::new_v4(),
        user_id: user.id,
        created_at: now() - chrono::Duration::days(2),
        expired_at: now() - chrono::Duration::days(1),
    }
    .store(db.get_ref())
    .await
    .unwrap();

    let cookie = session_cookie(&state.config.session, &state.key, session.id);
    let response = call_service(
        &service,
        TestRequest::get().uri("/home").cookie(cookie).to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}

#[actix_web::test]
async fn test_unknown_session_rejected() {
    let (service, _, state) = lighter_signin::service!();

    let cookie = session_cookie(&state.config.session, &state.key, Uuid::new_v4());
    let response = call_service(
        &service,
        TestRequest::get().uri("/home").cookie(cookie).to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}
