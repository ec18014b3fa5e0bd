use std::net::SocketAddr;

use actix_web::http::StatusCode;
use actix_web::http::header;
use actix_web::test::{TestRequest, call_service};
use lighter_signin::config::RateLimitConfig;
use lighter_signin::testing::setup;

use super::auth_flow::login_request;

#[actix_web::test]
async fn test_login_submissions_are_throttled() {
    let mut config = setup::config();
    config.rate_limit = RateLimitConfig {
        enabled: true,
        requests: 2,
        window_seconds: 3600,
        ..RateLimitConfig::default()
    };
    let (service, _, _) = lighter_signin::service!(config);

    for _ in 0..2 {
        let response = call_service(
            &service,
            login_request("john@example.com", "Password123").to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    let response = call_service(
        &service,
        login_request("john@example.com", "Password123").to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    assert!(response.headers().contains_key(header::RETRY_AFTER));

    // pages stay reachable
    let response = call_service(&service, TestRequest::get().uri("/login").to_request()).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_forwarded_header_does_not_reset_quota() {
    let mut config = setup::config();
    config.rate_limit = RateLimitConfig {
        enabled: true,
        requests: 2,
        window_seconds: 3600,
        ..RateLimitConfig::default()
    };
    let (service, _, state) = lighter_signin::service!(config);
    let peer: SocketAddr = "203.0.113.7:4000".parse().unwrap();

    for i in 0..2 {
        let response = call_service(
            &service,
            login_request("john@example.com", "Password123")
                .peer_addr(peer)
                .insert_header(("X-Forwarded-For", format!("10.0.0.{i}")))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    let response = call_service(
        &service,
        login_request("john@example.com", "Password123")
            .peer_addr(peer)
            .insert_header(("X-Forwarded-For", "10.0.0.99"))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(state.limiter.tracked(), 1);
}
