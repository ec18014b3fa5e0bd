use actix_web::http::StatusCode;
use actix_web::test::{TestRequest, call_service, init_service, read_body_json};
use actix_web::web::Data;
use actix_web::App;
use lighter_signin::controllers::health::{HealthResponse, health};
use sea_orm::DatabaseConnection;

#[actix_web::test]
async fn test_health_reports_connected_database() {
    let (service, _, _) = lighter_signin::service!();

    let response = call_service(&service, TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: HealthResponse = read_body_json(response).await;
    assert_eq!(body.status, "healthy");
    assert_eq!(body.database, "connected");
    assert_eq!(body.version, env!("CARGO_PKG_VERSION"));
}

#[actix_web::test]
async fn test_health_unavailable_without_database() {
    let service = init_service(
        App::new()
            .app_data(Data::new(DatabaseConnection::Disconnected))
            .service(health),
    )
    .await;

    let response = call_service(&service, TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let body: HealthResponse = read_body_json(response).await;
    assert_eq!(body.status, "unhealthy");
    assert_eq!(body.database, "disconnected");
}
