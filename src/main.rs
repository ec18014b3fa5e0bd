use actix_web::middleware::Logger;
use actix_web::{App, HttpServer};
use anyhow::Context;
use lighter_signin::security::RateLimitMiddleware;
use lighter_signin::services::v1::auth::cleanup;
use lighter_signin::{config, database, router, state, telemetry};

#[actix::main]
async fn main() -> anyhow::Result<()> {
    let config = config::load().context("Failed to load configuration")?;

    telemetry::init(&config.observability);

    ::tracing::info!(
        name = %config.app.name,
        environment = config.app.environment.as_str(),
        "Starting application"
    );

    let db = database::connect(&config.database).await?;
    let db = actix_web::web::Data::new(db);

    let host = config.server.host.clone();
    let port = config.server.port;
    let workers = config.server.workers;
    let state = state::build(config)?;

    actix::spawn(cleanup::run(db.clone(), state.clone()));

    let mut server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(RateLimitMiddleware::with_limiter(state.limiter.clone()))
            .configure(state::configure(db.clone(), state.clone()))
            .configure(router::route)
    });

    if workers > 0 {
        server = server.workers(workers);
    }

    ::tracing::info!(%host, port, "Listening");

    server
        .bind((host.as_str(), port))
        .with_context(|| format!("Failed to bind {host}:{port}"))?
        .run()
        .await
        .context("Server error")
}
