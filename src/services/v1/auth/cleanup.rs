use std::time::Duration;

use actix_web::web::Data;
use sea_orm::{DatabaseConnection, DbErr};

use crate::entities::v1::sessions::Model;
use crate::state::AppState;

/// Purge expired sessions from the database and the cache, and forget
/// rate limited addresses that went idle
#[::tracing::instrument(skip_all)]
pub async fn cleanup(db: &DatabaseConnection, state: &AppState) -> Result<u64, DbErr> {
    let idle = state.limiter.purge_idle();

    if idle > 0 {
        ::tracing::debug!(idle, "Idle rate limit entries removed");
    }

    let purged = Model::purge_expired(db).await?;
    let evicted = state.sessions.purge_expired();

    if purged > 0 || evicted > 0 {
        ::tracing::info!(purged, evicted, "Expired sessions removed");
    }

    Ok(purged)
}

/// Run [`cleanup`] every `session.cleanup_interval` seconds, forever
pub async fn run(db: Data<DatabaseConnection>, state: Data<AppState>) {
    let period = Duration::from_secs(state.config.session.cleanup_interval.max(1));
    let mut interval = tokio::time::interval(period);

    loop {
        interval.tick().await;

        if let Err(e) = cleanup(&db, &state).await {
            ::tracing::error!(error = %e, "Failed to purge expired sessions");
        }
    }
}
