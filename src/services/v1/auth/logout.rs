use actix_web::web::Data;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::entities::v1::sessions::Model;
use crate::errors::Error;
use crate::state::AppState;

/// Forget a session in the cache and the database; returns whether a row was removed
#[::tracing::instrument(skip(db, state))]
pub async fn logout(
    db: &DatabaseConnection,
    state: &Data<AppState>,
    session_id: Option<Uuid>,
) -> Result<bool, Error> {
    let Some(id) = session_id else {
        return Ok(false);
    };

    state.sessions.remove(id);

    let removed = Model::destroy(db, id).await?;

    ::tracing::info!(session_id = %id, removed, "User logged out");

    Ok(removed)
}
