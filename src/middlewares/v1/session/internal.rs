use std::future::Future;
use std::pin::Pin;

use actix_web::dev::Payload;
use actix_web::web::Data;
use actix_web::{FromRequest, HttpRequest};
use chrono::NaiveDateTime;
use sea_orm::DatabaseConnection;
use serde::Serialize;
use uuid::Uuid;

use crate::entities::v1::{sessions, users};
use crate::errors::Error;
use crate::helpers::now;
use crate::state::AppState;

use super::read_session_id;

/// The signed-in user behind the request's session cookie
///
/// Extracting it from a request without a live session fails with
/// [`Error::Unauthenticated`], which redirects to the login page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Session {
    pub id: Uuid,
    pub user_id: Uuid,
    pub username: String,
    pub email: String,
    pub expired_at: NaiveDateTime,
}

impl Session {
    pub fn is_expired(&self) -> bool {
        self.expired_at <= now()
    }
}

impl From<(sessions::Model, users::Model)> for Session {
    fn from((session, user): (sessions::Model, users::Model)) -> Self {
        Self {
            id: session.id,
            user_id: user.id,
            username: user.username,
            email: user.email,
            expired_at: session.expired_at,
        }
    }
}

impl FromRequest for Session {
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let db = match req.app_data::<Data<DatabaseConnection>>().cloned() {
            Some(db) => db,
            None => {
                return Box::pin(async move {
                    ::tracing::error!("Failed to get database connection");

                    Err(anyhow::anyhow!("Database connection is not registered").into())
                });
            }
        };

        let state = match req.app_data::<Data<AppState>>().cloned() {
            Some(state) => state,
            None => {
                return Box::pin(async move {
                    ::tracing::error!("Failed to get application state");

                    Err(anyhow::anyhow!("Application state is not registered").into())
                });
            }
        };

        let id = match read_session_id(req, &state.config.session, &state.key) {
            Some(id) => id,
            None => {
                return Box::pin(async move {
                    ::tracing::debug!("Missing or invalid session cookie");

                    Err(Error::Unauthenticated)
                });
            }
        };

        Box::pin(async move {
            if let Some(session) = state.sessions.get(id) {
                return Ok(session);
            }

            let db: &DatabaseConnection = &db;
            let Some(found) = sessions::Model::find_active(db, id).await? else {
                ::tracing::debug!(session_id = %id, "Session not found or expired");

                return Err(Error::Unauthenticated);
            };

            let session = Session::from(found);
            state.sessions.insert(session.clone());

            Ok(session)
        })
    }
}
