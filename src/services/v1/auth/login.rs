use actix_web::web::{self, Data};
use sea_orm::DatabaseConnection;

use crate::entities::v1::users::Model;
use crate::errors::{Error, Validation};
use crate::middlewares::v1::session::Session;
use crate::requests::v1::auth::LoginRequest;
use crate::state::AppState;

/// Check credentials and open a session
///
/// Fail if:
/// - email or password is empty
/// - no user has this email
/// - password is incorrect
#[::tracing::instrument(skip_all)]
pub async fn login(
    db: &DatabaseConnection,
    state: &Data<AppState>,
    request: LoginRequest,
) -> Result<Session, Error> {
    let request = request.normalized();
    let mut validation = Validation::new();

    if request.email.is_empty() {
        validation.add("email", "Email is required");
    }

    if request.password.is_empty() {
        validation.add("password", "Password is required");
    }

    validation.into_result()?;

    let user = Model::find_by_email(db, &request.email).await?;

    let verifier = state.clone();
    let password = request.password;
    let stored = user.as_ref().map(|user| user.password.clone());
    let (verified, password) = web::block(move || {
        // unknown emails still pay for one verification
        let hash = stored.as_deref().unwrap_or(&verifier.dummy_hash);
        let verified = verifier.hasher.verify(&password, hash);
        (verified, password)
    })
    .await?;

    let Some(user) = user else {
        ::tracing::info!("Login attempt for unknown email");

        return Err(Error::InvalidCredentials);
    };

    match verified {
        Ok(true) => {}
        Ok(false) => {
            ::tracing::info!(user_id = %user.id, "Login attempt with wrong password");

            return Err(Error::InvalidCredentials);
        }
        Err(e) => {
            ::tracing::warn!(user_id = %user.id, error = %e, "Stored password is not a valid hash");

            return Err(Error::InvalidCredentials);
        }
    }

    let user = rehash(db, state, user, password).await;
    let session = user.create_session(db, state.session_lifetime()).await?;
    let session = Session::from((session, user));

    state.sessions.insert(session.clone());

    ::tracing::info!(user_id = %session.user_id, session_id = %session.id, "User logged in");

    Ok(session)
}

/// Upgrade a hash made with older argon2 parameters; failures keep the old hash
async fn rehash(db: &DatabaseConnection, state: &Data<AppState>, user: Model, password: String) -> Model {
    if !state.hasher.needs_rehash(&user.password).unwrap_or(false) {
        return user;
    }

    let hasher = state.clone();
    let hash = match web::block(move || hasher.hasher.hash(&password)).await {
        Ok(Ok(hash)) => hash,
        Ok(Err(e)) => {
            ::tracing::warn!(user_id = %user.id, error = %e, "Failed to rehash password");
            return user;
        }
        Err(e) => {
            ::tracing::warn!(user_id = %user.id, error = %e, "Failed to rehash password");
            return user;
        }
    };

    match user.update_password(db, hash).await {
        Ok(updated) => {
            ::tracing::info!(user_id = %updated.id, "Password hash upgraded");
            updated
        }
        Err(e) => {
            ::tracing::warn!(user_id = %user.id, error = %e, "Failed to store rehashed password");
            user
        }
    }
}
