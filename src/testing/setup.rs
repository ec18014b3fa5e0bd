use actix_web::web::Data;
use sea_orm::DatabaseConnection;

use crate::config::{AppConfig, Argon2Config, DatabaseConfig, Environment};
use crate::database;
use crate::entities::v1::users;
use crate::security::PasswordHasher;
use crate::state::AppState;

/// Fresh in-memory SQLite database with every migration applied
///
/// # Panics
/// Panics if the connection or a migration fails; a broken setup should fail
/// the test right away.
pub async fn database() -> DatabaseConnection {
    database::connect(&DatabaseConfig::memory())
        .await
        .expect("Failed to set up in-memory database")
}

/// Testing profile: in-memory database, light argon2, no rate limiting
pub fn config() -> AppConfig {
    AppConfig::for_environment(Environment::Testing)
}

pub fn state() -> Data<AppState> {
    Data::new(AppState::new(config()).expect("Failed to build application state"))
}

/// Hasher with reduced argon2 cost; tests would crawl with the production one
pub fn password_hasher() -> PasswordHasher {
    PasswordHasher::from_config(&Argon2Config::light()).expect("Failed to build password hasher")
}

/// Insert a user whose password is hashed with the state's hasher
pub async fn create_user(
    db: &DatabaseConnection,
    state: &AppState,
    username: &str,
    email: &str,
    password: &str,
) -> users::Model {
    let hash = state.hasher.hash(password).expect("Failed to hash password");

    users::Model::new(username, email, hash)
        .store(db)
        .await
        .expect("Failed to store user")
}
