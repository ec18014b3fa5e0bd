//! Database connection and schema bootstrap
//!
//! Accepts the URLs hosting platforms hand out (`postgres://`, `postgresql://`,
//! `mysql://`) as well as local SQLite files, and creates the tables on startup
//! when `database.auto_migrate` is set.

use std::time::Duration;

use anyhow::Context;
use lighter_signin_migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr};

use crate::config::DatabaseConfig;

/// Backend inferred from the URL scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Postgres,
    MySql,
    Sqlite,
}

/// Normalize a connection URL and detect its backend
///
/// Some platforms still export the legacy `postgres://` scheme; both spellings
/// are accepted and rewritten to `postgresql://`.
pub fn normalize_url(url: &str) -> Result<(Backend, String), DbErr> {
    let url = url.trim();

    if let Some(rest) = url.strip_prefix("postgres://") {
        return Ok((Backend::Postgres, format!("postgresql://{rest}")));
    }
    if url.starts_with("postgresql://") {
        return Ok((Backend::Postgres, url.to_string()));
    }
    if url.starts_with("mysql://") || url.starts_with("mariadb://") {
        return Ok((Backend::MySql, url.replacen("mariadb://", "mysql://", 1)));
    }
    if url.starts_with("sqlite:") {
        return Ok((Backend::Sqlite, url.to_string()));
    }

    Err(DbErr::Custom(format!(
        "Unsupported database URL scheme: {}",
        url.split(':').next().unwrap_or_default()
    )))
}

fn is_memory(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}

/// Build connection options from configuration
pub fn options(config: &DatabaseConfig) -> Result<ConnectOptions, DbErr> {
    let (backend, url) = normalize_url(&config.url)?;
    let mut options = ConnectOptions::new(url.clone());

    options
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect_timeout(Duration::from_secs(config.connect_timeout))
        .sqlx_logging(false);

    // every pooled connection to sqlite::memory: would get its own empty database
    if backend == Backend::Sqlite && is_memory(&url) {
        options.max_connections(1).min_connections(1);
    }

    Ok(options)
}

/// Connect and, when enabled, bootstrap the schema
#[::tracing::instrument(skip(config), fields(auto_migrate = config.auto_migrate))]
pub async fn connect(config: &DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    let options = options(config).context("Invalid database configuration")?;
    let db = Database::connect(options)
        .await
        .context("Failed to connect to database")?;

    ::tracing::info!(backend = ?db.get_database_backend(), "Database connected");

    if config.auto_migrate {
        bootstrap(&db).await.context("Failed to bootstrap database schema")?;
    }

    Ok(db)
}

/// Apply pending migrations
pub async fn bootstrap(db: &DatabaseConnection) -> Result<(), DbErr> {
    let pending = Migrator::get_pending_migrations(db).await?.len();

    if pending > 0 {
        ::tracing::info!(pending, "Applying database migrations");
    }

    Migrator::up(db, None).await
}
