mod catalog;

pub use catalog::PgSongCatalog;

use sqlx::PgPool;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;

use crate::config::Settings;
use crate::error::AppError;

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Build the catalog connection pool. Connections are opened on first use.
pub fn connect_lazy(settings: &Settings) -> Result<PgPool, AppError> {
    PgPoolOptions::new()
        .max_connections(settings.database_max_connections)
        .acquire_timeout(settings.database_acquire_timeout)
        .test_before_acquire(true)
        .connect_lazy(&settings.database_url)
        .map_err(|e| AppError::Database(format!("failed to configure connection pool: {e}")))
}

/// Create the catalog tables if they do not exist yet.
pub async fn run_migrations(pool: &PgPool) -> Result<(), AppError> {
    MIGRATOR
        .run(pool)
        .await
        .map_err(|e| AppError::Database(format!("failed to run migrations: {e}")))
}
