use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use crate::config::DbConfig;
use crate::error::LoaderError;

static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

/// Open the database session used for the load. The pool is capped at one
/// connection: the loader is strictly sequential and never needs more.
pub async fn connect(config: &DbConfig) -> Result<PgPool, LoaderError> {
    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect_with(config.connect_options())
        .await?;

    Ok(pool)
}

/// Bring the verses schema up to date before loading.
pub async fn run_migrations(pool: &PgPool) -> Result<(), LoaderError> {
    MIGRATOR.run(pool).await?;
    Ok(())
}
