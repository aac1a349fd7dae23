use thiserror::Error;

/// Errors that terminate a load. None of these are recoverable: a failure
/// anywhere drops the open transaction, so no partial batch survives.
#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("config error: {0}")]
    Config(String),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}
