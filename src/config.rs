use sqlx::postgres::PgConnectOptions;

use crate::error::LoaderError;

/// Database connection parameters loaded from environment variables.
#[derive(Debug, Clone)]
pub struct DbConfig {
    pub user: String,
    pub password: String,
    pub host: String,
    pub port: u16,
    pub database: String,
}

impl DbConfig {
    pub fn from_env() -> Result<Self, LoaderError> {
        let user = require("DB_USER")?;
        let password = require("DB_PASSWORD")?;
        let host = require("DB_HOST")?;
        let database = require("DB_NAME")?;
        let port = std::env::var("DB_PORT")
            .ok()
            .and_then(|v| v.parse::<u16>().ok())
            .unwrap_or(5432);

        Ok(Self {
            user,
            password,
            host,
            port,
            database,
        })
    }

    /// Connection options for the configured server and database.
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.database)
    }
}

fn require(name: &str) -> Result<String, LoaderError> {
    std::env::var(name).map_err(|_| LoaderError::Config(format!("{name} is required")))
}
