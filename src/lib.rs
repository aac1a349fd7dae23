//! One-shot bulk loader for the `verses` table.
//!
//! Streams a CSV file (header discarded) into fixed-size batches and inserts
//! each batch with a single multi-row statement, committing once at the end.

pub mod config;
pub mod db;
pub mod error;
pub mod loader;
pub mod records;

#[cfg_attr(not(test), allow(dead_code))]
pub mod test_support {
    use log::LevelFilter;
    use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
    use sqlx::{ConnectOptions, PgPool};
    use testcontainers_modules::postgres::Postgres;
    use testcontainers_modules::testcontainers::{
        ContainerAsync, core::error::TestcontainersError, runners::AsyncRunner,
    };
    use thiserror::Error;

    static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

    #[derive(Debug, Error)]
    pub enum TestDatabaseError {
        #[error("database error: {0}")]
        Sqlx(#[from] sqlx::Error),
        #[error("migration error: {0}")]
        Migration(#[from] sqlx::migrate::MigrateError),
        #[error("container error: {0}")]
        Container(#[from] TestcontainersError),
    }

    /// Ephemeral database factory for integration tests.
    pub struct TestDatabase {
        pool: Option<PgPool>,
        container: Option<ContainerAsync<Postgres>>,
    }

    impl TestDatabase {
        /// Provision a fresh database by launching a disposable Postgres
        /// container, then run the crate migrations against it.
        pub async fn new() -> Result<Self, TestDatabaseError> {
            let container = Postgres::default().start().await?;

            let host = container.get_host().await?.to_string();
            let port = container.get_host_port_ipv4(5432).await?;

            let options = PgConnectOptions::new()
                .host(&host)
                .port(port)
                .username("postgres")
                .password("postgres")
                .database("postgres")
                .log_statements(LevelFilter::Off);

            let pool = PgPoolOptions::new()
                .max_connections(2)
                .connect_with(options)
                .await?;

            MIGRATOR.run(&pool).await?;

            Ok(Self {
                pool: Some(pool),
                container: Some(container),
            })
        }

        pub fn pool(&self) -> &PgPool {
            self.pool.as_ref().expect("test database pool is available")
        }

        /// Convenience method returning a clone of the pooled connection handle.
        pub fn pool_clone(&self) -> PgPool {
            self.pool().clone()
        }

        /// Close pool connections and tear down the container.
        pub async fn close(mut self) -> Result<(), TestDatabaseError> {
            if let Some(pool) = self.pool.take() {
                pool.close().await;
            }
            if let Some(container) = self.container.take() {
                drop(container);
            }
            Ok(())
        }
    }
}
