// vigia-core/src/db/mod.rs

use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};
use tracing::info;

use crate::Error;

/// Holds the two connection pools the storage collaborator requires:
/// a restricted pool for normal reads/updates and an elevated service
/// pool for user/company creation and ledger appends. Repositories
/// route each query to the pool its privilege level requires.
#[derive(Clone)]
pub struct Database {
    pool: Pool<Postgres>,
    service_pool: Pool<Postgres>,
}

impl Database {
    pub async fn new(database_url: &str, service_url: &str) -> Result<Self, Error> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;
        let service_pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(service_url)
            .await?;

        info!("Connected to Postgres");
        Ok(Self { pool, service_pool })
    }

    /// Run migrations in the `migrations/` folder. Schema changes need
    /// the elevated credential, so this runs on the service pool.
    pub async fn migrate(&self) -> Result<(), Error> {
        info!("Applying migrations...");
        sqlx::migrate!("../migrations").run(&self.service_pool).await?;
        info!("Migrations applied successfully.");
        Ok(())
    }

    /// Restricted pool: reads and ordinary updates.
    pub fn pool(&self) -> &Pool<Postgres> {
        &self.pool
    }

    /// Elevated pool: row creation and entry appends only.
    pub fn service_pool(&self) -> &Pool<Postgres> {
        &self.service_pool
    }
}
