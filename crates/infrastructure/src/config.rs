use anyhow::{Context, Result};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::time::Duration;

/// Connection pool bounds, matching the service's single-request-per-
/// operation model: a small bounded pool is the only shared resource.
const MAX_CONNECTIONS: u32 = 10;
const MIN_CONNECTIONS: u32 = 5;
const MAX_LIFETIME: Duration = Duration::from_secs(30 * 60);

/// Database settings resolved from the environment.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

impl DatabaseConfig {
    /// Read `DATABASE_URL`, honoring a `.env` file if present.
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        let url = std::env::var("DATABASE_URL")
            .context("DATABASE_URL is empty (set it in .env)")?;
        Ok(Self { url })
    }

    pub async fn connect(&self) -> Result<PgPool> {
        let pool = PgPoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .min_connections(MIN_CONNECTIONS)
            .max_lifetime(MAX_LIFETIME)
            .connect(&self.url)
            .await
            .context("Failed to connect to database")?;
        Ok(pool)
    }
}
