use super::storage_error;
use async_trait::async_trait;
use domain::DomainError;
use domain::settings::AppConfigRepository;
use sqlx::{PgPool, Row};

#[derive(Clone)]
pub struct PostgresAppConfigRepository {
    pool: PgPool,
}

impl PostgresAppConfigRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AppConfigRepository for PostgresAppConfigRepository {
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        let row = sqlx::query("SELECT value FROM app_config WHERE key = $1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_error)?;

        match row {
            Some(row) => row.try_get("value").map_err(storage_error),
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), DomainError> {
        sqlx::query(
            "INSERT INTO app_config (key, value) VALUES ($1, $2) \
             ON CONFLICT (key) DO UPDATE SET value = $2",
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await
        .map_err(storage_error)?;
        Ok(())
    }
}
