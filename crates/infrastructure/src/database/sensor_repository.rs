use super::storage_error;
use async_trait::async_trait;
use domain::DomainError;
use domain::sensor::{Sensor, SensorCode, SensorRepository};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

#[derive(Clone)]
pub struct PostgresSensorRepository {
    pool: PgPool,
}

impl PostgresSensorRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn from_row(row: &PgRow) -> Result<Sensor, DomainError> {
        let code: String = row.try_get("code").map_err(storage_error)?;
        Ok(Sensor {
            id: row.try_get("id").map_err(storage_error)?,
            code: SensorCode::new(code)?,
            name: row.try_get("name").map_err(storage_error)?,
            active: row.try_get("is_active").map_err(storage_error)?,
            display_order: row.try_get("display_order").map_err(storage_error)?,
        })
    }

    /// Derive a catalog-unique code from the display name, suffixing
    /// `_2`, `_3`... while the slug is taken.
    async fn unique_code(&self, name: &str) -> Result<String, DomainError> {
        let base = SensorCode::slug(name);
        if base.is_empty() {
            return Err(DomainError::InvalidValue(format!(
                "Name '{name}' yields an empty sensor code"
            )));
        }

        let mut candidate = base.clone();
        let mut counter = 1u32;
        loop {
            let row = sqlx::query("SELECT EXISTS(SELECT 1 FROM sensor_config WHERE code = $1) AS taken")
                .bind(&candidate)
                .fetch_one(&self.pool)
                .await
                .map_err(storage_error)?;
            let taken: bool = row.try_get("taken").map_err(storage_error)?;
            if !taken {
                return Ok(candidate);
            }
            counter += 1;
            candidate = SensorCode::with_suffix(&base, counter);
        }
    }
}

#[async_trait]
impl SensorRepository for PostgresSensorRepository {
    async fn find_all(&self) -> Result<Vec<Sensor>, DomainError> {
        let rows = sqlx::query(
            "SELECT id, code, name, is_active, display_order \
             FROM sensor_config ORDER BY display_order ASC, id ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(storage_error)?;

        rows.iter().map(Self::from_row).collect()
    }

    async fn find_active(&self) -> Result<Vec<Sensor>, DomainError> {
        let rows = sqlx::query(
            "SELECT id, code, name, is_active, display_order \
             FROM sensor_config WHERE is_active = true ORDER BY display_order ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(storage_error)?;

        rows.iter().map(Self::from_row).collect()
    }

    async fn create(&self, name: &str) -> Result<Sensor, DomainError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::MissingField("name".to_string()));
        }

        let code = self.unique_code(name).await?;

        let row = sqlx::query(
            r#"
            INSERT INTO sensor_config (code, name, is_active, display_order)
            VALUES ($1, $2, true,
                    (SELECT COALESCE(MAX(display_order), 0) + 1 FROM sensor_config))
            RETURNING id, code, name, is_active, display_order
            "#,
        )
        .bind(&code)
        .bind(name)
        .fetch_one(&self.pool)
        .await
        .map_err(storage_error)?;

        Self::from_row(&row)
    }

    async fn toggle(&self, id: i32) -> Result<(), DomainError> {
        let result = sqlx::query("UPDATE sensor_config SET is_active = NOT is_active WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(storage_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound(format!("sensor {id}")));
        }
        Ok(())
    }
}
