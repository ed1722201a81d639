use super::storage_error;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain::DomainError;
use domain::ship::{Ship, ShipRepository, ShipSensorOverride};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use std::collections::HashMap;

#[derive(Clone)]
pub struct PostgresShipRepository {
    pool: PgPool,
}

impl PostgresShipRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn from_row(row: &PgRow) -> Result<Ship, DomainError> {
        let created_at: DateTime<Utc> = row.try_get("created_at").map_err(storage_error)?;
        Ok(Ship {
            id: row.try_get("id").map_err(storage_error)?,
            name: row.try_get("name").map_err(storage_error)?,
            code: row.try_get("code").map_err(storage_error)?,
            created_at,
        })
    }
}

#[async_trait]
impl ShipRepository for PostgresShipRepository {
    async fn find_all(&self) -> Result<Vec<Ship>, DomainError> {
        let rows = sqlx::query("SELECT id, name, code, created_at FROM ships ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(storage_error)?;

        rows.iter().map(Self::from_row).collect()
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Ship>, DomainError> {
        let row = sqlx::query("SELECT id, name, code, created_at FROM ships WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_error)?;

        row.as_ref().map(Self::from_row).transpose()
    }

    async fn create(&self, name: &str, code: &str) -> Result<Ship, DomainError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::MissingField("name".to_string()));
        }

        let row = sqlx::query(
            "INSERT INTO ships (name, code) VALUES ($1, $2) \
             RETURNING id, name, code, created_at",
        )
        .bind(name)
        .bind(code.trim())
        .fetch_one(&self.pool)
        .await
        .map_err(storage_error)?;

        Self::from_row(&row)
    }

    async fn overrides_for(&self, ship_id: i32) -> Result<HashMap<String, bool>, DomainError> {
        let rows = sqlx::query("SELECT sensor_code, is_active FROM ship_sensors WHERE ship_id = $1")
            .bind(ship_id)
            .fetch_all(&self.pool)
            .await
            .map_err(storage_error)?;

        rows.iter()
            .map(|r| {
                Ok((
                    r.try_get::<String, _>("sensor_code").map_err(storage_error)?,
                    r.try_get::<bool, _>("is_active").map_err(storage_error)?,
                ))
            })
            .collect()
    }

    async fn all_overrides(&self) -> Result<HashMap<i32, HashMap<String, bool>>, DomainError> {
        let rows = sqlx::query("SELECT ship_id, sensor_code, is_active FROM ship_sensors")
            .fetch_all(&self.pool)
            .await
            .map_err(storage_error)?;

        let mut out: HashMap<i32, HashMap<String, bool>> = HashMap::new();
        for row in rows {
            let entry = ShipSensorOverride {
                ship_id: row.try_get("ship_id").map_err(storage_error)?,
                sensor_code: row.try_get("sensor_code").map_err(storage_error)?,
                active: row.try_get("is_active").map_err(storage_error)?,
            };
            out.entry(entry.ship_id)
                .or_default()
                .insert(entry.sensor_code, entry.active);
        }
        Ok(out)
    }

    async fn toggle_override(&self, ship_id: i32, sensor_code: &str) -> Result<(), DomainError> {
        let existing = sqlx::query(
            "SELECT is_active FROM ship_sensors WHERE ship_id = $1 AND sensor_code = $2",
        )
        .bind(ship_id)
        .bind(sensor_code)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_error)?;

        match existing {
            Some(_) => {
                sqlx::query(
                    "UPDATE ship_sensors SET is_active = NOT is_active \
                     WHERE ship_id = $1 AND sensor_code = $2",
                )
                .bind(ship_id)
                .bind(sensor_code)
                .execute(&self.pool)
                .await
                .map_err(storage_error)?;
            }
            None => {
                // First toggle flips relative to the global default
                let global = sqlx::query("SELECT is_active FROM sensor_config WHERE code = $1")
                    .bind(sensor_code)
                    .fetch_optional(&self.pool)
                    .await
                    .map_err(storage_error)?;

                let global_active: bool = match global {
                    Some(row) => row.try_get("is_active").map_err(storage_error)?,
                    None => return Err(DomainError::NotFound(format!("sensor '{sensor_code}'"))),
                };

                sqlx::query(
                    "INSERT INTO ship_sensors (ship_id, sensor_code, is_active) \
                     VALUES ($1, $2, $3)",
                )
                .bind(ship_id)
                .bind(sensor_code)
                .bind(!global_active)
                .execute(&self.pool)
                .await
                .map_err(storage_error)?;
            }
        }

        Ok(())
    }
}
