use super::storage_error;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use domain::DomainError;
use domain::report::{DeviceReport, LegacySensors, NewReport, ReportRepository};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use std::collections::BTreeMap;

const REPORT_COLUMNS: &str = "id, code, report_date, ship_name, \
     device_condition, gps, rpm_me_port, rpm_me_stbd, \
     flowmeter_input, flowmeter_output, flowmeter_bunker, \
     sensors_data, created_at, updated_at";

#[derive(Clone)]
pub struct PostgresReportRepository {
    pool: PgPool,
}

impl PostgresReportRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn from_row(row: &PgRow) -> Result<DeviceReport, DomainError> {
        let sensors_json: Option<serde_json::Value> =
            row.try_get("sensors_data").map_err(storage_error)?;
        let sensors: BTreeMap<String, bool> = sensors_json
            .map(|v| serde_json::from_value(v).unwrap_or_default())
            .unwrap_or_default();

        let legacy_col = |name: &str| -> Result<bool, DomainError> {
            Ok(row
                .try_get::<Option<bool>, _>(name)
                .map_err(storage_error)?
                .unwrap_or(false))
        };
        let legacy = LegacySensors {
            device_condition: legacy_col("device_condition")?,
            gps: legacy_col("gps")?,
            rpm_me_port: legacy_col("rpm_me_port")?,
            rpm_me_stbd: legacy_col("rpm_me_stbd")?,
            flowmeter_input: legacy_col("flowmeter_input")?,
            flowmeter_output: legacy_col("flowmeter_output")?,
            flowmeter_bunker: legacy_col("flowmeter_bunker")?,
        };

        let id: i32 = row.try_get("id").map_err(storage_error)?;
        let code: String = row.try_get("code").map_err(storage_error)?;
        let report_date: NaiveDate = row.try_get("report_date").map_err(storage_error)?;
        let ship_name: String = row.try_get("ship_name").map_err(storage_error)?;
        let created_at: DateTime<Utc> = row.try_get("created_at").map_err(storage_error)?;
        let updated_at: DateTime<Utc> = row.try_get("updated_at").map_err(storage_error)?;

        Ok(DeviceReport::from_storage(
            id,
            code,
            report_date,
            ship_name,
            sensors,
            legacy,
            created_at,
            updated_at,
        ))
    }

    fn sensors_json(report: &NewReport) -> Result<serde_json::Value, DomainError> {
        serde_json::to_value(&report.sensors)
            .map_err(|e| DomainError::InvalidValue(format!("Unserializable sensor map: {e}")))
    }
}

#[async_trait]
impl ReportRepository for PostgresReportRepository {
    async fn insert(&self, report: &NewReport) -> Result<DeviceReport, DomainError> {
        let legacy = report.legacy();
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO device_reports
                (code, report_date, ship_name,
                 device_condition, gps, rpm_me_port, rpm_me_stbd,
                 flowmeter_input, flowmeter_output, flowmeter_bunker,
                 sensors_data)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {REPORT_COLUMNS}
            "#
        ))
        .bind(&report.code)
        .bind(report.report_date)
        .bind(&report.ship_name)
        .bind(legacy.device_condition)
        .bind(legacy.gps)
        .bind(legacy.rpm_me_port)
        .bind(legacy.rpm_me_stbd)
        .bind(legacy.flowmeter_input)
        .bind(legacy.flowmeter_output)
        .bind(legacy.flowmeter_bunker)
        .bind(Self::sensors_json(report)?)
        .fetch_one(&self.pool)
        .await
        .map_err(storage_error)?;

        Self::from_row(&row)
    }

    async fn insert_batch(&self, reports: &[NewReport]) -> Result<usize, DomainError> {
        let mut tx = self.pool.begin().await.map_err(storage_error)?;

        for report in reports {
            let legacy = report.legacy();
            let result = sqlx::query(
                r#"
                INSERT INTO device_reports
                    (code, report_date, ship_name,
                     device_condition, gps, rpm_me_port, rpm_me_stbd,
                     flowmeter_input, flowmeter_output, flowmeter_bunker,
                     sensors_data)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
                "#,
            )
            .bind(&report.code)
            .bind(report.report_date)
            .bind(&report.ship_name)
            .bind(legacy.device_condition)
            .bind(legacy.gps)
            .bind(legacy.rpm_me_port)
            .bind(legacy.rpm_me_stbd)
            .bind(legacy.flowmeter_input)
            .bind(legacy.flowmeter_output)
            .bind(legacy.flowmeter_bunker)
            .bind(Self::sensors_json(report)?)
            .execute(&mut *tx)
            .await;

            if let Err(e) = result {
                // Rollback happens on drop; surface the failing ship
                tracing::warn!(ship = %report.ship_name, error = %e, "Batch insert aborted");
                return Err(DomainError::BatchFailed {
                    ship: report.ship_name.clone(),
                    reason: e.to_string(),
                });
            }
        }

        tx.commit().await.map_err(storage_error)?;
        Ok(reports.len())
    }

    async fn find_by_code(
        &self,
        code: &str,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<DeviceReport>, DomainError> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {REPORT_COLUMNS}
            FROM device_reports
            WHERE code = $1
            ORDER BY ship_name ASC
            LIMIT $2 OFFSET $3
            "#
        ))
        .bind(code)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(storage_error)?;

        rows.iter().map(Self::from_row).collect()
    }

    async fn count_by_code(&self, code: &str) -> Result<i64, DomainError> {
        let row = sqlx::query("SELECT COUNT(*) AS total FROM device_reports WHERE code = $1")
            .bind(code)
            .fetch_one(&self.pool)
            .await
            .map_err(storage_error)?;
        row.try_get("total").map_err(storage_error)
    }

    async fn find_all_by_code(&self, code: &str) -> Result<Vec<DeviceReport>, DomainError> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {REPORT_COLUMNS}
            FROM device_reports
            WHERE code = $1
            ORDER BY ship_name ASC
            "#
        ))
        .bind(code)
        .fetch_all(&self.pool)
        .await
        .map_err(storage_error)?;

        rows.iter().map(Self::from_row).collect()
    }

    async fn find_matching(&self, pattern: &str) -> Result<Vec<DeviceReport>, DomainError> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {REPORT_COLUMNS}
            FROM device_reports
            WHERE code LIKE $1
            ORDER BY report_date ASC, ship_name ASC
            "#
        ))
        .bind(pattern)
        .fetch_all(&self.pool)
        .await
        .map_err(storage_error)?;

        rows.iter().map(Self::from_row).collect()
    }

    async fn list_codes(&self) -> Result<Vec<String>, DomainError> {
        let rows = sqlx::query("SELECT DISTINCT code FROM device_reports ORDER BY code DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(storage_error)?;

        rows.iter()
            .map(|r| r.try_get("code").map_err(storage_error))
            .collect()
    }

    async fn find_latest(&self, limit: i64) -> Result<Vec<DeviceReport>, DomainError> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {REPORT_COLUMNS}
            FROM device_reports
            ORDER BY created_at DESC
            LIMIT $1
            "#
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(storage_error)?;

        rows.iter().map(Self::from_row).collect()
    }

    async fn find_latest_per_ship(&self) -> Result<Vec<DeviceReport>, DomainError> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT DISTINCT ON (ship_name) {REPORT_COLUMNS}
            FROM device_reports
            ORDER BY ship_name, created_at DESC
            "#
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(storage_error)?;

        rows.iter().map(Self::from_row).collect()
    }

    async fn set_sensor_status(
        &self,
        id: i32,
        sensor_code: &str,
        value: bool,
    ) -> Result<(), DomainError> {
        // Both representations go out in the same statement: the canonical
        // map entry and, for the seven mirrored sensors, the legacy column.
        let query = match LegacySensors::column_for(sensor_code) {
            Some(column) => format!(
                "UPDATE device_reports \
                 SET sensors_data = jsonb_set(COALESCE(sensors_data, '{{}}'::jsonb), $2, to_jsonb($3::boolean), true), \
                     {column} = $3, updated_at = NOW() \
                 WHERE id = $1"
            ),
            None => "UPDATE device_reports \
                 SET sensors_data = jsonb_set(COALESCE(sensors_data, '{}'::jsonb), $2, to_jsonb($3::boolean), true), \
                     updated_at = NOW() \
                 WHERE id = $1"
                .to_string(),
        };

        let result = sqlx::query(&query)
            .bind(id)
            .bind(vec![sensor_code.to_string()])
            .bind(value)
            .execute(&self.pool)
            .await
            .map_err(storage_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound(format!("report {id}")));
        }
        Ok(())
    }

    async fn delete(&self, id: i32) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM device_reports WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(storage_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound(format!("report {id}")));
        }
        Ok(())
    }
}
