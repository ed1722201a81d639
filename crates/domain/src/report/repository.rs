use super::{DeviceReport, NewReport};
use crate::DomainError;
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReportRepository: Send + Sync {
    /// Insert one report, returning it with its assigned id.
    async fn insert(&self, report: &NewReport) -> Result<DeviceReport, DomainError>;

    /// Insert a whole batch inside one transaction. The first failing
    /// insert aborts the batch and names the failing ship.
    async fn insert_batch(&self, reports: &[NewReport]) -> Result<usize, DomainError>;

    /// Reports matching the exact period code, ordered by ship name.
    async fn find_by_code(&self, code: &str, limit: i64, offset: i64) -> Result<Vec<DeviceReport>, DomainError>;

    async fn count_by_code(&self, code: &str) -> Result<i64, DomainError>;

    /// Every report for one exact period code, unpaginated (aggregation).
    async fn find_all_by_code(&self, code: &str) -> Result<Vec<DeviceReport>, DomainError>;

    /// Reports whose code matches a SQL LIKE pattern (project + month
    /// wildcard), ordered by report date then ship name.
    async fn find_matching(&self, pattern: &str) -> Result<Vec<DeviceReport>, DomainError>;

    /// All distinct period codes, descending by code. Lexicographic, not
    /// chronological; kept for parity with the existing listing order.
    async fn list_codes(&self) -> Result<Vec<String>, DomainError>;

    /// Most recently created reports across all periods.
    async fn find_latest(&self, limit: i64) -> Result<Vec<DeviceReport>, DomainError>;

    /// The single most recent report per ship.
    async fn find_latest_per_ship(&self) -> Result<Vec<DeviceReport>, DomainError>;

    /// Set one sensor's status: the canonical map entry and, when the code
    /// matches a mirrored column, that column too, in the same write.
    async fn set_sensor_status(&self, id: i32, sensor_code: &str, value: bool) -> Result<(), DomainError>;

    async fn delete(&self, id: i32) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{AggregationMode, PeriodSummary};
    use chrono::{NaiveDate, Utc};

    fn report(ship: &str, statuses: &[(&str, bool)]) -> DeviceReport {
        DeviceReport {
            id: 0,
            code: "FMS Dec 2025".to_string(),
            report_date: NaiveDate::from_ymd_opt(2025, 12, 1).unwrap(),
            ship_name: ship.to_string(),
            sensors: statuses.iter().map(|(c, v)| (c.to_string(), *v)).collect(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_mocked_repository_feeds_period_aggregation() {
        let mut repo = MockReportRepository::new();
        repo.expect_find_all_by_code()
            .withf(|code| code == "FMS Dec 2025")
            .returning(|_| {
                Ok(vec![
                    report("TB 01", &[("gps", true), ("rpm_me_port", true)]),
                    report("TB 02", &[("gps", false), ("rpm_me_port", true)]),
                ])
            });

        let reports = repo.find_all_by_code("FMS Dec 2025").await.unwrap();
        let summary =
            PeriodSummary::aggregate("FMS Dec 2025", &reports, AggregationMode::PerReport);

        assert_eq!(summary.total_ships, 2);
        assert_eq!(summary.total_devices, 4);
        assert_eq!(summary.total_online, 3);
        assert_eq!(summary.total_offline, 1);
    }
}
