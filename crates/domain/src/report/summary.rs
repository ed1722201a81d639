use super::{DeviceReport, ReportTotals};
use serde::Serialize;

/// How a period summary counts channels per ship.
///
/// The original SQL-level aggregation hardcoded seven channels per ship,
/// which miscounts once the configured sensor set diverges from seven.
/// Both behaviors are kept explicit; endpoints use [`PerReport`]
/// (see DESIGN.md).
///
/// [`PerReport`]: AggregationMode::PerReport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregationMode {
    /// Each report contributes its actual number of recorded sensors.
    PerReport,
    /// Bug-compatible legacy mode: seven channels per ship, counted over
    /// the mirrored columns only.
    LegacyFixedChannels,
}

/// Aggregate online/offline figures for one reporting period.
#[derive(Debug, Clone, Serialize)]
pub struct PeriodSummary {
    pub code: String,
    pub total_ships: u32,
    pub total_devices: u32,
    pub total_online: u32,
    pub total_offline: u32,
    pub online_percentage: f64,
    pub offline_percentage: f64,
}

impl PeriodSummary {
    pub fn aggregate(code: impl Into<String>, reports: &[DeviceReport], mode: AggregationMode) -> Self {
        let (online, offline) = match mode {
            AggregationMode::PerReport => reports.iter().fold((0u32, 0u32), |(on, off), r| {
                let t = r.totals();
                (on + t.online, off + t.offline)
            }),
            AggregationMode::LegacyFixedChannels => {
                let online: u32 = reports
                    .iter()
                    .map(|r| ReportTotals::of_map(&r.legacy().to_map()).online)
                    .sum();
                let devices = reports.len() as u32 * 7;
                (online, devices - online)
            }
        };

        let totals = ReportTotals::from_counts(online, offline);
        Self {
            code: code.into(),
            total_ships: reports.len() as u32,
            total_devices: online + offline,
            total_online: online,
            total_offline: offline,
            online_percentage: totals.online_percent,
            offline_percentage: totals.offline_percent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::LegacySensors;
    use chrono::{NaiveDate, Utc};
    use std::collections::BTreeMap;

    fn report(ship: &str, sensors: &[(&str, bool)]) -> DeviceReport {
        DeviceReport::from_storage(
            1,
            "FMS Dec 2025".into(),
            NaiveDate::from_ymd_opt(2025, 12, 1).unwrap(),
            ship.into(),
            sensors.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
            LegacySensors::default(),
            Utc::now(),
            Utc::now(),
        )
    }

    fn seven_sensors(offline: usize) -> Vec<(&'static str, bool)> {
        crate::report::LEGACY_SENSOR_CODES
            .iter()
            .enumerate()
            .map(|(i, code)| (*code, i >= offline))
            .collect()
    }

    #[test]
    fn test_aggregate_worked_example() {
        // 3 ships, 7 sensors each, 2 offline per ship
        let reports: Vec<DeviceReport> = (0..3)
            .map(|i| report(&format!("TB {i}"), &seven_sensors(2)))
            .collect();

        let summary = PeriodSummary::aggregate("FMS Dec 2025", &reports, AggregationMode::PerReport);
        assert_eq!(summary.total_ships, 3);
        assert_eq!(summary.total_online, 15);
        assert_eq!(summary.total_offline, 6);
        assert_eq!(summary.total_devices, 21);
        assert!((summary.online_percentage - 71.43).abs() < 0.01);
        assert!((summary.online_percentage + summary.offline_percentage - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_aggregate_empty_period() {
        let summary = PeriodSummary::aggregate("FMS Jan 2026", &[], AggregationMode::PerReport);
        assert_eq!(summary.total_ships, 0);
        assert_eq!(summary.online_percentage, 0.0);
        assert_eq!(summary.offline_percentage, 0.0);
    }

    #[test]
    fn test_per_report_counts_actual_sensor_set() {
        // 9 configured sensors, one offline
        let mut sensors: Vec<(&str, bool)> = seven_sensors(0);
        sensors.push(("echo_sounder", true));
        sensors.push(("radar", false));
        let reports = vec![report("TB 01", &sensors)];

        let summary = PeriodSummary::aggregate("X", &reports, AggregationMode::PerReport);
        assert_eq!(summary.total_devices, 9);
        assert_eq!(summary.total_offline, 1);
    }

    #[test]
    fn test_legacy_mode_assumes_seven_channels() {
        // Same 9-sensor report: legacy mode only sees the mirrored seven
        let mut sensors: Vec<(&str, bool)> = seven_sensors(0);
        sensors.push(("echo_sounder", true));
        sensors.push(("radar", false));
        let reports = vec![report("TB 01", &sensors)];

        let summary = PeriodSummary::aggregate("X", &reports, AggregationMode::LegacyFixedChannels);
        assert_eq!(summary.total_devices, 7);
        assert_eq!(summary.total_online, 7);
        assert_eq!(summary.total_offline, 0);
    }
}
