use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The seven original sensor channels mirrored into fixed columns.
/// Order matches their seeded display order.
pub const LEGACY_SENSOR_CODES: [&str; 7] = [
    "device_condition",
    "gps",
    "rpm_me_port",
    "rpm_me_stbd",
    "flowmeter_input",
    "flowmeter_output",
    "flowmeter_bunker",
];

/// One persisted observation: a ship, a period code and the status of every
/// sensor recorded at submission time.
///
/// The `sensors` map is the single canonical representation. The seven
/// legacy boolean columns in storage are a derived compatibility view
/// ([`DeviceReport::legacy`]); they are regenerated from the map on every
/// write and only read back to hydrate rows persisted by older writers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceReport {
    pub id: i32,
    /// Free-text period code ("FMS TB01 Dec 2025"). Grouping key, not a
    /// foreign key; duplicates are possible.
    pub code: String,
    pub report_date: NaiveDate,
    /// Denormalized ship name copy, not a foreign key.
    pub ship_name: String,
    pub sensors: BTreeMap<String, bool>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A report about to be persisted (single or batch submission).
#[derive(Debug, Clone)]
pub struct NewReport {
    pub code: String,
    pub report_date: NaiveDate,
    pub ship_name: String,
    pub sensors: BTreeMap<String, bool>,
}

/// The legacy fixed-column mirror of a sensor status map.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacySensors {
    pub device_condition: bool,
    pub gps: bool,
    pub rpm_me_port: bool,
    pub rpm_me_stbd: bool,
    pub flowmeter_input: bool,
    pub flowmeter_output: bool,
    pub flowmeter_bunker: bool,
}

impl LegacySensors {
    pub fn from_map(sensors: &BTreeMap<String, bool>) -> Self {
        let get = |code: &str| sensors.get(code).copied().unwrap_or(false);
        Self {
            device_condition: get("device_condition"),
            gps: get("gps"),
            rpm_me_port: get("rpm_me_port"),
            rpm_me_stbd: get("rpm_me_stbd"),
            flowmeter_input: get("flowmeter_input"),
            flowmeter_output: get("flowmeter_output"),
            flowmeter_bunker: get("flowmeter_bunker"),
        }
    }

    /// Expand into a full seven-entry map, used to hydrate reports whose
    /// JSONB column predates the dynamic sensor path.
    pub fn to_map(self) -> BTreeMap<String, bool> {
        let values = [
            self.device_condition,
            self.gps,
            self.rpm_me_port,
            self.rpm_me_stbd,
            self.flowmeter_input,
            self.flowmeter_output,
            self.flowmeter_bunker,
        ];
        LEGACY_SENSOR_CODES
            .iter()
            .zip(values)
            .map(|(code, v)| (code.to_string(), v))
            .collect()
    }

    /// Whether a sensor code maps to one of the mirrored columns. The
    /// returned name is safe to interpolate into SQL column position.
    pub fn column_for(code: &str) -> Option<&'static str> {
        LEGACY_SENSOR_CODES.iter().find(|c| **c == code).copied()
    }
}

/// Online/offline counts and percentages for a single report.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReportTotals {
    pub online: u32,
    pub offline: u32,
    pub online_percent: f64,
    pub offline_percent: f64,
}

impl ReportTotals {
    pub fn of_map(sensors: &BTreeMap<String, bool>) -> Self {
        let online = sensors.values().filter(|v| **v).count() as u32;
        let offline = sensors.len() as u32 - online;
        Self::from_counts(online, offline)
    }

    pub fn from_counts(online: u32, offline: u32) -> Self {
        let total = (online + offline) as f64;
        // Percentages defined as 0 for an empty report, never NaN
        let (online_percent, offline_percent) = if total > 0.0 {
            (online as f64 / total * 100.0, offline as f64 / total * 100.0)
        } else {
            (0.0, 0.0)
        };
        Self {
            online,
            offline,
            online_percent,
            offline_percent,
        }
    }
}

impl DeviceReport {
    /// Hydrate from stored parts. The dynamic map takes precedence; an
    /// empty map falls back to the legacy mirror columns.
    pub fn from_storage(
        id: i32,
        code: String,
        report_date: NaiveDate,
        ship_name: String,
        sensors: BTreeMap<String, bool>,
        legacy: LegacySensors,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        let sensors = if sensors.is_empty() {
            legacy.to_map()
        } else {
            sensors
        };
        Self {
            id,
            code,
            report_date,
            ship_name,
            sensors,
            created_at,
            updated_at,
        }
    }

    pub fn totals(&self) -> ReportTotals {
        ReportTotals::of_map(&self.sensors)
    }

    /// Derived legacy column view, written alongside the map.
    pub fn legacy(&self) -> LegacySensors {
        LegacySensors::from_map(&self.sensors)
    }

    /// A ship is in trouble when its most recent report has any sensor off.
    pub fn in_trouble(&self) -> bool {
        self.totals().offline > 0
    }
}

impl NewReport {
    pub fn legacy(&self) -> LegacySensors {
        LegacySensors::from_map(&self.sensors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(entries: &[(&str, bool)]) -> BTreeMap<String, bool> {
        entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_totals_counts_and_percentages() {
        let totals = ReportTotals::of_map(&map(&[("gps", true), ("radar", true), ("echo", false)]));
        assert_eq!(totals.online, 2);
        assert_eq!(totals.offline, 1);
        assert!((totals.online_percent - 66.666).abs() < 0.01);
        assert!((totals.online_percent + totals.offline_percent - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_totals_empty_map_is_zero_not_nan() {
        let totals = ReportTotals::of_map(&BTreeMap::new());
        assert_eq!(totals.online, 0);
        assert_eq!(totals.offline, 0);
        assert_eq!(totals.online_percent, 0.0);
        assert_eq!(totals.offline_percent, 0.0);
    }

    #[test]
    fn test_legacy_roundtrip() {
        let legacy = LegacySensors {
            gps: true,
            flowmeter_bunker: true,
            ..Default::default()
        };
        assert_eq!(LegacySensors::from_map(&legacy.to_map()), legacy);
    }

    #[test]
    fn test_legacy_fallback_matches_dynamic_path() {
        // A legacy-only row and a dynamic row with the same states must
        // produce identical totals.
        let legacy = LegacySensors {
            device_condition: true,
            gps: true,
            ..Default::default()
        };
        let hydrated = DeviceReport::from_storage(
            1,
            "FMS Dec 2025".into(),
            NaiveDate::from_ymd_opt(2025, 12, 1).unwrap(),
            "TB 01".into(),
            BTreeMap::new(),
            legacy,
            Utc::now(),
            Utc::now(),
        );
        let dynamic = ReportTotals::of_map(&legacy.to_map());
        assert_eq!(hydrated.totals(), dynamic);
        assert_eq!(hydrated.totals().online, 2);
        assert_eq!(hydrated.totals().offline, 5);
    }

    #[test]
    fn test_dynamic_map_takes_precedence() {
        let legacy = LegacySensors::default(); // all offline
        let hydrated = DeviceReport::from_storage(
            1,
            "FMS Dec 2025".into(),
            NaiveDate::from_ymd_opt(2025, 12, 1).unwrap(),
            "TB 01".into(),
            map(&[("gps", true)]),
            legacy,
            Utc::now(),
            Utc::now(),
        );
        assert_eq!(hydrated.totals().online, 1);
        assert_eq!(hydrated.totals().offline, 0);
    }

    #[test]
    fn test_in_trouble() {
        let mut report = DeviceReport::from_storage(
            1,
            "FMS Dec 2025".into(),
            NaiveDate::from_ymd_opt(2025, 12, 1).unwrap(),
            "TB 01".into(),
            map(&[("gps", false), ("device_condition", true)]),
            LegacySensors::default(),
            Utc::now(),
            Utc::now(),
        );
        assert!(report.in_trouble());
        report.sensors.insert("gps".to_string(), true);
        assert!(!report.in_trouble());
    }

    #[test]
    fn test_column_for_rejects_unknown_codes() {
        assert_eq!(LegacySensors::column_for("gps"), Some("gps"));
        assert_eq!(LegacySensors::column_for("gps; DROP TABLE"), None);
    }
}
