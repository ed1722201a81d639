use crate::error::{DomainError, Result};
use chrono::NaiveDate;

/// Helpers around the free-text period code that groups reports into a
/// reporting cycle: `"{PROJECT} {SHIPCODE} {Mon YYYY}"`.
pub struct PeriodCode;

impl PeriodCode {
    /// Compose the full code for one ship. Empty parts collapse, so a ship
    /// without a code yields `"FMS Dec 2025"` rather than `"FMS  Dec 2025"`.
    pub fn compose(project: &str, ship_code: &str, period: NaiveDate) -> String {
        let month = period.format("%b %Y");
        let parts = [project, ship_code];
        let head: Vec<&str> = parts
            .iter()
            .map(|p| p.trim())
            .filter(|p| !p.is_empty())
            .collect();
        if head.is_empty() {
            month.to_string()
        } else {
            format!("{} {}", head.join(" "), month)
        }
    }

    /// SQL LIKE pattern matching any ship of a project for one month:
    /// `"FMS%Dec 2025"`.
    pub fn wildcard(project: &str, period: NaiveDate) -> String {
        format!("{}%{}", project.trim(), period.format("%b %Y"))
    }

    /// Default listing code for the current month: `"FMS Dec 2025"`.
    pub fn default_for(today: NaiveDate) -> String {
        format!("FMS {}", today.format("%b %Y"))
    }

    /// Default wildcard for the current month: `"FMS % Dec 2025"`.
    pub fn default_wildcard_for(today: NaiveDate) -> String {
        format!("FMS % {}", today.format("%b %Y"))
    }

    /// Parse a `YYYY-MM` month selector into the first day of that month.
    pub fn parse_month(period: &str) -> Result<NaiveDate> {
        NaiveDate::parse_from_str(&format!("{period}-01"), "%Y-%m-%d")
            .map_err(|_| DomainError::InvalidValue(format!("Invalid period '{period}', expected YYYY-MM")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec_2025() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 12, 1).unwrap()
    }

    #[test]
    fn test_compose_full() {
        assert_eq!(PeriodCode::compose("FMS", "TB01", dec_2025()), "FMS TB01 Dec 2025");
    }

    #[test]
    fn test_compose_without_ship_code() {
        assert_eq!(PeriodCode::compose("FMS", "", dec_2025()), "FMS Dec 2025");
    }

    #[test]
    fn test_wildcard() {
        assert_eq!(PeriodCode::wildcard("FMS", dec_2025()), "FMS%Dec 2025");
    }

    #[test]
    fn test_parse_month() {
        assert_eq!(PeriodCode::parse_month("2025-12").unwrap(), dec_2025());
        assert!(PeriodCode::parse_month("december").is_err());
    }

    #[test]
    fn test_default_for() {
        assert_eq!(PeriodCode::default_for(dec_2025()), "FMS Dec 2025");
    }
}
