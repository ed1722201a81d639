use crate::error::{DomainError, Result};
use serde::{Deserialize, Serialize};

/// Value object identifying a sensor channel
///
/// Rules:
/// - Must be non-empty
/// - Must contain only lowercase alphanumeric and underscore
/// - Max length 50 characters (column width)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SensorCode(String);

impl SensorCode {
    /// Create a new SensorCode with validation
    pub fn new(code: impl Into<String>) -> Result<Self> {
        let code = code.into();

        if code.is_empty() {
            return Err(DomainError::InvalidValue(
                "Sensor code cannot be empty".to_string(),
            ));
        }

        if code.len() > 50 {
            return Err(DomainError::InvalidValue(format!(
                "Sensor code too long: {} chars (max 50)",
                code.len()
            )));
        }

        if !code
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
        {
            return Err(DomainError::InvalidValue(format!(
                "Sensor code '{code}' must contain only lowercase alphanumeric and underscore"
            )));
        }

        Ok(Self(code))
    }

    /// Derive a base code from a display name: "Engine RPM" -> "engine_rpm".
    /// Runs of non-alphanumeric characters collapse into a single underscore.
    pub fn slug(name: &str) -> String {
        let mut out = String::with_capacity(name.len());
        let mut last_was_sep = true;
        for c in name.chars() {
            if c.is_ascii_alphanumeric() {
                out.push(c.to_ascii_lowercase());
                last_was_sep = false;
            } else if !last_was_sep {
                out.push('_');
                last_was_sep = true;
            }
        }
        out.trim_matches('_').to_string()
    }

    /// Suffixed variant used to resolve collisions: ("gps", 2) -> "gps_2"
    pub fn with_suffix(base: &str, n: u32) -> String {
        format!("{base}_{n}")
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for SensorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_sensor_code() {
        let code = SensorCode::new("flowmeter_input").unwrap();
        assert_eq!(code.as_str(), "flowmeter_input");
    }

    #[test]
    fn test_empty_code_rejected() {
        assert!(SensorCode::new("").is_err());
    }

    #[test]
    fn test_uppercase_rejected() {
        assert!(SensorCode::new("GPS").is_err());
    }

    #[test]
    fn test_code_too_long() {
        let long = "a".repeat(51);
        assert!(SensorCode::new(long).is_err());
    }

    #[test]
    fn test_slug_basic() {
        assert_eq!(SensorCode::slug("Engine RPM"), "engine_rpm");
    }

    #[test]
    fn test_slug_collapses_separators() {
        assert_eq!(SensorCode::slug("Flowmeter - Input (aft)"), "flowmeter_input_aft");
    }

    #[test]
    fn test_slug_trims_edges() {
        assert_eq!(SensorCode::slug("  GPS  "), "gps");
    }

    #[test]
    fn test_with_suffix() {
        assert_eq!(SensorCode::with_suffix("gps", 2), "gps_2");
    }
}
