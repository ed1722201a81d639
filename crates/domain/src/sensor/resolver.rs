use super::Sensor;
use serde::Serialize;
use std::collections::HashMap;

/// A sensor as it applies to one ship, after merging the global catalog
/// with the ship's overrides.
#[derive(Debug, Clone, Serialize)]
pub struct EffectiveSensor {
    pub code: String,
    pub name: String,
}

/// Merge the global sensor catalog with a ship's overrides into the set of
/// sensors that apply to that ship, in global display order.
///
/// Three-valued merge: an override row wins when present, otherwise the
/// global `active` flag decides. Overrides whose code no longer exists in
/// the catalog are weak references and are silently ignored.
pub fn effective_sensors(
    globals: &[Sensor],
    overrides: &HashMap<String, bool>,
) -> Vec<EffectiveSensor> {
    let mut sensors: Vec<&Sensor> = globals.iter().collect();
    sensors.sort_by_key(|s| s.display_order);

    sensors
        .into_iter()
        .filter(|s| {
            overrides
                .get(s.code.as_str())
                .copied()
                .unwrap_or(s.active)
        })
        .map(|s| EffectiveSensor {
            code: s.code.as_str().to_string(),
            name: s.name.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sensor::SensorCode;

    fn sensor(code: &str, active: bool, order: i32) -> Sensor {
        Sensor::new(order, SensorCode::new(code).unwrap(), code.to_uppercase(), active, order)
    }

    #[test]
    fn test_global_active_no_override_included() {
        let globals = vec![sensor("gps", true, 1)];
        let result = effective_sensors(&globals, &HashMap::new());
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].code, "gps");
    }

    #[test]
    fn test_global_active_override_disables() {
        let globals = vec![sensor("gps", true, 1)];
        let overrides = HashMap::from([("gps".to_string(), false)]);
        assert!(effective_sensors(&globals, &overrides).is_empty());
    }

    #[test]
    fn test_global_inactive_no_override_excluded() {
        let globals = vec![sensor("gps", false, 1)];
        assert!(effective_sensors(&globals, &HashMap::new()).is_empty());
    }

    #[test]
    fn test_global_inactive_override_enables() {
        let globals = vec![sensor("gps", false, 1)];
        let overrides = HashMap::from([("gps".to_string(), true)]);
        assert_eq!(effective_sensors(&globals, &overrides).len(), 1);
    }

    #[test]
    fn test_orphaned_override_ignored() {
        let globals = vec![sensor("gps", true, 1)];
        let overrides = HashMap::from([("renamed_away".to_string(), true)]);
        let result = effective_sensors(&globals, &overrides);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].code, "gps");
    }

    #[test]
    fn test_ordered_by_display_order() {
        let globals = vec![sensor("b_sensor", true, 2), sensor("a_sensor", true, 1)];
        let result = effective_sensors(&globals, &HashMap::new());
        assert_eq!(result[0].code, "a_sensor");
        assert_eq!(result[1].code, "b_sensor");
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let globals = vec![sensor("gps", true, 1), sensor("radar", false, 2)];
        let overrides = HashMap::from([("radar".to_string(), true)]);
        let first: Vec<String> = effective_sensors(&globals, &overrides)
            .into_iter()
            .map(|s| s.code)
            .collect();
        let second: Vec<String> = effective_sensors(&globals, &overrides)
            .into_iter()
            .map(|s| s.code)
            .collect();
        assert_eq!(first, second);
    }
}
