use super::SensorCode;
use serde::{Deserialize, Serialize};

/// A named boolean sensor channel in the global catalog.
///
/// Sensors are soft-deactivated via the `active` flag, never hard-deleted:
/// old reports keep referring to their codes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sensor {
    pub id: i32,
    pub code: SensorCode,
    pub name: String,
    pub active: bool,
    pub display_order: i32,
}

impl Sensor {
    pub fn new(id: i32, code: SensorCode, name: impl Into<String>, active: bool, display_order: i32) -> Self {
        Self {
            id,
            code,
            name: name.into(),
            active,
            display_order,
        }
    }
}
