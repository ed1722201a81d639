use crate::DomainError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A vessel in the fleet. Reports reference ships by a denormalized name
/// copy; overrides reference them by id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ship {
    pub id: i32,
    pub name: String,
    /// Short code used when composing period codes ("TB01").
    pub code: String,
    pub created_at: DateTime<Utc>,
}

/// A per-ship exception to a sensor's global default. Exists only when the
/// effective status differs from the global flag or was explicitly toggled.
///
/// `sensor_code` is a weak reference: no foreign key, orphaned rows are
/// ignored by the resolver.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShipSensorOverride {
    pub ship_id: i32,
    pub sensor_code: String,
    pub active: bool,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShipRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Ship>, DomainError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Ship>, DomainError>;

    async fn create(&self, name: &str, code: &str) -> Result<Ship, DomainError>;

    /// Override map for one ship: sensor code -> forced status.
    async fn overrides_for(&self, ship_id: i32) -> Result<HashMap<String, bool>, DomainError>;

    /// Override maps for every ship, keyed by ship id.
    async fn all_overrides(&self) -> Result<HashMap<i32, HashMap<String, bool>>, DomainError>;

    /// Toggle a sensor for one ship. With no existing override the new row
    /// is the inverse of the global default; otherwise the stored value is
    /// flipped in place.
    async fn toggle_override(&self, ship_id: i32, sensor_code: &str) -> Result<(), DomainError>;
}
