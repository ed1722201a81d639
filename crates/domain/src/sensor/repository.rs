use super::Sensor;
use crate::DomainError;
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SensorRepository: Send + Sync {
    /// Full catalog, ordered by display order then id.
    async fn find_all(&self) -> Result<Vec<Sensor>, DomainError>;

    /// Globally active sensors, ordered by display order.
    async fn find_active(&self) -> Result<Vec<Sensor>, DomainError>;

    /// Create a sensor from a display name. The code is derived by
    /// slugifying the name and suffixing on collision; display order is
    /// appended after the current maximum.
    async fn create(&self, name: &str) -> Result<Sensor, DomainError>;

    /// Flip the global active flag.
    async fn toggle(&self, id: i32) -> Result<(), DomainError>;
}
