//! Domain layer - Pure business logic with no external dependencies
//!
//! This crate contains:
//! - Entities (Sensor, Ship, Project, DeviceReport)
//! - Value Objects (SensorCode, PeriodCode)
//! - Aggregation logic (report totals, period summaries, trouble detection)
//! - Repository interfaces (traits)
//!
//! Principles:
//! - No dependencies on infrastructure
//! - Business rules enforced at domain level
//! - Testable in isolation

pub mod error;
pub mod pagination;
pub mod project;
pub mod report;
pub mod sensor;
pub mod settings;
pub mod ship;

// Re-export commonly used types
pub use error::DomainError;
pub use pagination::{PAGE_SIZE, PageWindow};
pub use report::{AggregationMode, DeviceReport, PeriodSummary, ReportTotals};
pub use sensor::{Sensor, SensorCode, effective_sensors};
pub use ship::{Ship, ShipSensorOverride};
