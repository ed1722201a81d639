mod entity;
mod period;
mod repository;
mod summary;

pub use entity::{DeviceReport, LEGACY_SENSOR_CODES, LegacySensors, NewReport, ReportTotals};
pub use period::PeriodCode;
pub use repository::ReportRepository;
pub use summary::{AggregationMode, PeriodSummary};
