//! Fleet device-status reporting API
//!
//! Records per-ship sensor availability reports, aggregates online/offline
//! percentages per reporting period and serves dashboard, report and
//! settings endpoints over PostgreSQL.

pub mod api;
pub mod error;
pub mod services;
pub mod state;
