//! Infrastructure layer - External integrations

pub mod config;
pub mod database;

pub use database::{
    PostgresAppConfigRepository, PostgresProjectRepository, PostgresReportRepository,
    PostgresSensorRepository, PostgresShipRepository,
};
