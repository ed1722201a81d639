mod app_config_repository;
mod project_repository;
mod report_repository;
mod sensor_repository;
mod ship_repository;

pub use app_config_repository::PostgresAppConfigRepository;
pub use project_repository::PostgresProjectRepository;
pub use report_repository::PostgresReportRepository;
pub use sensor_repository::PostgresSensorRepository;
pub use ship_repository::PostgresShipRepository;

use domain::DomainError;

/// Map a driver error onto the domain taxonomy, folding unique-constraint
/// violations into conflicts.
pub(crate) fn storage_error(e: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(ref db_err) = e {
        if db_err.is_unique_violation() {
            return DomainError::Conflict(db_err.message().to_string());
        }
    }
    DomainError::Storage(e.to_string())
}
