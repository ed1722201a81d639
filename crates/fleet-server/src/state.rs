use crate::services::LogoService;
use infrastructure::{
    PostgresAppConfigRepository, PostgresProjectRepository, PostgresReportRepository,
    PostgresSensorRepository, PostgresShipRepository,
};
use sqlx::PgPool;
use std::path::PathBuf;

/// Shared per-request state: the bounded pool behind each repository and
/// the logo cache are the only cross-request resources.
pub struct AppState {
    pub reports: PostgresReportRepository,
    pub sensors: PostgresSensorRepository,
    pub ships: PostgresShipRepository,
    pub projects: PostgresProjectRepository,
    pub logo: LogoService,
    pub static_dir: PathBuf,
}

impl AppState {
    pub fn new(pool: PgPool, static_dir: PathBuf) -> Self {
        Self {
            reports: PostgresReportRepository::new(pool.clone()),
            sensors: PostgresSensorRepository::new(pool.clone()),
            ships: PostgresShipRepository::new(pool.clone()),
            projects: PostgresProjectRepository::new(pool.clone()),
            logo: LogoService::new(PostgresAppConfigRepository::new(pool)),
            static_dir,
        }
    }
}
