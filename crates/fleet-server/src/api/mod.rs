mod dashboard;
mod reports;
mod settings;

use axum::Router;
use axum::routing::{get, post, put};
use domain::report::{DeviceReport, ReportTotals};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let static_dir = state.static_dir.clone();

    Router::new()
        .route("/healthz", get(|| async { "ok" }))
        .route("/api/reports", get(reports::list).post(reports::create))
        .route("/api/reports/batch", post(reports::create_batch))
        .route(
            "/api/reports/{id}",
            put(reports::update_sensor).delete(reports::remove),
        )
        .route("/api/report", get(reports::monthly))
        .route("/api/batch-input", get(reports::batch_matrix))
        .route("/api/dashboard", get(dashboard::dashboard))
        .route("/api/dashboard-data", get(dashboard::dashboard_data))
        .route("/api/rekap", get(dashboard::rekap))
        .route("/api/notification-count", get(dashboard::notification_count))
        .route("/api/resolve-alert/{id}", post(dashboard::resolve_alert))
        .route(
            "/api/settings/sensors",
            get(settings::list_sensors).post(settings::create_sensor),
        )
        .route("/api/settings/sensors/{id}/toggle", post(settings::toggle_sensor))
        .route(
            "/api/settings/projects",
            get(settings::list_projects).post(settings::create_project),
        )
        .route(
            "/api/settings/ships",
            get(settings::list_ships).post(settings::create_ship),
        )
        .route("/api/settings/ships/{id}", get(settings::ship_config))
        .route("/api/settings/ships/{id}/toggle", post(settings::toggle_ship_sensor))
        .route(
            "/api/settings/logo",
            get(settings::get_logo).post(settings::upload_logo),
        )
        .route("/api/form-sensors", get(settings::form_sensors))
        .layer(cors)
        .nest_service("/static", tower_http::services::ServeDir::new(static_dir))
        .with_state(state)
}

/// A report as served to clients: entity fields plus computed totals.
#[derive(Serialize)]
pub struct ReportView {
    #[serde(flatten)]
    pub report: DeviceReport,
    pub totals: ReportTotals,
}

impl From<DeviceReport> for ReportView {
    fn from(report: DeviceReport) -> Self {
        let totals = report.totals();
        Self { report, totals }
    }
}
