use super::ReportView;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use axum::Json;
use axum::extract::{Path, Query, State};
use chrono::{NaiveDate, Utc};
use domain::report::{NewReport, PeriodCode, ReportRepository};
use domain::sensor::SensorRepository;
use domain::ship::ShipRepository;
use domain::{DomainError, PAGE_SIZE, PageWindow};
use domain::project::ProjectRepository;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::collections::BTreeMap;
use std::sync::Arc;

#[derive(Deserialize)]
pub struct ListParams {
    code: Option<String>,
    page: Option<i64>,
}

#[derive(Serialize)]
pub struct ReportPage {
    reports: Vec<ReportView>,
    #[serde(flatten)]
    window: PageWindow,
}

pub async fn list(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> ApiResult<Json<ReportPage>> {
    let code = params
        .code
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| PeriodCode::default_for(Utc::now().date_naive()));
    let page = params.page.unwrap_or(1).max(1);

    let total = state.reports.count_by_code(&code).await?;
    let rows = state
        .reports
        .find_by_code(&code, PAGE_SIZE, (page - 1) * PAGE_SIZE)
        .await?;

    let window = PageWindow::build(page, total, rows.len());
    Ok(Json(ReportPage {
        reports: rows.into_iter().map(ReportView::from).collect(),
        window,
    }))
}

#[derive(Deserialize)]
pub struct CreateReportRequest {
    code: Option<String>,
    project_code: Option<String>,
    /// Month selector, YYYY-MM
    report_period: Option<String>,
    /// Observation date, YYYY-MM-DD
    report_date: Option<String>,
    ship_id: Option<i32>,
    ship_name: Option<String>,
    #[serde(default)]
    sensors: BTreeMap<String, bool>,
}

pub async fn create(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateReportRequest>,
) -> ApiResult<Json<ReportView>> {
    let mut ship_name = req.ship_name.unwrap_or_default();
    let mut ship_code = String::new();
    if let Some(id) = req.ship_id {
        match state.ships.find_by_id(id).await? {
            Some(ship) => {
                ship_name = ship.name;
                ship_code = ship.code;
            }
            None => return Err(DomainError::NotFound(format!("ship {id}")).into()),
        }
    }

    // Derive the composite code when not given explicitly
    let mut code = req.code.unwrap_or_default();
    if code.is_empty() {
        if let (Some(project), Some(period)) = (&req.project_code, &req.report_period) {
            let month = PeriodCode::parse_month(period)?;
            code = PeriodCode::compose(project, &ship_code, month);
        }
    }

    if code.is_empty() {
        return Err(DomainError::MissingField("code".into()).into());
    }
    if ship_name.trim().is_empty() {
        return Err(DomainError::MissingField("ship_name".into()).into());
    }
    let report_date = req
        .report_date
        .ok_or_else(|| DomainError::MissingField("report_date".into()))?;
    let report_date = NaiveDate::parse_from_str(&report_date, "%Y-%m-%d")
        .map_err(|_| DomainError::InvalidValue("Invalid date format".into()))?;

    let report = state
        .reports
        .insert(&NewReport {
            code,
            report_date,
            ship_name,
            sensors: req.sensors,
        })
        .await?;

    tracing::info!(id = report.id, code = %report.code, "Report created");
    Ok(Json(report.into()))
}

#[derive(Deserialize)]
pub struct BatchShipInput {
    ship_id: i32,
    #[serde(default = "default_true")]
    selected: bool,
    #[serde(default)]
    sensors: BTreeMap<String, bool>,
}

fn default_true() -> bool {
    true
}

#[derive(Deserialize)]
pub struct BatchRequest {
    project_code: Option<String>,
    /// Month selector, YYYY-MM
    report_period: Option<String>,
    ships: Vec<BatchShipInput>,
}

pub async fn create_batch(
    State(state): State<Arc<AppState>>,
    Json(req): Json<BatchRequest>,
) -> ApiResult<Json<Value>> {
    let period = req
        .report_period
        .filter(|p| !p.is_empty())
        .ok_or_else(|| DomainError::MissingField("report_period".into()))?;
    let month = PeriodCode::parse_month(&period)?;
    let project = req.project_code.unwrap_or_default();

    let fleet = state.ships.find_all().await?;

    let mut batch = Vec::new();
    for entry in req.ships.iter().filter(|s| s.selected) {
        let ship = fleet
            .iter()
            .find(|s| s.id == entry.ship_id)
            .ok_or_else(|| DomainError::NotFound(format!("ship {}", entry.ship_id)))?;

        batch.push(NewReport {
            code: PeriodCode::compose(&project, &ship.code, month),
            report_date: month,
            ship_name: ship.name.clone(),
            sensors: entry.sensors.clone(),
        });
    }

    let created = state.reports.insert_batch(&batch).await?;
    tracing::info!(created, period = %period, "Batch submitted");
    Ok(Json(json!({ "created": created })))
}

#[derive(Deserialize)]
pub struct UpdateSensorRequest {
    field: String,
    value: bool,
}

pub async fn update_sensor(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(req): Json<UpdateSensorRequest>,
) -> ApiResult<Json<Value>> {
    // The field must exist in the sensor catalog; legacy mirrors are
    // updated through the same path
    let known = state
        .sensors
        .find_all()
        .await?
        .iter()
        .any(|s| s.code.as_str() == req.field);
    if !known {
        return Err(ApiError::BadRequest(format!("invalid field '{}'", req.field)));
    }

    state.reports.set_sensor_status(id, &req.field, req.value).await?;
    Ok(Json(json!({ "updated": true })))
}

pub async fn remove(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> ApiResult<Json<Value>> {
    state.reports.delete(id).await?;
    Ok(Json(json!({ "deleted": true })))
}

#[derive(Deserialize)]
pub struct MonthlyParams {
    code: Option<String>,
    project: Option<String>,
    /// Month selector, YYYY-MM
    date: Option<String>,
}

/// Monthly report: exact code match, or project + month wildcard when both
/// filters are given.
pub async fn monthly(
    State(state): State<Arc<AppState>>,
    Query(params): Query<MonthlyParams>,
) -> ApiResult<Json<Value>> {
    let current_project = params.project.clone();

    let pattern = match (&params.project, &params.date) {
        (Some(project), Some(date)) if !project.is_empty() && !date.is_empty() => {
            PeriodCode::wildcard(project, PeriodCode::parse_month(date)?)
        }
        _ => params
            .code
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| PeriodCode::default_wildcard_for(Utc::now().date_naive())),
    };

    let reports = state.reports.find_matching(&pattern).await?;
    let codes = state.reports.list_codes().await?;
    let sensors = state.sensors.find_active().await?;
    let projects: Vec<String> = state
        .projects
        .find_active()
        .await?
        .into_iter()
        .map(|p| p.code)
        .collect();

    Ok(Json(json!({
        "code": pattern,
        "reports": reports.into_iter().map(ReportView::from).collect::<Vec<_>>(),
        "codes": codes,
        "sensors": sensors,
        "projects": projects,
        "current_project": current_project,
    })))
}

/// Data backing the batch input matrix: sensor columns, every ship with its
/// per-sensor participation flags, active projects and the current period.
pub async fn batch_matrix(State(state): State<Arc<AppState>>) -> ApiResult<Json<Value>> {
    let columns = state.sensors.find_active().await?;
    let fleet = state.ships.find_all().await?;
    let mut overrides = state.ships.all_overrides().await?;
    let projects = state.projects.find_active().await?;

    let ships: Vec<Value> = fleet
        .into_iter()
        .map(|ship| {
            let ship_overrides = overrides.remove(&ship.id).unwrap_or_default();
            // Columns are globally active, so the default is allowed
            let config: BTreeMap<String, bool> = columns
                .iter()
                .map(|c| {
                    let allowed = ship_overrides
                        .get(c.code.as_str())
                        .copied()
                        .unwrap_or(true);
                    (c.code.as_str().to_string(), allowed)
                })
                .collect();
            json!({
                "id": ship.id,
                "name": ship.name,
                "code": ship.code,
                "config": config,
            })
        })
        .collect();

    Ok(Json(json!({
        "columns": columns,
        "ships": ships,
        "projects": projects,
        "current_period": Utc::now().format("%Y-%m").to_string(),
    })))
}
