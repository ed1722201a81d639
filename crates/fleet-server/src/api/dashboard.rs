use super::ReportView;
use crate::error::ApiResult;
use crate::state::AppState;
use axum::Json;
use axum::extract::{Path, Query, State};
use chrono::Utc;
use domain::report::{AggregationMode, PeriodCode, PeriodSummary, ReportRepository};
use domain::sensor::SensorRepository;
use domain::DomainError;
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;

/// How many latest reports / chart periods the dashboard shows.
const DASHBOARD_LIMIT: i64 = 10;

async fn summarize(state: &AppState, code: &str) -> ApiResult<PeriodSummary> {
    let reports = state.reports.find_all_by_code(code).await?;
    Ok(PeriodSummary::aggregate(code, &reports, AggregationMode::PerReport))
}

/// Full dashboard payload: per-period summaries, the latest reports and
/// the ships currently in trouble.
pub async fn dashboard(State(state): State<Arc<AppState>>) -> ApiResult<Json<Value>> {
    let codes = state.reports.list_codes().await?;

    let mut summaries = Vec::with_capacity(codes.len());
    for code in &codes {
        summaries.push(summarize(&state, code).await?);
    }

    let latest: Vec<ReportView> = state
        .reports
        .find_latest(DASHBOARD_LIMIT)
        .await?
        .into_iter()
        .map(ReportView::from)
        .collect();

    let trouble: Vec<ReportView> = state
        .reports
        .find_latest_per_ship()
        .await?
        .into_iter()
        .filter(|r| r.in_trouble())
        .map(ReportView::from)
        .collect();

    let sensors = state.sensors.find_active().await?;

    Ok(Json(json!({
        "summaries": summaries,
        "codes": codes,
        "latest_reports": latest,
        "trouble_reports": trouble,
        "sensors": sensors,
        "logo": state.logo.current().await,
    })))
}

/// Chart series for the newest periods.
pub async fn dashboard_data(State(state): State<Arc<AppState>>) -> ApiResult<Json<Value>> {
    let codes = state.reports.list_codes().await?;

    let mut labels = Vec::new();
    let mut online_percentages = Vec::new();
    let mut offline_percentages = Vec::new();
    let mut total_online = Vec::new();
    let mut total_offline = Vec::new();

    for code in codes.into_iter().take(DASHBOARD_LIMIT as usize) {
        let summary = summarize(&state, &code).await?;
        labels.push(summary.code);
        online_percentages.push(summary.online_percentage);
        offline_percentages.push(summary.offline_percentage);
        total_online.push(summary.total_online);
        total_offline.push(summary.total_offline);
    }

    Ok(Json(json!({
        "labels": labels,
        "onlinePercentages": online_percentages,
        "offlinePercentages": offline_percentages,
        "totalOnline": total_online,
        "totalOffline": total_offline,
    })))
}

#[derive(Deserialize)]
pub struct RekapParams {
    code: Option<String>,
}

/// Summary for a single reporting period.
pub async fn rekap(
    State(state): State<Arc<AppState>>,
    Query(params): Query<RekapParams>,
) -> ApiResult<Json<PeriodSummary>> {
    let code = params
        .code
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| PeriodCode::default_for(Utc::now().date_naive()));

    Ok(Json(summarize(&state, &code).await?))
}

/// Number of ships whose most recent report has any sensor offline.
pub async fn notification_count(State(state): State<Arc<AppState>>) -> ApiResult<Json<Value>> {
    let count = state
        .reports
        .find_latest_per_ship()
        .await?
        .iter()
        .filter(|r| r.in_trouble())
        .count();

    Ok(Json(json!({ "count": count })))
}

#[derive(Deserialize)]
pub struct ResolveParams {
    sensor: Option<String>,
}

/// Force one sensor of a report back to online, clearing its alert. The
/// canonical map and the legacy mirror are written in the same statement.
pub async fn resolve_alert(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Query(params): Query<ResolveParams>,
) -> ApiResult<Json<Value>> {
    let sensor = params
        .sensor
        .filter(|s| !s.is_empty())
        .ok_or_else(|| DomainError::MissingField("sensor".into()))?;

    state.reports.set_sensor_status(id, &sensor, true).await?;
    tracing::info!(report = id, sensor = %sensor, "Alert resolved");
    Ok(Json(json!({ "success": true })))
}
