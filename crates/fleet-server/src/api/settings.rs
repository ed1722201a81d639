use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use axum::Json;
use axum::extract::{Multipart, Path, Query, State};
use domain::DomainError;
use domain::project::{Project, ProjectRepository};
use domain::sensor::{EffectiveSensor, Sensor, SensorRepository, effective_sensors};
use domain::ship::{Ship, ShipRepository};
use serde::Deserialize;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Arc;

pub async fn list_sensors(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Sensor>>> {
    Ok(Json(state.sensors.find_all().await?))
}

#[derive(Deserialize)]
pub struct CreateSensorRequest {
    name: String,
}

pub async fn create_sensor(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateSensorRequest>,
) -> ApiResult<Json<Sensor>> {
    let sensor = state.sensors.create(&req.name).await?;
    tracing::info!(code = %sensor.code, "Sensor created");
    Ok(Json(sensor))
}

pub async fn toggle_sensor(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> ApiResult<Json<Value>> {
    state.sensors.toggle(id).await?;
    Ok(Json(json!({ "toggled": true })))
}

pub async fn list_projects(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Project>>> {
    Ok(Json(state.projects.find_all().await?))
}

#[derive(Deserialize)]
pub struct CreateProjectRequest {
    code: String,
    name: String,
}

pub async fn create_project(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateProjectRequest>,
) -> ApiResult<Json<Project>> {
    let project = state.projects.create(&req.code, &req.name).await?;
    tracing::info!(code = %project.code, "Project created");
    Ok(Json(project))
}

pub async fn list_ships(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Ship>>> {
    Ok(Json(state.ships.find_all().await?))
}

#[derive(Deserialize)]
pub struct CreateShipRequest {
    name: String,
    #[serde(default)]
    code: String,
}

pub async fn create_ship(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateShipRequest>,
) -> ApiResult<Json<Ship>> {
    let ship = state.ships.create(&req.name, &req.code).await?;
    tracing::info!(name = %ship.name, "Ship created");
    Ok(Json(ship))
}

/// Per-ship sensor configuration: the globally active catalog with the
/// ship's effective status and override markers.
pub async fn ship_config(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> ApiResult<Json<Value>> {
    let ship = state
        .ships
        .find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::NotFound(format!("ship {id}")))?;

    let globals = state.sensors.find_active().await?;
    let overrides = state.ships.overrides_for(id).await?;

    let sensors: Vec<Value> = globals
        .iter()
        .map(|s| {
            let override_entry = overrides.get(s.code.as_str()).copied();
            json!({
                "code": s.code,
                "name": s.name,
                "global_active": s.active,
                "ship_active": override_entry.unwrap_or(s.active),
                "is_override": override_entry.is_some(),
            })
        })
        .collect();

    Ok(Json(json!({ "ship": ship, "sensors": sensors })))
}

#[derive(Deserialize)]
pub struct ToggleOverrideRequest {
    sensor_code: String,
}

pub async fn toggle_ship_sensor(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(req): Json<ToggleOverrideRequest>,
) -> ApiResult<Json<Value>> {
    state.ships.toggle_override(id, &req.sensor_code).await?;
    tracing::info!(ship = id, sensor = %req.sensor_code, "Ship sensor override toggled");
    Ok(Json(json!({ "toggled": true })))
}

#[derive(Deserialize)]
pub struct FormSensorsParams {
    ship_id: Option<i32>,
}

/// The sensors to present as input fields. With a ship selected this is the
/// effective merge of catalog and overrides; otherwise the global active set.
pub async fn form_sensors(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FormSensorsParams>,
) -> ApiResult<Json<Vec<EffectiveSensor>>> {
    let sensors = match params.ship_id {
        Some(ship_id) => {
            // The full catalog: an override may enable a globally
            // inactive sensor
            let globals = state.sensors.find_all().await?;
            let overrides = state.ships.overrides_for(ship_id).await?;
            effective_sensors(&globals, &overrides)
        }
        None => {
            let globals = state.sensors.find_active().await?;
            effective_sensors(&globals, &HashMap::new())
        }
    };

    Ok(Json(sensors))
}

pub async fn get_logo(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({ "logo": state.logo.current().await }))
}

/// Upload a company logo (.png/.jpg/.jpeg), persist it under the static
/// dir and record its path in app config.
pub async fn upload_logo(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> ApiResult<Json<Value>> {
    let mut uploaded: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some("logo") {
            continue;
        }
        let filename = field
            .file_name()
            .map(str::to_string)
            .ok_or_else(|| ApiError::BadRequest("No file uploaded".into()))?;
        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(format!("Failed to read upload: {e}")))?;
        uploaded = Some((filename, data.to_vec()));
        break;
    }

    let (filename, data) =
        uploaded.ok_or_else(|| ApiError::BadRequest("No file uploaded".into()))?;

    let ext = std::path::Path::new(&filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();
    if !matches!(ext.as_str(), "png" | "jpg" | "jpeg") {
        return Err(ApiError::BadRequest("Only PNG or JPG allowed".into()));
    }

    let images_dir = state.static_dir.join("images");
    tokio::fs::create_dir_all(&images_dir)
        .await
        .map_err(|e| ApiError::Internal(format!("Failed to create images dir: {e}")))?;

    // Fixed name to avoid a pileup of stale uploads
    let target = images_dir.join(format!("company_logo.{ext}"));
    tokio::fs::write(&target, &data)
        .await
        .map_err(|e| ApiError::Internal(format!("Failed to save file: {e}")))?;

    let public_path = format!("/static/images/company_logo.{ext}");
    state.logo.update(&public_path).await?;
    tracing::info!(path = %public_path, "Logo updated");

    Ok(Json(json!({ "success": true, "logo": public_path })))
}
