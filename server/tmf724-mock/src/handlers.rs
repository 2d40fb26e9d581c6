//! HTTP handlers for the TMF724 resources.

use axum::{
  body::Bytes,
  extract::{Path, State},
  http::{header, HeaderMap, StatusCode},
  Json,
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::debug;

use crate::error::{ApiError, INCIDENT_NOT_FOUND, NOT_FOUND};
use crate::format;
use crate::state::AppState;
use crate::types::{DiagnoseIncident, Incident, IncidentInput, ResolveIncident, TaskInput};

type Created<T> = (StatusCode, Json<T>);

pub async fn health() -> &'static str {
  "ok"
}

pub async fn list_incidents(
  State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Incident>>, ApiError> {
  Ok(Json(state.incidents.list().await?))
}

pub async fn get_incident(
  State(state): State<Arc<AppState>>,
  Path(id): Path<String>,
) -> Result<Json<Incident>, ApiError> {
  state
    .incidents
    .get_by_id(&id)
    .await
    .map(Json)
    .map_err(|e| ApiError::from_store(e, INCIDENT_NOT_FOUND))
}

pub async fn create_incident(
  State(state): State<Arc<AppState>>,
  headers: HeaderMap,
  body: Bytes,
) -> Result<Created<Incident>, ApiError> {
  let input: IncidentInput = parse_body(&headers, &body)?;
  let incident = state.incidents.insert(format::format_incident(input)).await?;
  debug!(id = %incident.id, "incident created");
  Ok((StatusCode::CREATED, Json(incident)))
}

pub async fn list_diagnose_incidents(
  State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<DiagnoseIncident>>, ApiError> {
  Ok(Json(state.diagnoses.list().await?))
}

pub async fn get_diagnose_incident(
  State(state): State<Arc<AppState>>,
  Path(id): Path<String>,
) -> Result<Json<DiagnoseIncident>, ApiError> {
  state
    .diagnoses
    .get_by_id(&id)
    .await
    .map(Json)
    .map_err(|e| ApiError::from_store(e, NOT_FOUND))
}

pub async fn create_diagnose_incident(
  State(state): State<Arc<AppState>>,
  headers: HeaderMap,
  body: Bytes,
) -> Result<Created<DiagnoseIncident>, ApiError> {
  let input: TaskInput = parse_body(&headers, &body)?;
  let task = state
    .diagnoses
    .insert(format::new_diagnose_incident(input))
    .await?;
  debug!(id = %task.id, "diagnoseIncident created");
  Ok((StatusCode::CREATED, Json(task)))
}

pub async fn list_resolve_incidents(
  State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ResolveIncident>>, ApiError> {
  Ok(Json(state.resolutions.list().await?))
}

pub async fn get_resolve_incident(
  State(state): State<Arc<AppState>>,
  Path(id): Path<String>,
) -> Result<Json<ResolveIncident>, ApiError> {
  state
    .resolutions
    .get_by_id(&id)
    .await
    .map(Json)
    .map_err(|e| ApiError::from_store(e, NOT_FOUND))
}

pub async fn create_resolve_incident(
  State(state): State<Arc<AppState>>,
  headers: HeaderMap,
  body: Bytes,
) -> Result<Created<ResolveIncident>, ApiError> {
  let input: TaskInput = parse_body(&headers, &body)?;
  let task = state
    .resolutions
    .insert(format::new_resolve_incident(input))
    .await?;
  debug!(id = %task.id, "resolveIncident created");
  Ok((StatusCode::CREATED, Json(task)))
}

/// Only `application/json` bodies are read. An empty body, another content
/// type, or a JSON value that is not an object all read as `{}`.
fn parse_body<T: DeserializeOwned + Default>(headers: &HeaderMap, body: &[u8]) -> Result<T, ApiError> {
  if !is_json(headers) || body.iter().all(u8::is_ascii_whitespace) {
    return Ok(T::default());
  }
  let value: Value =
    serde_json::from_slice(body).map_err(|e| ApiError::BadRequest(e.to_string()))?;
  let object = match value {
    Value::Object(map) => map,
    _ => Map::new(),
  };
  serde_json::from_value(Value::Object(object)).map_err(|e| ApiError::BadRequest(e.to_string()))
}

fn is_json(headers: &HeaderMap) -> bool {
  headers
    .get(header::CONTENT_TYPE)
    .and_then(|v| v.to_str().ok())
    .and_then(|v| v.split(';').next())
    .map_or(false, |mime| mime.trim().eq_ignore_ascii_case("application/json"))
}
