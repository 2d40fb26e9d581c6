//! TMF724 Incident Management mock server.
//!
//! Serves `Incident`, `DiagnoseIncident` and `ResolveIncident` resources under
//! `/tmf-api/Incident/v4`: list, get by id and create. Records live in an
//! in-process collection or as JSONB documents in PostgreSQL.

pub mod config;
pub mod error;
pub mod format;
pub mod handlers;
pub mod state;
pub mod store;
pub mod types;

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use config::{Config, StoreKind};
pub use error::{ApiError, ConfigError, StoreError};
pub use format::{format_incident, API_BASE};
pub use state::AppState;
pub use types::{DiagnoseIncident, Incident, IncidentInput, ResolveIncident, TaskInput};

/// Build the HTTP router over `state`.
pub fn router(state: Arc<AppState>) -> Router {
  let api = Router::new()
    .route("/", get(handlers::list_incidents))
    .route(
      "/incident",
      get(handlers::list_incidents).post(handlers::create_incident),
    )
    .route("/incident/:id", get(handlers::get_incident))
    .route(
      "/diagnoseIncident",
      get(handlers::list_diagnose_incidents).post(handlers::create_diagnose_incident),
    )
    .route("/diagnoseIncident/:id", get(handlers::get_diagnose_incident))
    .route(
      "/resolveIncident",
      get(handlers::list_resolve_incidents).post(handlers::create_resolve_incident),
    )
    .route("/resolveIncident/:id", get(handlers::get_resolve_incident));

  Router::new()
    .route("/health", get(handlers::health))
    .nest(API_BASE, api)
    .layer(TraceLayer::new_for_http())
    .layer(CorsLayer::permissive())
    .with_state(state)
}
