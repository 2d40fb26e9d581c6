//! Structured error types for the store, the HTTP layer and configuration.

use axum::{
  http::StatusCode,
  response::{IntoResponse, Response},
  Json,
};
use thiserror::Error;

use crate::types::ErrorBody;

pub const INCIDENT_NOT_FOUND: &str = "Incident not found";
pub const NOT_FOUND: &str = "Not found";

#[derive(Debug, Error)]
pub enum StoreError {
  #[error("not found: {collection}/{id}")]
  NotFound { collection: &'static str, id: String },

  #[error("database: {0}")]
  Database(#[from] sqlx_core::Error),

  #[error("document: {0}")]
  Document(#[from] serde_json::Error),
}

impl StoreError {
  pub fn not_found(collection: &'static str, id: &str) -> Self {
    Self::NotFound {
      collection,
      id: id.to_string(),
    }
  }
}

/// Errors surfaced to HTTP callers as `{"error": "..."}`.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("{0}")]
  NotFound(&'static str),

  #[error("invalid JSON body: {0}")]
  BadRequest(String),

  #[error("internal error")]
  Store(StoreError),
}

impl ApiError {
  /// Map a store error, using `message` when the record is missing.
  pub fn from_store(err: StoreError, message: &'static str) -> Self {
    match err {
      StoreError::NotFound { .. } => Self::NotFound(message),
      other => Self::Store(other),
    }
  }

  pub fn status(&self) -> StatusCode {
    match self {
      Self::NotFound(_) => StatusCode::NOT_FOUND,
      Self::BadRequest(_) => StatusCode::BAD_REQUEST,
      Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }
}

impl From<StoreError> for ApiError {
  fn from(err: StoreError) -> Self {
    Self::from_store(err, NOT_FOUND)
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    if let Self::Store(e) = &self {
      tracing::error!(error = %e, "store failure");
    }
    (self.status(), Json(ErrorBody::new(self.to_string()))).into_response()
  }
}

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("config: {var} must be set")]
  Missing { var: &'static str },

  #[error("config: {var}: {reason}")]
  Invalid { var: &'static str, reason: String },
}

impl ConfigError {
  pub fn missing(var: &'static str) -> Self {
    Self::Missing { var }
  }

  pub fn invalid(var: &'static str, reason: impl Into<String>) -> Self {
    Self::Invalid {
      var,
      reason: reason.into(),
    }
  }
}
