//! Shared application state: one collection per resource kind.

use sqlx_postgres::PgPool;

use crate::error::StoreError;
use crate::store::Collection;
use crate::types::{DiagnoseIncident, Incident, ResolveIncident};

pub struct AppState {
  pub incidents: Collection<Incident>,
  pub diagnoses: Collection<DiagnoseIncident>,
  pub resolutions: Collection<ResolveIncident>,
}

impl AppState {
  pub fn in_memory() -> Self {
    Self {
      incidents: Collection::memory(),
      diagnoses: Collection::memory(),
      resolutions: Collection::memory(),
    }
  }

  pub fn postgres(pool: PgPool) -> Self {
    Self {
      incidents: Collection::postgres(pool.clone()),
      diagnoses: Collection::postgres(pool.clone()),
      resolutions: Collection::postgres(pool),
    }
  }

  pub fn backend(&self) -> &'static str {
    self.incidents.backend()
  }

  /// Prepare every collection; stops at the first failure.
  pub async fn prepare(&self) -> Result<(), StoreError> {
    self.incidents.prepare().await?;
    self.diagnoses.prepare().await?;
    self.resolutions.prepare().await
  }
}
