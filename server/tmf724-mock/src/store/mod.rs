//! Collection store: a set of records addressable by their `id` field.
//!
//! Two variants: a transient in-process list and a persistent JSONB
//! document table in PostgreSQL. Neither exposes update or delete.

mod memory;
mod postgres;

use serde::{de::DeserializeOwned, Serialize};
use sqlx_postgres::PgPool;

use crate::error::StoreError;
use crate::types::{DiagnoseIncident, Incident, ResolveIncident};

pub use memory::MemoryCollection;
pub use postgres::PgCollection;

/// A resource kind that can be stored in a [`Collection`].
pub trait Record: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
  /// Collection (table) name for this kind.
  const COLLECTION: &'static str;

  /// Application-level id; not the storage engine's own key.
  fn id(&self) -> &str;
}

impl Record for Incident {
  const COLLECTION: &'static str = "incident";

  fn id(&self) -> &str {
    &self.id
  }
}

impl Record for DiagnoseIncident {
  const COLLECTION: &'static str = "diagnose_incident";

  fn id(&self) -> &str {
    &self.id
  }
}

impl Record for ResolveIncident {
  const COLLECTION: &'static str = "resolve_incident";

  fn id(&self) -> &str {
    &self.id
  }
}

pub enum Collection<T> {
  Memory(MemoryCollection<T>),
  Postgres(PgCollection<T>),
}

impl<T: Record> Collection<T> {
  pub fn memory() -> Self {
    Self::Memory(MemoryCollection::new())
  }

  pub fn postgres(pool: PgPool) -> Self {
    Self::Postgres(PgCollection::new(pool))
  }

  pub fn backend(&self) -> &'static str {
    match self {
      Self::Memory(_) => "memory",
      Self::Postgres(_) => "postgres",
    }
  }

  /// Create backing storage if needed. No-op for the memory variant.
  pub async fn prepare(&self) -> Result<(), StoreError> {
    match self {
      Self::Memory(_) => Ok(()),
      Self::Postgres(c) => c.ensure_table().await,
    }
  }

  /// All records in insertion order.
  pub async fn list(&self) -> Result<Vec<T>, StoreError> {
    match self {
      Self::Memory(c) => Ok(c.list().await),
      Self::Postgres(c) => c.list().await,
    }
  }

  /// First record whose `id` matches, or `StoreError::NotFound`.
  pub async fn get_by_id(&self, id: &str) -> Result<T, StoreError> {
    let found = match self {
      Self::Memory(c) => c.get_by_id(id).await,
      Self::Postgres(c) => c.get_by_id(id).await?,
    };
    found.ok_or_else(|| StoreError::not_found(T::COLLECTION, id))
  }

  /// Store `record` and return it as stored.
  pub async fn insert(&self, record: T) -> Result<T, StoreError> {
    match self {
      Self::Memory(c) => Ok(c.insert(record).await),
      Self::Postgres(c) => c.insert(record).await,
    }
  }
}
