//! Persistent collection: one JSONB document per record in a PostgreSQL table.
//!
//! Table layout per kind: `seq BIGSERIAL` (storage key, gives insertion
//! order), `id TEXT` (application id, indexed) and `doc JSONB` (the record).

use std::marker::PhantomData;

use serde_json::Value;
use sqlx_core::query::query;
use sqlx_core::row::Row;
use sqlx_core::types::Json;
use sqlx_postgres::{PgPool, PgRow, Postgres};

use super::Record;
use crate::error::StoreError;

pub struct PgCollection<T> {
  pool: PgPool,
  _record: PhantomData<fn() -> T>,
}

impl<T: Record> PgCollection<T> {
  pub fn new(pool: PgPool) -> Self {
    Self {
      pool,
      _record: PhantomData,
    }
  }

  /// Create the table and id index if missing.
  pub async fn ensure_table(&self) -> Result<(), StoreError> {
    let table = T::COLLECTION;
    let create = format!(
      "CREATE TABLE IF NOT EXISTS {table} (seq BIGSERIAL PRIMARY KEY, id TEXT NOT NULL, doc JSONB NOT NULL)"
    );
    query::<Postgres>(&create).execute(&self.pool).await?;

    let index = format!("CREATE INDEX IF NOT EXISTS {table}_id_idx ON {table} (id)");
    query::<Postgres>(&index).execute(&self.pool).await?;

    tracing::debug!(table, "collection table ready");
    Ok(())
  }

  pub async fn list(&self) -> Result<Vec<T>, StoreError> {
    let sql = format!("SELECT doc FROM {} ORDER BY seq", T::COLLECTION);
    let rows = query::<Postgres>(&sql).fetch_all(&self.pool).await?;
    rows.iter().map(decode::<T>).collect()
  }

  pub async fn get_by_id(&self, id: &str) -> Result<Option<T>, StoreError> {
    let sql = format!(
      "SELECT doc FROM {} WHERE id = $1 ORDER BY seq LIMIT 1",
      T::COLLECTION
    );
    let row = query::<Postgres>(&sql)
      .bind(id.to_string())
      .fetch_optional(&self.pool)
      .await?;
    row.as_ref().map(decode::<T>).transpose()
  }

  pub async fn insert(&self, record: T) -> Result<T, StoreError> {
    let doc = serde_json::to_value(&record)?;
    let sql = format!("INSERT INTO {} (id, doc) VALUES ($1, $2)", T::COLLECTION);
    query::<Postgres>(&sql)
      .bind(record.id().to_string())
      .bind(Json(doc))
      .execute(&self.pool)
      .await?;
    Ok(record)
  }
}

/// Map a stored document back to its record type.
fn decode<T: Record>(row: &PgRow) -> Result<T, StoreError> {
  let Json(doc): Json<Value> = row.try_get("doc")?;
  Ok(serde_json::from_value(doc)?)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::format::{format_incident, new_diagnose_incident};
  use crate::types::{DiagnoseIncident, Incident, IncidentInput, TaskInput};
  use sqlx_postgres::PgPoolOptions;

  async fn pool() -> PgPool {
    let url = std::env::var("TEST_DATABASE_URL").expect("TEST_DATABASE_URL must be set");
    PgPoolOptions::new().max_connections(2).connect(&url).await.unwrap()
  }

  #[tokio::test]
  #[ignore = "requires TEST_DATABASE_URL"]
  async fn stores_and_reads_back_documents() {
    let pool = pool().await;
    let incidents: PgCollection<Incident> = PgCollection::new(pool.clone());
    incidents.ensure_table().await.unwrap();

    let stored = incidents
      .insert(format_incident(IncidentInput {
        name: Some("Fiber cut".into()),
        ..IncidentInput::default()
      }))
      .await
      .unwrap();
    let fetched = incidents.get_by_id(&stored.id).await.unwrap();
    assert_eq!(fetched, Some(stored.clone()));
    assert!(incidents.list().await.unwrap().contains(&stored));

    let later = incidents
      .insert(format_incident(IncidentInput {
        name: Some("Power loss".into()),
        ..IncidentInput::default()
      }))
      .await
      .unwrap();
    let ids: Vec<String> = incidents.list().await.unwrap().into_iter().map(|i| i.id).collect();
    let first = ids.iter().position(|id| *id == stored.id).unwrap();
    let second = ids.iter().position(|id| *id == later.id).unwrap();
    assert!(first < second, "list must follow insertion order");

    let diagnoses: PgCollection<DiagnoseIncident> = PgCollection::new(pool);
    diagnoses.ensure_table().await.unwrap();
    let task = diagnoses.insert(new_diagnose_incident(TaskInput::default())).await.unwrap();
    assert_eq!(diagnoses.get_by_id(&task.id).await.unwrap(), Some(task));
    assert_eq!(diagnoses.get_by_id("does-not-exist").await.unwrap(), None);
  }
}
