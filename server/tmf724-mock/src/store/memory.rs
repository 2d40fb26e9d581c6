//! Transient collection: a process-lifetime list behind an async lock.

use tokio::sync::RwLock;

use super::Record;

pub struct MemoryCollection<T> {
  records: RwLock<Vec<T>>,
}

impl<T: Record> MemoryCollection<T> {
  pub fn new() -> Self {
    Self {
      records: RwLock::new(Vec::new()),
    }
  }

  pub async fn list(&self) -> Vec<T> {
    self.records.read().await.clone()
  }

  /// Linear scan; with duplicate ids the earliest insert wins.
  pub async fn get_by_id(&self, id: &str) -> Option<T> {
    self.records.read().await.iter().find(|r| r.id() == id).cloned()
  }

  pub async fn insert(&self, record: T) -> T {
    self.records.write().await.push(record.clone());
    record
  }
}

impl<T: Record> Default for MemoryCollection<T> {
  fn default() -> Self {
    Self::new()
  }
}
