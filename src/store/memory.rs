use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{HistoryStore, StoreError};
use crate::models::{CreateWorkout, WorkoutRecord};

/// Process-local history, kept in insertion order
#[derive(Debug, Default)]
pub struct InMemoryHistoryStore {
    records: RwLock<Vec<WorkoutRecord>>,
}

impl InMemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with existing records, oldest first
    pub fn with_records(records: Vec<WorkoutRecord>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl HistoryStore for InMemoryHistoryStore {
    async fn append(&self, workout: &CreateWorkout) -> Result<WorkoutRecord, StoreError> {
        let record = WorkoutRecord::from_new(workout, Uuid::new_v4(), Utc::now());
        self.records.write().await.push(record.clone());
        Ok(record)
    }

    async fn recent(&self, user_id: &str, limit: usize) -> Result<Vec<WorkoutRecord>, StoreError> {
        let records = self.records.read().await;
        Ok(records
            .iter()
            .rev()
            .filter(|r| r.user_id == user_id)
            .take(limit)
            .cloned()
            .collect())
    }
}
