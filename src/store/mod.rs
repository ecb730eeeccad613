// History store collaborators: where submitted workouts are persisted

pub mod memory;
pub mod postgres;
pub mod rest;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{CreateWorkout, WorkoutRecord};

pub use memory::InMemoryHistoryStore;
pub use postgres::PgHistoryStore;
pub use rest::RestHistoryStore;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("History store returned {status}: {body}")]
    Remote { status: u16, body: String },
    #[error("History store did not return the inserted record")]
    EmptyInsertResponse,
    #[error("Invalid stored record: {0}")]
    Decode(String),
}

/// Time-ordered workout history, isolated per user.
///
/// Records are immutable once appended; callers pass an already lowercased `user_id`.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Persist a workout, returning it with its id and insert timestamp
    async fn append(&self, workout: &CreateWorkout) -> Result<WorkoutRecord, StoreError>;

    /// Up to `limit` records of `user_id`, most recent first
    async fn recent(&self, user_id: &str, limit: usize) -> Result<Vec<WorkoutRecord>, StoreError>;
}
