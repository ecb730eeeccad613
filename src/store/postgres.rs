use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::{HistoryStore, StoreError};
use crate::models::{ActivityType, CreateWorkout, ExperienceLevel, WorkoutRecord};

const WORKOUT_COLUMNS: &str = "id, user_id, activity_type, age, experience_level, distance_km, \
     duration_min, calories, perceived_effort, weather, recorded_at";

/// PostgreSQL-backed history (`workouts` table, see migrations/)
#[derive(Clone)]
pub struct PgHistoryStore {
    db: PgPool,
}

#[derive(Debug, FromRow)]
struct WorkoutRow {
    id: Uuid,
    user_id: String,
    activity_type: String,
    age: Option<i32>,
    experience_level: Option<String>,
    distance_km: f64,
    duration_min: f64,
    calories: f64,
    perceived_effort: i32,
    weather: Option<String>,
    recorded_at: DateTime<Utc>,
}

impl TryFrom<WorkoutRow> for WorkoutRecord {
    type Error = StoreError;

    fn try_from(row: WorkoutRow) -> Result<Self, Self::Error> {
        let activity_type = row
            .activity_type
            .parse::<ActivityType>()
            .map_err(StoreError::Decode)?;
        let experience_level = row
            .experience_level
            .as_deref()
            .map(str::parse::<ExperienceLevel>)
            .transpose()
            .map_err(StoreError::Decode)?;

        Ok(WorkoutRecord {
            id: row.id,
            user_id: row.user_id,
            activity_type,
            age: row.age,
            experience_level,
            distance_km: row.distance_km,
            duration_min: row.duration_min,
            calories: row.calories,
            perceived_effort: row.perceived_effort,
            weather: row.weather,
            recorded_at: row.recorded_at,
        })
    }
}

impl PgHistoryStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl HistoryStore for PgHistoryStore {
    async fn append(&self, workout: &CreateWorkout) -> Result<WorkoutRecord, StoreError> {
        let query = format!(
            r#"
            INSERT INTO workouts (user_id, activity_type, age, experience_level,
                                  distance_km, duration_min, calories, perceived_effort, weather)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {}
            "#,
            WORKOUT_COLUMNS
        );

        let row = sqlx::query_as::<_, WorkoutRow>(&query)
            .bind(&workout.user_id)
            .bind(workout.activity_type.as_str())
            .bind(workout.age)
            .bind(workout.experience_level.map(|level| level.as_str()))
            .bind(workout.distance_km)
            .bind(workout.duration_min)
            .bind(workout.calories.unwrap_or(0.0))
            .bind(workout.perceived_effort)
            .bind(&workout.weather)
            .fetch_one(&self.db)
            .await?;

        row.try_into()
    }

    async fn recent(&self, user_id: &str, limit: usize) -> Result<Vec<WorkoutRecord>, StoreError> {
        let query = format!(
            "SELECT {} FROM workouts WHERE user_id = $1 \
             ORDER BY recorded_at DESC, seq DESC LIMIT $2",
            WORKOUT_COLUMNS
        );

        let rows = sqlx::query_as::<_, WorkoutRow>(&query)
            .bind(user_id)
            .bind(i64::try_from(limit).unwrap_or(i64::MAX))
            .fetch_all(&self.db)
            .await?;

        rows.into_iter().map(WorkoutRecord::try_from).collect()
    }
}
