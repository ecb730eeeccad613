use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use axum_extra::extract::WithRejection;
use serde::{Deserialize, Serialize};

use crate::errors::TrainingLogError;
use crate::models::{CreateWorkout, WorkoutRecord, WorkoutSubmission};
use crate::services::training_log_service::normalize_user_id;
use crate::services::TrainingLogService;

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    /// Maximum number of workouts to return (default: history window, max: 100)
    pub limit: Option<i64>,
}

impl HistoryQuery {
    pub fn validate(&self) -> Result<(), &'static str> {
        if let Some(limit) = self.limit {
            if !(1..=100).contains(&limit) {
                return Err("Limit must be between 1 and 100");
            }
        }
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WorkoutHistoryResponse {
    pub user_id: String,
    pub workouts: Vec<WorkoutRecord>,
}

/// Shared state for workout routes
#[derive(Clone)]
pub struct WorkoutAppState {
    pub training_log: TrainingLogService,
}

pub fn workout_routes(training_log: TrainingLogService) -> Router {
    let shared_state = WorkoutAppState { training_log };

    Router::new()
        .route("/", post(submit_workout))
        .route("/:user_id", get(list_workouts))
        .with_state(shared_state)
}

/// Log a workout and return its prescription
async fn submit_workout(
    State(state): State<WorkoutAppState>,
    WithRejection(Json(workout), _): WithRejection<Json<CreateWorkout>, TrainingLogError>,
) -> Result<Json<WorkoutSubmission>, TrainingLogError> {
    let submission = state.training_log.submit(workout).await?;
    Ok(Json(submission))
}

/// Stored workouts of a user, most recent first
async fn list_workouts(
    State(state): State<WorkoutAppState>,
    Path(user_id): Path<String>,
    WithRejection(Query(query), _): WithRejection<Query<HistoryQuery>, TrainingLogError>,
) -> Result<Json<WorkoutHistoryResponse>, TrainingLogError> {
    query.validate().map_err(|message| TrainingLogError::InvalidBody {
        status: StatusCode::BAD_REQUEST,
        message: message.to_string(),
    })?;

    let limit = query
        .limit
        .and_then(|l| usize::try_from(l).ok())
        .unwrap_or_else(|| state.training_log.history_limit());
    let workouts = state.training_log.history(&user_id, limit).await?;

    Ok(Json(WorkoutHistoryResponse {
        user_id: normalize_user_id(&user_id),
        workouts,
    }))
}
