use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::health::health_check;
use super::workouts::workout_routes;
use crate::services::TrainingLogService;

pub fn create_routes(training_log: TrainingLogService) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1/workouts", workout_routes(training_log))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
