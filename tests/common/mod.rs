#![allow(dead_code)]

use acwr_coach::api::routes::create_routes;
use acwr_coach::models::{ActivityType, CreateWorkout, WorkoutRecord};
use acwr_coach::services::TrainingLogService;
use acwr_coach::store::InMemoryHistoryStore;
use axum::{
    body::Body,
    http::{Method, Request},
    response::Response,
    Router,
};
use chrono::{Duration, TimeZone, Utc};
use serde_json::Value;
use std::sync::Arc;
use uuid::Uuid;

/// Router backed by a fresh in-memory store
pub fn test_app() -> (Router, Arc<InMemoryHistoryStore>) {
    let store = Arc::new(InMemoryHistoryStore::new());
    let app = create_routes(TrainingLogService::new(store.clone()));
    (app, store)
}

pub fn json_request(method: Method, uri: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json");

    match body {
        Some(body) => builder.body(Body::from(body.to_string())).unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub async fn body_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Mock data generators
pub struct MockDataGenerator;

impl MockDataGenerator {
    pub fn workout(user_id: &str, distance_km: f64) -> CreateWorkout {
        CreateWorkout {
            user_id: user_id.to_string(),
            distance_km,
            duration_min: distance_km * 6.0,
            calories: None,
            perceived_effort: 5,
            weather: Some("sunny".to_string()),
            age: Some(30),
            experience_level: None,
            activity_type: ActivityType::Run,
        }
    }

    /// A stored run `days_ago` days before a fixed reference date
    pub fn record(distance_km: f64, days_ago: i64) -> WorkoutRecord {
        let reference = Utc.with_ymd_and_hms(2024, 6, 1, 7, 0, 0).unwrap();
        WorkoutRecord::from_new(
            &Self::workout("ana", distance_km),
            Uuid::new_v4(),
            reference - Duration::days(days_ago),
        )
    }

    /// Prior sessions, most recent first
    pub fn history(distances: &[f64]) -> Vec<WorkoutRecord> {
        distances
            .iter()
            .enumerate()
            .map(|(i, &km)| Self::record(km, i as i64 + 1))
            .collect()
    }
}
