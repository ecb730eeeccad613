use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::Serialize;
use tracing::{debug, error};

use super::{HistoryStore, StoreError};
use crate::config::RestStoreConfig;
use crate::models::{ActivityType, CreateWorkout, ExperienceLevel, WorkoutRecord};

/// History kept in a hosted PostgREST-style tabular service.
///
/// Inserts go to `POST {base_url}/rest/v1/{table}` with `Prefer: return=representation`,
/// reads to `GET {base_url}/rest/v1/{table}` filtered on `user_id` and ordered by
/// `recorded_at` then `seq`, both descending. The hosted table is expected to carry the
/// same `seq BIGSERIAL` column as the Postgres migration so same-instant rows keep
/// insertion order. Both requests carry the service key as `apikey` and bearer token.
pub struct RestHistoryStore {
    client: Client,
    base_url: String,
    api_key: String,
    table: String,
}

#[derive(Debug, Serialize)]
struct InsertRow<'a> {
    user_id: &'a str,
    activity_type: ActivityType,
    age: Option<i32>,
    experience_level: Option<ExperienceLevel>,
    distance_km: f64,
    duration_min: f64,
    calories: f64,
    perceived_effort: i32,
    weather: Option<&'a str>,
}

impl<'a> From<&'a CreateWorkout> for InsertRow<'a> {
    fn from(workout: &'a CreateWorkout) -> Self {
        Self {
            user_id: &workout.user_id,
            activity_type: workout.activity_type,
            age: workout.age,
            experience_level: workout.experience_level,
            distance_km: workout.distance_km,
            duration_min: workout.duration_min,
            calories: workout.calories.unwrap_or(0.0),
            perceived_effort: workout.perceived_effort,
            weather: workout.weather.as_deref(),
        }
    }
}

impl RestHistoryStore {
    pub fn new(config: &RestStoreConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            table: config.table.clone(),
        })
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, self.table)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    async fn read_records(response: reqwest::Response) -> Result<Vec<WorkoutRecord>, StoreError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("History store request failed: {} - {}", status, body);
            return Err(StoreError::Remote {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| StoreError::Decode(e.to_string()))
    }
}

#[async_trait]
impl HistoryStore for RestHistoryStore {
    async fn append(&self, workout: &CreateWorkout) -> Result<WorkoutRecord, StoreError> {
        let response = self
            .authorized(self.client.post(self.table_url()))
            .header("Prefer", "return=representation")
            .json(&InsertRow::from(workout))
            .send()
            .await?;

        let inserted = Self::read_records(response).await?;
        debug!(user_id = %workout.user_id, "Inserted workout into hosted history store");

        inserted
            .into_iter()
            .next()
            .ok_or(StoreError::EmptyInsertResponse)
    }

    async fn recent(&self, user_id: &str, limit: usize) -> Result<Vec<WorkoutRecord>, StoreError> {
        let user_filter = format!("eq.{}", user_id);
        let limit = limit.to_string();

        let response = self
            .authorized(self.client.get(self.table_url()))
            .query(&[
                ("select", "*"),
                ("user_id", user_filter.as_str()),
                ("order", "recorded_at.desc,seq.desc"),
                ("limit", limit.as_str()),
            ])
            .send()
            .await?;

        Self::read_records(response).await
    }
}
