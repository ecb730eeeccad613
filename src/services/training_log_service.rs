use std::sync::Arc;
use tracing::{info, instrument, warn};
use validator::Validate;

use crate::config::app::DEFAULT_HISTORY_LIMIT;
use crate::errors::TrainingLogError;
use crate::models::{CreateWorkout, WorkoutRecord, WorkoutSubmission};
use crate::services::calorie_service::{resolve_calories, CalorieSource};
use crate::services::prescription_service::PrescriptionEngine;
use crate::store::HistoryStore;

/// Logs workouts and produces a prescription for each submission
#[derive(Clone)]
pub struct TrainingLogService {
    store: Arc<dyn HistoryStore>,
    engine: Arc<PrescriptionEngine>,
    calorie_source: CalorieSource,
    history_limit: usize,
}

impl TrainingLogService {
    pub fn new(store: Arc<dyn HistoryStore>) -> Self {
        Self {
            store,
            engine: Arc::new(PrescriptionEngine::new()),
            calorie_source: CalorieSource::default(),
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }

    pub fn with_engine(mut self, engine: PrescriptionEngine) -> Self {
        self.engine = Arc::new(engine);
        self
    }

    pub fn with_calorie_source(mut self, calorie_source: CalorieSource) -> Self {
        self.calorie_source = calorie_source;
        self
    }

    pub fn with_history_limit(mut self, history_limit: usize) -> Self {
        self.history_limit = history_limit;
        self
    }

    pub fn history_limit(&self) -> usize {
        self.history_limit
    }

    /// Persist a workout, then assess it against the user's prior sessions.
    ///
    /// The append happens before the read-back; a failure of either aborts the submission.
    #[instrument(skip(self, workout), fields(user_id = %workout.user_id))]
    pub async fn submit(
        &self,
        mut workout: CreateWorkout,
    ) -> Result<WorkoutSubmission, TrainingLogError> {
        // Blank ids collapse to "" here and fail the length check
        workout.user_id = normalize_user_id(&workout.user_id);
        workout.validate()?;

        workout.calories = Some(resolve_calories(self.calorie_source, &workout));

        let record = self.store.append(&workout).await.map_err(|e| {
            warn!("Failed to append workout: {}", e);
            e
        })?;

        // One extra row so the just-appended record can be dropped without shrinking the window
        let history: Vec<WorkoutRecord> = self
            .store
            .recent(&record.user_id, self.history_limit.saturating_add(1))
            .await?
            .into_iter()
            .filter(|r| r.id != record.id)
            .take(self.history_limit)
            .collect();

        let analysis = self.engine.prescribe(&record, &history);
        info!(
            status = analysis.status.as_str(),
            ratio = ?analysis.ratio,
            history_len = history.len(),
            "Workout analysed"
        );

        Ok(WorkoutSubmission {
            message: "Workout saved".to_string(),
            analysis,
        })
    }

    /// Stored workouts of a user, most recent first
    pub async fn history(
        &self,
        user_id: &str,
        limit: usize,
    ) -> Result<Vec<WorkoutRecord>, TrainingLogError> {
        let records = self.store.recent(&normalize_user_id(user_id), limit).await?;
        Ok(records)
    }
}

/// User ids are case-insensitive
pub fn normalize_user_id(user_id: &str) -> String {
    user_id.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ActivityType, ExperienceLevel, Prescription, RiskStatus};
    use crate::services::prescription_service::RiskStrategy;
    use crate::store::InMemoryHistoryStore;
    use assert_matches::assert_matches;
    use chrono::Utc;
    use uuid::Uuid;

    fn workout(user_id: &str, distance_km: f64) -> CreateWorkout {
        CreateWorkout {
            user_id: user_id.to_string(),
            distance_km,
            duration_min: distance_km * 6.0,
            calories: Some(distance_km * 65.0),
            perceived_effort: 5,
            weather: Some("cloudy".to_string()),
            age: Some(34),
            experience_level: None,
            activity_type: ActivityType::Run,
        }
    }

    #[test]
    fn test_normalize_user_id() {
        assert_eq!(normalize_user_id("  Ana.Silva "), "ana.silva");
    }

    #[tokio::test]
    async fn test_first_submission_is_ideal_and_excludes_itself() {
        let store = Arc::new(InMemoryHistoryStore::new());
        let service = TrainingLogService::new(store.clone());

        let result = service.submit(workout("Ana", 10.0)).await.unwrap();

        assert_eq!(result.message, "Workout saved");
        assert_eq!(result.analysis.status, RiskStatus::Ideal);
        assert_eq!(result.analysis.ratio, Some(1.0));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_user_ids_are_case_insensitive() {
        let store = Arc::new(InMemoryHistoryStore::new());
        let service = TrainingLogService::new(store.clone());

        service.submit(workout("ANA", 5.0)).await.unwrap();
        service.submit(workout("ana", 5.0)).await.unwrap();

        let history = service.history("Ana", 28).await.unwrap();
        assert_eq!(history.len(), 2);
        assert!(history.iter().all(|r| r.user_id == "ana"));
    }

    #[tokio::test]
    async fn test_server_derived_calories_override_client() {
        let store = Arc::new(InMemoryHistoryStore::new());
        let service = TrainingLogService::new(store.clone())
            .with_calorie_source(CalorieSource::ServerDerived);

        let mut w = workout("ana", 10.0);
        w.perceived_effort = 7;
        service.submit(w).await.unwrap();

        let stored = store.recent("ana", 1).await.unwrap();
        assert_eq!(stored[0].calories, 770.0);
    }

    #[tokio::test]
    async fn test_client_supplied_calories_are_kept() {
        let store = Arc::new(InMemoryHistoryStore::new());
        let service = TrainingLogService::new(store.clone())
            .with_calorie_source(CalorieSource::ClientSupplied);

        let result = service.submit(workout("ana", 10.0)).await.unwrap();

        let stored = store.recent("ana", 1).await.unwrap();
        assert_eq!(stored[0].calories, 650.0);
        // 11 km at 65 kcal/km
        assert_eq!(result.analysis.projected_calories, 715);
    }

    #[tokio::test]
    async fn test_history_window_is_bounded() {
        let store = Arc::new(InMemoryHistoryStore::new());
        let service = TrainingLogService::new(store.clone()).with_history_limit(5);

        for _ in 0..5 {
            service.submit(workout("ana", 2.0)).await.unwrap();
        }
        // 5 prior sessions of 2 km: acute = 2 + 10 = 12, chronic = 12 / 4 = 3
        let result = service.submit(workout("ana", 2.0)).await.unwrap();
        assert_eq!(result.analysis.ratio, Some(4.0));
        assert_eq!(result.analysis.status, RiskStatus::HighRisk);
    }

    #[tokio::test]
    async fn test_spike_against_seeded_history() {
        let prior: Vec<WorkoutRecord> = (0..10)
            .map(|_| WorkoutRecord::from_new(&workout("ana", 2.0), Uuid::new_v4(), Utc::now()))
            .collect();
        let store = Arc::new(InMemoryHistoryStore::with_records(prior));
        let service = TrainingLogService::new(store);

        // acute = 20 + 12 = 32, chronic = 40 / 4 = 10
        let result = service.submit(workout("ana", 20.0)).await.unwrap();
        assert_eq!(result.analysis.ratio, Some(3.2));
        assert_eq!(result.analysis.status, RiskStatus::HighRisk);
    }

    #[tokio::test]
    async fn test_beginner_bootstrap_then_regular_classification() {
        let store = Arc::new(InMemoryHistoryStore::new());
        let service = TrainingLogService::new(store);

        let mut first = workout("bia", 1.5);
        first.experience_level = Some(ExperienceLevel::Beginner);
        let result = service.submit(first.clone()).await.unwrap();
        assert_eq!(result.analysis.status, RiskStatus::Start);

        let result = service.submit(first).await.unwrap();
        assert_ne!(result.analysis.status, RiskStatus::Start);
    }

    #[tokio::test]
    async fn test_invalid_workout_is_not_stored() {
        let store = Arc::new(InMemoryHistoryStore::new());
        let service = TrainingLogService::new(store.clone());

        let mut w = workout("ana", 5.0);
        w.perceived_effort = 0;

        assert_matches!(service.submit(w).await, Err(TrainingLogError::Validation(_)));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_blank_user_id_is_rejected() {
        let store = Arc::new(InMemoryHistoryStore::new());
        let service = TrainingLogService::new(store.clone());

        let result = service.submit(workout("   ", 5.0)).await;

        assert_matches!(result, Err(TrainingLogError::Validation(ref m)) if m.contains("user_id"));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_unbounded_history_limit_does_not_overflow() {
        let store = Arc::new(InMemoryHistoryStore::new());
        let service = TrainingLogService::new(store).with_history_limit(usize::MAX);

        service.submit(workout("ana", 5.0)).await.unwrap();
        let result = service.submit(workout("ana", 5.0)).await.unwrap();

        assert_eq!(result.analysis.ratio, Some(1.0));
    }

    struct FixedDistance;

    impl RiskStrategy for FixedDistance {
        fn name(&self) -> &'static str {
            "fixed-distance"
        }

        fn assess(&self, _current: &WorkoutRecord, history: &[WorkoutRecord]) -> Prescription {
            Prescription {
                status: RiskStatus::Ideal,
                message: format!("{} prior sessions", history.len()),
                action: "Keep going".to_string(),
                next_workout: "Run 5.0 km".to_string(),
                ratio: None,
                next_distance_km: 5.0,
                projected_calories: 350,
            }
        }
    }

    #[tokio::test]
    async fn test_custom_engine_receives_prior_sessions_only() {
        let store = Arc::new(InMemoryHistoryStore::new());
        let service = TrainingLogService::new(store)
            .with_engine(PrescriptionEngine::with_strategy(Box::new(FixedDistance)));

        service.submit(workout("ana", 4.0)).await.unwrap();
        service.submit(workout("ana", 4.0)).await.unwrap();
        let result = service.submit(workout("ana", 4.0)).await.unwrap();

        assert_eq!(result.analysis.message, "2 prior sessions");
        assert_eq!(result.analysis.ratio, None);
    }
}
