use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::models::{ActivityType, CreateWorkout};

/// Effort level treated as the neutral baseline for calorie estimates
const NEUTRAL_EFFORT: i32 = 5;
/// Change in estimated energy cost per effort point away from neutral
const EFFORT_STEP: f64 = 0.05;

/// Where the calories of a submitted workout come from, fixed per deployment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalorieSource {
    /// Trust the value sent by the client, 0 when absent
    ClientSupplied,
    /// Estimate from distance, effort and activity, ignoring client input
    #[default]
    ServerDerived,
}

impl FromStr for CalorieSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "client_supplied" | "client" => Ok(CalorieSource::ClientSupplied),
            "server_derived" | "server" => Ok(CalorieSource::ServerDerived),
            other => Err(format!(
                "Invalid calorie source '{}'. Must be one of: client_supplied, server_derived",
                other
            )),
        }
    }
}

/// kcal per km for the given session.
///
/// Uses the session's own calories when both distance and calories are positive,
/// otherwise the activity's population default.
pub fn calorie_efficiency(distance_km: f64, calories: f64, activity: ActivityType) -> f64 {
    if distance_km > 0.0 && calories > 0.0 {
        calories / distance_km
    } else {
        activity.default_kcal_per_km()
    }
}

/// Server-side calorie estimate; effort 5 is neutral, each point shifts the cost by 5%.
pub fn estimate_calories(distance_km: f64, perceived_effort: i32, activity: ActivityType) -> f64 {
    let effort_factor = 1.0 + f64::from(perceived_effort - NEUTRAL_EFFORT) * EFFORT_STEP;
    (distance_km * activity.default_kcal_per_km() * effort_factor).round()
}

/// Calories to persist for a submitted workout
pub fn resolve_calories(source: CalorieSource, workout: &CreateWorkout) -> f64 {
    match source {
        CalorieSource::ClientSupplied => workout.calories.unwrap_or(0.0),
        CalorieSource::ServerDerived => {
            estimate_calories(workout.distance_km, workout.perceived_effort, workout.activity_type)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn workout(distance_km: f64, calories: Option<f64>, effort: i32) -> CreateWorkout {
        CreateWorkout {
            user_id: "ana".to_string(),
            distance_km,
            duration_min: 50.0,
            calories,
            perceived_effort: effort,
            weather: None,
            age: None,
            experience_level: None,
            activity_type: ActivityType::Run,
        }
    }

    #[test]
    fn test_efficiency_from_session() {
        assert_eq!(calorie_efficiency(10.0, 700.0, ActivityType::Run), 70.0);
        assert_eq!(calorie_efficiency(4.0, 260.0, ActivityType::Walk), 65.0);
    }

    #[test]
    fn test_efficiency_falls_back_to_activity_default() {
        assert_eq!(calorie_efficiency(0.0, 500.0, ActivityType::Run), 70.0);
        assert_eq!(calorie_efficiency(8.0, 0.0, ActivityType::Run), 70.0);
        assert_eq!(calorie_efficiency(0.0, 0.0, ActivityType::Walk), 50.0);
    }

    #[test]
    fn test_estimate_calories_effort_scaling() {
        assert_eq!(estimate_calories(10.0, 5, ActivityType::Run), 700.0);
        // 10 * 70 * 1.25
        assert_eq!(estimate_calories(10.0, 10, ActivityType::Run), 875.0);
        // 4 * 50 * 0.8
        assert_eq!(estimate_calories(4.0, 1, ActivityType::Walk), 160.0);
        assert_eq!(estimate_calories(0.0, 9, ActivityType::Run), 0.0);
    }

    #[test]
    fn test_resolve_calories_by_source() {
        let w = workout(10.0, Some(640.0), 7);
        assert_eq!(resolve_calories(CalorieSource::ClientSupplied, &w), 640.0);
        assert_eq!(resolve_calories(CalorieSource::ServerDerived, &w), 770.0);

        let missing = workout(10.0, None, 5);
        assert_eq!(resolve_calories(CalorieSource::ClientSupplied, &missing), 0.0);
    }

    #[test]
    fn test_calorie_source_parsing() {
        assert_eq!(
            "client_supplied".parse::<CalorieSource>().unwrap(),
            CalorieSource::ClientSupplied
        );
        assert_eq!(
            " SERVER_DERIVED ".parse::<CalorieSource>().unwrap(),
            CalorieSource::ServerDerived
        );
        assert!("guess".parse::<CalorieSource>().is_err());
    }
}
