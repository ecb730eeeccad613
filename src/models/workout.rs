use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

/// Kind of session being logged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityType {
    #[serde(alias = "walking")]
    Walk,
    #[default]
    #[serde(alias = "running")]
    Run,
}

impl ActivityType {
    /// Imperative used when rendering a next-session suggestion
    pub fn verb(&self) -> &'static str {
        match self {
            ActivityType::Walk => "Walk",
            ActivityType::Run => "Run",
        }
    }

    /// Population-default energy cost in kcal per km
    pub fn default_kcal_per_km(&self) -> f64 {
        match self {
            ActivityType::Walk => 50.0,
            ActivityType::Run => 70.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityType::Walk => "walk",
            ActivityType::Run => "run",
        }
    }
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActivityType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "walk" | "walking" => Ok(ActivityType::Walk),
            "run" | "running" => Ok(ActivityType::Run),
            other => Err(format!("Unknown activity type: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceLevel {
    Beginner,
    Advanced,
}

impl ExperienceLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExperienceLevel::Beginner => "beginner",
            ExperienceLevel::Advanced => "advanced",
        }
    }
}

impl FromStr for ExperienceLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "beginner" => Ok(ExperienceLevel::Beginner),
            "advanced" => Ok(ExperienceLevel::Advanced),
            other => Err(format!("Unknown experience level: {}", other)),
        }
    }
}

/// Inbound workout payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct CreateWorkout {
    #[validate(length(min = 1, max = 128, message = "user_id must be 1-128 characters"))]
    pub user_id: String,
    #[validate(range(min = 0.0, message = "distance_km must be non-negative"))]
    pub distance_km: f64,
    #[validate(range(min = 0.0, message = "duration_min must be non-negative"))]
    pub duration_min: f64,
    #[validate(range(min = 0.0, message = "calories must be non-negative"))]
    #[serde(default)]
    pub calories: Option<f64>,
    #[validate(range(min = 1, max = 10, message = "perceived_effort must be between 1 and 10"))]
    pub perceived_effort: i32,
    #[serde(default)]
    pub weather: Option<String>,
    #[validate(range(min = 0, max = 120, message = "age must be between 0 and 120"))]
    #[serde(default)]
    pub age: Option<i32>,
    #[serde(default)]
    pub experience_level: Option<ExperienceLevel>,
    #[serde(default)]
    pub activity_type: ActivityType,
}

/// A workout as persisted in the history store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutRecord {
    pub id: Uuid,
    pub user_id: String,
    pub activity_type: ActivityType,
    pub age: Option<i32>,
    pub experience_level: Option<ExperienceLevel>,
    pub distance_km: f64,
    pub duration_min: f64,
    pub calories: f64,
    pub perceived_effort: i32,
    pub weather: Option<String>,
    pub recorded_at: DateTime<Utc>,
}

impl WorkoutRecord {
    /// Materialise a submitted workout as a stored record
    pub fn from_new(workout: &CreateWorkout, id: Uuid, recorded_at: DateTime<Utc>) -> Self {
        Self {
            id,
            user_id: workout.user_id.clone(),
            activity_type: workout.activity_type,
            age: workout.age,
            experience_level: workout.experience_level,
            distance_km: workout.distance_km,
            duration_min: workout.duration_min,
            calories: workout.calories.unwrap_or(0.0),
            perceived_effort: workout.perceived_effort,
            weather: workout.weather.clone(),
            recorded_at,
        }
    }

    pub fn is_beginner(&self) -> bool {
        self.experience_level == Some(ExperienceLevel::Beginner)
    }
}
