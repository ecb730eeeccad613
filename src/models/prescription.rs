use serde::{Deserialize, Serialize};

/// Risk classification produced by the prescription engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskStatus {
    /// First logged session of a declared beginner
    Start,
    /// Ratio above the recovery-adjusted threshold
    HighRisk,
    /// Ratio inside the progressive-overload band
    Ideal,
    /// Ratio under 0.8, detraining territory
    LowLoad,
}

impl RiskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskStatus::Start => "START",
            RiskStatus::HighRisk => "HIGH_RISK",
            RiskStatus::Ideal => "IDEAL",
            RiskStatus::LowLoad => "LOW_LOAD",
        }
    }
}

/// Engine output for one submitted workout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prescription {
    pub status: RiskStatus,
    /// Human-readable explanation of the classification
    pub message: String,
    /// Recommended recovery or training action
    pub action: String,
    /// Suggested next session, distance and projected calories
    pub next_workout: String,
    /// Acute:chronic workload ratio, rounded to 2 decimal places
    pub ratio: Option<f64>,
    pub next_distance_km: f64,
    pub projected_calories: i64,
}

/// Intermediate values of one ACWR computation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorkloadSnapshot {
    pub acute_load: f64,
    pub chronic_load: f64,
    pub divisor: f64,
    pub ratio: f64,
}

impl WorkloadSnapshot {
    pub fn rounded_ratio(&self) -> f64 {
        (self.ratio * 100.0).round() / 100.0
    }
}

/// Response body of a workout submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutSubmission {
    pub message: String,
    pub analysis: Prescription,
}
