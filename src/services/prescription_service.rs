use tracing::debug;

use crate::models::{
    ActivityType, ExperienceLevel, Prescription, RiskStatus, WorkloadSnapshot, WorkoutRecord,
};
use crate::services::calorie_service::calorie_efficiency;
use crate::services::workload_service::AcwrCalculator;

/// Lower edge of the ideal band
pub const IDEAL_LOWER_BOUND: f64 = 0.8;
/// Distance suggested after a high-risk or bootstrap session
pub const SAFE_DISTANCE_KM: f64 = 3.0;
/// Calorie-efficiency multiplier for the light recovery walk
pub const RECOVERY_INTENSITY: f64 = 0.8;
pub const IDEAL_PROGRESSION: f64 = 1.10;
pub const LOW_LOAD_PROGRESSION: f64 = 1.20;

/// Recovery capacity of an athlete, expressed as a divisor on the risk threshold
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecoveryProfile {
    pub recovery_factor: f64,
}

impl RecoveryProfile {
    /// 1.0 baseline, x1.2 past age 45, +0.1 for beginners
    pub fn new(age: Option<i32>, experience_level: Option<ExperienceLevel>) -> Self {
        let mut recovery_factor = 1.0;
        if age.is_some_and(|a| a > 45) {
            recovery_factor *= 1.2;
        }
        if experience_level == Some(ExperienceLevel::Beginner) {
            recovery_factor += 0.1;
        }
        Self { recovery_factor }
    }

    pub fn for_workout(workout: &WorkoutRecord) -> Self {
        Self::new(workout.age, workout.experience_level)
    }

    /// Ratio above which a session is classified high risk
    pub fn risk_threshold(&self, activity: ActivityType) -> f64 {
        base_risk_threshold(activity) / self.recovery_factor
    }
}

/// Walking tolerates larger load swings than running
pub fn base_risk_threshold(activity: ActivityType) -> f64 {
    match activity {
        ActivityType::Run => 1.5,
        ActivityType::Walk => 2.0,
    }
}

/// Pluggable risk scoring behind the `(workout, history) -> Prescription` contract
pub trait RiskStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    /// `history` holds prior sessions only, most recent first
    fn assess(&self, current: &WorkoutRecord, history: &[WorkoutRecord]) -> Prescription;
}

/// Default strategy: ACWR classified into high / ideal / low bands
#[derive(Debug, Clone, Default)]
pub struct AcwrRiskStrategy {
    calculator: AcwrCalculator,
}

impl AcwrRiskStrategy {
    pub fn new(calculator: AcwrCalculator) -> Self {
        Self { calculator }
    }

    fn bootstrap(&self, current: &WorkoutRecord, efficiency: f64) -> Prescription {
        let (next_workout, projected_calories) =
            suggestion(current.activity_type.verb(), SAFE_DISTANCE_KM, efficiency, None);

        Prescription {
            status: RiskStatus::Start,
            message: "Welcome! Your training journey starts today.".to_string(),
            action: "Rest for 24h before your next session.".to_string(),
            next_workout,
            ratio: Some(0.0),
            next_distance_km: SAFE_DISTANCE_KM,
            projected_calories,
        }
    }

    fn classify(
        &self,
        current: &WorkoutRecord,
        load: &WorkloadSnapshot,
        efficiency: f64,
    ) -> Prescription {
        let activity = current.activity_type;
        let threshold = RecoveryProfile::for_workout(current).risk_threshold(activity);
        let ratio = Some(load.rounded_ratio());

        if load.ratio > threshold {
            let (next_workout, projected_calories) = suggestion(
                ActivityType::Walk.verb(),
                SAFE_DISTANCE_KM,
                efficiency * RECOVERY_INTENSITY,
                Some("light"),
            );
            return Prescription {
                status: RiskStatus::HighRisk,
                message: format!(
                    "Load is too high for this {}. Injury risk is elevated.",
                    activity
                ),
                action: "Mandatory rest for 48-72h, stretching only.".to_string(),
                next_workout,
                ratio,
                next_distance_km: SAFE_DISTANCE_KM,
                projected_calories,
            };
        }

        if load.ratio >= IDEAL_LOWER_BOUND {
            let next_distance_km = round2(current.distance_km * IDEAL_PROGRESSION);
            let intensity = match current.experience_level {
                Some(ExperienceLevel::Advanced) => "moderate",
                _ => "light",
            };
            let (next_workout, projected_calories) =
                suggestion(activity.verb(), next_distance_km, efficiency, Some(intensity));
            return Prescription {
                status: RiskStatus::Ideal,
                message: format!("Well-balanced {}. You are building fitness safely.", activity),
                action: "Standard 24h rest or cross-training.".to_string(),
                next_workout,
                ratio,
                next_distance_km,
                projected_calories,
            };
        }

        let next_distance_km = round2(current.distance_km * LOW_LOAD_PROGRESSION);
        let (next_workout, projected_calories) =
            suggestion(activity.verb(), next_distance_km, efficiency, None);
        Prescription {
            status: RiskStatus::LowLoad,
            message: "Light session, your body barely felt it.".to_string(),
            action: "You may train again tomorrow.".to_string(),
            next_workout,
            ratio,
            next_distance_km,
            projected_calories,
        }
    }
}

impl RiskStrategy for AcwrRiskStrategy {
    fn name(&self) -> &'static str {
        "acwr"
    }

    fn assess(&self, current: &WorkoutRecord, history: &[WorkoutRecord]) -> Prescription {
        let efficiency =
            calorie_efficiency(current.distance_km, current.calories, current.activity_type);

        if history.is_empty() && current.is_beginner() {
            return self.bootstrap(current, efficiency);
        }

        let load = self.calculator.compute(current.distance_km, history);
        debug!(
            acute = load.acute_load,
            chronic = load.chronic_load,
            divisor = load.divisor,
            ratio = load.ratio,
            "Computed workload"
        );

        self.classify(current, &load, efficiency)
    }
}

/// Stateless entry point for prescriptions
pub struct PrescriptionEngine {
    strategy: Box<dyn RiskStrategy>,
}

impl PrescriptionEngine {
    pub fn new() -> Self {
        Self::with_strategy(Box::new(AcwrRiskStrategy::default()))
    }

    pub fn with_strategy(strategy: Box<dyn RiskStrategy>) -> Self {
        Self { strategy }
    }

    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    pub fn prescribe(&self, current: &WorkoutRecord, history: &[WorkoutRecord]) -> Prescription {
        self.strategy.assess(current, history)
    }
}

impl Default for PrescriptionEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Renders the next-session text and its projected calories
fn suggestion(
    verb: &str,
    distance_km: f64,
    kcal_per_km: f64,
    intensity: Option<&str>,
) -> (String, i64) {
    if distance_km <= 0.0 {
        return ("Recovery only.".to_string(), 0);
    }

    let projected_calories = (distance_km * kcal_per_km).round() as i64;
    let text = match intensity {
        Some(label) => format!(
            "{} {:.1} km at {} intensity (~{} kcal)",
            verb, distance_km, label, projected_calories
        ),
        None => format!("{} {:.1} km (~{} kcal)", verb, distance_km, projected_calories),
    };

    (text, projected_calories)
}
