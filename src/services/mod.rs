// Business logic services

pub mod calorie_service;
pub mod prescription_service;
pub mod training_log_service;
pub mod workload_service;

pub use calorie_service::CalorieSource;
pub use prescription_service::{
    AcwrRiskStrategy, PrescriptionEngine, RecoveryProfile, RiskStrategy,
};
pub use training_log_service::TrainingLogService;
pub use workload_service::AcwrCalculator;
