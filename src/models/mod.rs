// Data models for workouts and prescriptions

pub mod prescription;
pub mod workout;

pub use prescription::*;
pub use workout::*;
