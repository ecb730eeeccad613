// Training-load analytics service: workout logging with ACWR-based prescriptions

pub mod api;
pub mod config;
pub mod errors;
pub mod models;
pub mod services;
pub mod store;
