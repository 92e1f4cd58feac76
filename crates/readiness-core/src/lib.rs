pub mod analytics;
pub mod barriers;
pub mod config;
pub mod error;
pub mod readiness;
pub mod sessions;
pub mod telemetry;
