//! REST API controllers.

pub mod basket_controller;
pub mod health_controller;

pub use health_controller::{HealthReport, HealthStatus};
