//! Built-in pipeline behaviors.

mod logging;
mod validation;

pub use logging::LoggingBehavior;
pub use validation::ValidationBehavior;
