//! # eShop Core
//!
//! Core types, traits, and error definitions shared by every eShop crate:
//! the error taxonomy surfaced to callers, validation violations, the
//! cancellation signal threaded through I/O, and the basket domain model.

pub mod cancellation;
pub mod domain;
pub mod error;
pub mod result;
pub mod telemetry;
pub mod validation;

pub use cancellation::*;
pub use domain::*;
pub use error::*;
pub use result::*;
pub use validation::*;
