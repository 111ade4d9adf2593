//! # eShop REST
//!
//! REST API layer using Axum for the basket service.
//! Every basket route maps to exactly one dispatcher `send`.

pub mod controllers;
pub mod extractors;
pub mod middleware;
pub mod responses;
pub mod router;
pub mod state;

pub use router::*;
pub use state::*;
