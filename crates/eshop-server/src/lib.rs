//! # eShop Server Library
//!
//! Wiring of the basket service: repository composition, dispatcher and
//! router construction, and startup/shutdown utilities.

pub mod app;
pub mod startup;
