//! # eShop Config
//!
//! Configuration for the basket service, layered from TOML files,
//! a `.env` file and `ESHOP_`-prefixed environment variables.

mod app_config;
mod loader;

pub use app_config::*;
pub use loader::*;
