//! Domain layer: aggregates and the storage contract they satisfy.

pub mod document;
pub mod shopping_cart;

pub use document::*;
pub use shopping_cart::*;
