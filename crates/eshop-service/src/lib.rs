//! # eShop Service
//!
//! Basket use cases as vertical slices. Each slice holds the request, its
//! response, its validator and its handler; handlers talk only to
//! [`BasketRepository`](eshop_repository::BasketRepository) and never see
//! caching, logging or validation.

pub mod basket;

pub use basket::*;
