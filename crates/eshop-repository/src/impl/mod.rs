//! Repository implementations over the document store.

mod basket_repository_impl;

pub use basket_repository_impl::BasketRepositoryImpl;
