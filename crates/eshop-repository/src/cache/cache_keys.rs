//! Cache key generators for consistent key naming.

/// Prefix for all cache keys to namespace them.
const CACHE_PREFIX: &str = "eshop";

/// Generate the cache key for a user's basket.
///
/// User names are case-sensitive identities, so the key keeps the case.
#[must_use]
pub fn basket(user_name: &str) -> String {
    format!("{CACHE_PREFIX}:basket:{user_name}")
}
