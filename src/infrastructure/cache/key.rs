//! Deterministic cache key construction.

/// Prefix shared by every key this service writes.
pub const KEY_PREFIX: &str = "link-minimizer";

/// Namespace of the cached by-code lookup.
pub const GET_BY_SHORT_CODE_NAMESPACE: &str = "get_by_short_code";

/// Builds the cache key for an operation namespace and short code.
///
/// The key depends on nothing else, so every call site that looks up or
/// invalidates the same code addresses the same entry.
pub fn cache_key(namespace: &str, short_code: &str) -> String {
    format!("{KEY_PREFIX}:{namespace}:{short_code}")
}
