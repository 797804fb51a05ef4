//! Caching layer for short code lookups.
//!
//! Provides a [`CacheService`] trait with three implementations:
//! - [`RedisCache`] - Production Redis-backed cache
//! - [`MemoryCache`] - In-process cache with per-entry TTL
//! - [`NullCache`] - No-op implementation for disabled caching
//!
//! [`read_through`] and [`invalidate`] implement the lookup and invalidation
//! protocol; [`cache_key`] derives the key for a namespace and short code.

mod key;
mod memory_cache;
mod null_cache;
mod read_through;
mod redis_cache;
mod service;

pub use key::{GET_BY_SHORT_CODE_NAMESPACE, KEY_PREFIX, cache_key};
pub use memory_cache::{DEFAULT_MAX_ENTRIES, MemoryCache};
pub use null_cache::NullCache;
pub use read_through::{invalidate, read_through};
pub use redis_cache::RedisCache;
pub use service::{CacheError, CacheResult, CacheService};

#[cfg(test)]
pub use service::MockCacheService;
