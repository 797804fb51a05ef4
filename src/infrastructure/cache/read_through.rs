//! Read-through lookup and best-effort invalidation on top of [`CacheService`].
//!
//! Cache faults never fail a caller: read errors fall back to the loader,
//! write and delete errors are logged.

use super::service::CacheService;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

/// Returns the cached value for `key`, or loads it and populates the cache.
///
/// Only `Some` results are cached, so a code that does not exist yet is never
/// remembered as missing.
///
/// After populating, the value is loaded once more and the entry is dropped if
/// storage no longer matches. Combined with a writer that deletes the key after
/// its update, this keeps a value loaded before the update from outliving it.
pub async fn read_through<T, E, F, Fut>(
    cache: &dyn CacheService,
    key: &str,
    ttl: Duration,
    load: F,
) -> Result<Option<T>, E>
where
    T: Serialize + DeserializeOwned + PartialEq,
    F: Fn() -> Fut,
    Fut: Future<Output = Result<Option<T>, E>>,
{
    match cache.get(key).await {
        Ok(Some(payload)) => match serde_json::from_str::<T>(&payload) {
            Ok(value) => {
                debug!("Cache HIT: {}", key);
                metrics::counter!("short_url_cache_lookups_total", "outcome" => "hit").increment(1);
                return Ok(Some(value));
            }
            Err(e) => warn!("Discarding undecodable cache entry {}: {}", key, e),
        },
        Ok(None) => {
            debug!("Cache MISS: {}", key);
            metrics::counter!("short_url_cache_lookups_total", "outcome" => "miss").increment(1);
        }
        Err(e) => {
            warn!("Cache read failed for {}, falling back to storage: {}", key, e);
            metrics::counter!("short_url_cache_lookups_total", "outcome" => "error").increment(1);
        }
    }

    let loaded = load().await?;

    if let Some(value) = &loaded {
        match serde_json::to_string(value) {
            Ok(payload) => match cache.set(key, &payload, ttl).await {
                Ok(()) => {
                    if !matches!(load().await, Ok(Some(current)) if current == *value) {
                        debug!("Cache entry {} changed while populating, dropping it", key);
                        invalidate(cache, key).await;
                    }
                }
                Err(e) => warn!("Cache write failed for {}: {}", key, e),
            },
            Err(e) => warn!("Failed to encode cache entry {}: {}", key, e),
        }
    }

    Ok(loaded)
}

/// Deletes `key`, logging instead of failing when the cache is unavailable.
pub async fn invalidate(cache: &dyn CacheService, key: &str) {
    if let Err(e) = cache.delete(key).await {
        warn!("Cache invalidation failed for {}: {}", key, e);
    }
}
