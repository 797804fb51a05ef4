//! Short URL creation, lookup and click counting.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::domain::entities::{NewShortUrl, ShortUrl};
use crate::domain::repositories::{CreateStatus, ShortUrlRepository, StorageError};
use crate::infrastructure::cache::{
    CacheService, GET_BY_SHORT_CODE_NAMESPACE, cache_key, invalidate, read_through,
};
use crate::utils::code_generator::{generate_code, is_well_formed};

/// Default number of code generation attempts per create.
pub const DEFAULT_MAX_ATTEMPTS: usize = 5;

/// Default lifetime of a cached lookup.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(3600);

/// Errors returned by [`ShortUrlService`].
#[derive(Debug, Error)]
pub enum ShortUrlError {
    /// Every generated code collided with an existing one.
    #[error("failed to create a unique short code after {attempts} attempts")]
    ExhaustedRetries { attempts: usize },

    #[error("short URL with code {0} not found")]
    NotFound(String),

    #[error(transparent)]
    Storage(StorageError),
}

impl From<StorageError> for ShortUrlError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::NotFound(code) => Self::NotFound(code),
            other => Self::Storage(other),
        }
    }
}

/// Tunables consumed by [`ShortUrlService`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShortUrlSettings {
    /// Maximum number of codes tried before giving up.
    pub max_attempts: usize,
    /// Lifetime of a cached by-code lookup.
    pub cache_ttl: Duration,
}

impl Default for ShortUrlSettings {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            cache_ttl: DEFAULT_CACHE_TTL,
        }
    }
}

/// Service for creating short URLs and resolving them.
///
/// Storage is the source of truth. The cache only serves
/// [`Self::get_by_short_code`] and is invalidated around every click count
/// update.
pub struct ShortUrlService {
    repository: Arc<dyn ShortUrlRepository>,
    cache: Arc<dyn CacheService>,
    settings: ShortUrlSettings,
}

impl ShortUrlService {
    /// Creates a new short URL service.
    pub fn new(
        repository: Arc<dyn ShortUrlRepository>,
        cache: Arc<dyn CacheService>,
        settings: ShortUrlSettings,
    ) -> Self {
        Self {
            repository,
            cache,
            settings,
        }
    }

    /// Creates a short URL for `long_url`.
    ///
    /// # Retry Behaviour
    ///
    /// A fresh random code is generated for every attempt. A code collision
    /// ([`CreateStatus::DuplicateCode`]) triggers another attempt, up to
    /// `max_attempts` in total. If the long URL was already shortened the
    /// stored record is returned as-is and no code is consumed.
    ///
    /// # Errors
    ///
    /// Returns [`ShortUrlError::ExhaustedRetries`] when every attempt collided.
    /// Storage failures abort immediately with [`ShortUrlError::Storage`].
    pub async fn create(&self, long_url: &str) -> Result<ShortUrl, ShortUrlError> {
        let attempts = self.settings.max_attempts;

        for attempt in 1..=attempts {
            let candidate = NewShortUrl::new(long_url, generate_code());

            match self.repository.create(candidate).await? {
                CreateStatus::Inserted(short_url) => {
                    info!(
                        short_code = %short_url.short_code,
                        attempt,
                        "Created short URL"
                    );
                    metrics::counter!("short_urls_created_total").increment(1);
                    return Ok(short_url);
                }
                CreateStatus::Existing(short_url) => {
                    debug!(
                        short_code = %short_url.short_code,
                        "Long URL already shortened, reusing record"
                    );
                    return Ok(short_url);
                }
                CreateStatus::DuplicateCode => {
                    warn!(attempt, max_attempts = attempts, "Short code collision");
                    metrics::counter!("short_code_collisions_total").increment(1);
                }
            }
        }

        Err(ShortUrlError::ExhaustedRetries { attempts })
    }

    /// Looks up a short URL, serving from cache when possible.
    ///
    /// Returns `Ok(None)` for unknown codes. Codes that could never have been
    /// generated are rejected without touching the cache or storage.
    pub async fn get_by_short_code(
        &self,
        short_code: &str,
    ) -> Result<Option<ShortUrl>, ShortUrlError> {
        if !is_well_formed(short_code) {
            return Ok(None);
        }

        let key = cache_key(GET_BY_SHORT_CODE_NAMESPACE, short_code);
        let repository = &self.repository;

        let short_url = read_through(self.cache.as_ref(), &key, self.settings.cache_ttl, || {
            repository.get_by_code(short_code)
        })
        .await?;

        Ok(short_url)
    }

    /// Resolves a short code to its record.
    ///
    /// # Errors
    ///
    /// Returns [`ShortUrlError::NotFound`] if the code does not exist.
    pub async fn resolve(&self, short_code: &str) -> Result<ShortUrl, ShortUrlError> {
        self.get_by_short_code(short_code)
            .await?
            .ok_or_else(|| ShortUrlError::NotFound(short_code.to_string()))
    }

    /// Counts one redirect through `short_code` and returns the updated record.
    ///
    /// The cached lookup is deleted both before and after the increment. A
    /// concurrent reader that loaded the pre-increment row either writes it
    /// before the second delete, or sees the new row when [`read_through`]
    /// re-checks storage after populating and drops the entry itself.
    ///
    /// # Errors
    ///
    /// Returns [`ShortUrlError::NotFound`] if the code does not exist.
    pub async fn record_redirect(&self, short_code: &str) -> Result<ShortUrl, ShortUrlError> {
        if !is_well_formed(short_code) {
            return Err(ShortUrlError::NotFound(short_code.to_string()));
        }

        let key = cache_key(GET_BY_SHORT_CODE_NAMESPACE, short_code);

        invalidate(self.cache.as_ref(), &key).await;
        let short_url = self.repository.increment_click_count(short_code).await?;
        invalidate(self.cache.as_ref(), &key).await;

        debug!(
            short_code,
            click_count = short_url.click_count,
            "Recorded redirect"
        );
        metrics::counter!("short_url_redirects_total").increment(1);

        Ok(short_url)
    }

    /// Returns the current click count for a short code.
    ///
    /// # Errors
    ///
    /// Returns [`ShortUrlError::NotFound`] if the code does not exist.
    pub async fn get_click_count(&self, short_code: &str) -> Result<i64, ShortUrlError> {
        Ok(self.resolve(short_code).await?.click_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockShortUrlRepository;
    use crate::infrastructure::cache::{CacheError, MemoryCache, MockCacheService, NullCache};
    use mockall::Sequence;

    fn short_url(id: i64, code: &str, url: &str, click_count: i64) -> ShortUrl {
        ShortUrl::new(id, url.to_string(), code.to_string(), click_count)
    }

    fn service_with(repository: MockShortUrlRepository) -> ShortUrlService {
        ShortUrlService::new(
            Arc::new(repository),
            Arc::new(NullCache::new()),
            ShortUrlSettings::default(),
        )
    }

    #[tokio::test]
    async fn test_create_success_first_attempt() {
        let mut repo = MockShortUrlRepository::new();
        repo.expect_create()
            .withf(|new| new.long_url == "https://example.com" && is_well_formed(&new.short_code))
            .times(1)
            .returning(|new| {
                Ok(CreateStatus::Inserted(ShortUrl::new(
                    1,
                    new.long_url,
                    new.short_code,
                    0,
                )))
            });

        let service = service_with(repo);
        let created = service.create("https://example.com").await.unwrap();

        assert_eq!(created.long_url, "https://example.com");
        assert_eq!(created.click_count, 0);
        assert!(is_well_formed(&created.short_code));
    }

    #[tokio::test]
    async fn test_create_retries_after_collision() {
        let mut repo = MockShortUrlRepository::new();
        let mut calls = 0;
        repo.expect_create().times(3).returning(move |new| {
            calls += 1;
            if calls < 3 {
                Ok(CreateStatus::DuplicateCode)
            } else {
                Ok(CreateStatus::Inserted(ShortUrl::new(
                    9,
                    new.long_url,
                    new.short_code,
                    0,
                )))
            }
        });

        let service = service_with(repo);
        let created = service.create("https://example.com").await.unwrap();

        assert_eq!(created.id, 9);
    }

    #[tokio::test]
    async fn test_create_fails_after_exactly_max_attempts() {
        let mut repo = MockShortUrlRepository::new();
        repo.expect_create()
            .times(DEFAULT_MAX_ATTEMPTS)
            .returning(|_| Ok(CreateStatus::DuplicateCode));

        let service = service_with(repo);
        let err = service.create("https://example.com").await.unwrap_err();

        assert!(matches!(
            err,
            ShortUrlError::ExhaustedRetries { attempts } if attempts == DEFAULT_MAX_ATTEMPTS
        ));
    }

    #[tokio::test]
    async fn test_create_honours_configured_attempts() {
        let mut repo = MockShortUrlRepository::new();
        repo.expect_create()
            .times(2)
            .returning(|_| Ok(CreateStatus::DuplicateCode));

        let service = ShortUrlService::new(
            Arc::new(repo),
            Arc::new(NullCache::new()),
            ShortUrlSettings {
                max_attempts: 2,
                ..ShortUrlSettings::default()
            },
        );

        let err = service.create("https://example.com").await.unwrap_err();
        assert!(matches!(err, ShortUrlError::ExhaustedRetries { attempts: 2 }));
    }

    #[tokio::test]
    async fn test_create_returns_existing_record_without_retry() {
        let mut repo = MockShortUrlRepository::new();
        let existing = short_url(5, "exist", "https://example.com", 4);
        repo.expect_create()
            .times(1)
            .returning(move |_| Ok(CreateStatus::Existing(existing.clone())));

        let service = service_with(repo);
        let result = service.create("https://example.com").await.unwrap();

        assert_eq!(result.id, 5);
        assert_eq!(result.short_code, "exist");
        assert_eq!(result.click_count, 4);
    }

    #[tokio::test]
    async fn test_create_storage_error_is_not_retried() {
        let mut repo = MockShortUrlRepository::new();
        repo.expect_create()
            .times(1)
            .returning(|_| Err(StorageError::Database(sqlx::Error::PoolTimedOut)));

        let service = service_with(repo);
        let err = service.create("https://example.com").await.unwrap_err();

        assert!(matches!(err, ShortUrlError::Storage(_)));
    }

    #[tokio::test]
    async fn test_lookup_hit_skips_storage() {
        let mut repo = MockShortUrlRepository::new();
        repo.expect_get_by_code().times(0);

        let cache = Arc::new(MemoryCache::default());
        let cached = short_url(1, "abc12", "https://example.com", 2);
        cache
            .set(
                &cache_key(GET_BY_SHORT_CODE_NAMESPACE, "abc12"),
                &serde_json::to_string(&cached).unwrap(),
                DEFAULT_CACHE_TTL,
            )
            .await
            .unwrap();

        let service = ShortUrlService::new(Arc::new(repo), cache, ShortUrlSettings::default());
        let result = service.get_by_short_code("abc12").await.unwrap();

        assert_eq!(result, Some(cached));
    }

    #[tokio::test]
    async fn test_lookup_miss_populates_cache() {
        let mut repo = MockShortUrlRepository::new();
        // Load plus the post-populate check.
        repo.expect_get_by_code()
            .withf(|code| code == "abc12")
            .times(2)
            .returning(|_| Ok(Some(short_url(1, "abc12", "https://example.com", 0))));

        let cache = Arc::new(MemoryCache::default());
        let service =
            ShortUrlService::new(Arc::new(repo), cache.clone(), ShortUrlSettings::default());

        // Second lookup must be served by the cache; the mock allows no further storage call.
        let first = service.get_by_short_code("abc12").await.unwrap();
        let second = service.get_by_short_code("abc12").await.unwrap();

        assert_eq!(first, second);
        assert!(
            cache
                .get(&cache_key(GET_BY_SHORT_CODE_NAMESPACE, "abc12"))
                .await
                .unwrap()
                .is_some()
        );
    }

    #[tokio::test]
    async fn test_lookup_does_not_cache_row_updated_during_populate() {
        let mut repo = MockShortUrlRepository::new();
        let mut loads = 0;
        repo.expect_get_by_code().times(2).returning(move |_| {
            // A redirect lands between the load and the cache write.
            loads += 1;
            Ok(Some(short_url(1, "abc12", "https://example.com", loads - 1)))
        });

        let cache = Arc::new(MemoryCache::default());
        let service =
            ShortUrlService::new(Arc::new(repo), cache.clone(), ShortUrlSettings::default());

        let result = service.get_by_short_code("abc12").await.unwrap();

        assert_eq!(result.unwrap().click_count, 0);
        assert!(
            cache
                .get(&cache_key(GET_BY_SHORT_CODE_NAMESPACE, "abc12"))
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_lookup_survives_cache_outage() {
        let mut repo = MockShortUrlRepository::new();
        repo.expect_get_by_code()
            .times(1)
            .returning(|_| Ok(Some(short_url(1, "abc12", "https://example.com", 0))));

        let mut cache = MockCacheService::new();
        cache
            .expect_get()
            .returning(|_| Err(CacheError::ConnectionError("refused".to_string())));
        cache
            .expect_set()
            .returning(|_, _, _| Err(CacheError::ConnectionError("refused".to_string())));

        let service =
            ShortUrlService::new(Arc::new(repo), Arc::new(cache), ShortUrlSettings::default());
        let result = service.resolve("abc12").await.unwrap();

        assert_eq!(result.long_url, "https://example.com");
    }

    #[tokio::test]
    async fn test_resolve_unknown_code() {
        let mut repo = MockShortUrlRepository::new();
        repo.expect_get_by_code().times(1).returning(|_| Ok(None));

        let service = service_with(repo);
        let err = service.resolve("nope1").await.unwrap_err();

        assert!(matches!(err, ShortUrlError::NotFound(code) if code == "nope1"));
    }

    #[tokio::test]
    async fn test_resolve_malformed_code_skips_storage() {
        let mut repo = MockShortUrlRepository::new();
        repo.expect_get_by_code().times(0);

        let service = service_with(repo);
        let err = service.resolve("nonexistentcode").await.unwrap_err();

        assert!(matches!(err, ShortUrlError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_record_redirect_invalidates_around_increment() {
        let key = cache_key(GET_BY_SHORT_CODE_NAMESPACE, "abc12");
        let mut seq = Sequence::new();
        let mut cache = MockCacheService::new();
        let mut repo = MockShortUrlRepository::new();

        let before_key = key.clone();
        cache
            .expect_delete()
            .withf(move |k| k == before_key)
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        repo.expect_increment_click_count()
            .withf(|code| code == "abc12")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(short_url(1, "abc12", "https://example.com", 1)));
        let after_key = key.clone();
        cache
            .expect_delete()
            .withf(move |k| k == after_key)
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));

        let service =
            ShortUrlService::new(Arc::new(repo), Arc::new(cache), ShortUrlSettings::default());
        let updated = service.record_redirect("abc12").await.unwrap();

        assert_eq!(updated.click_count, 1);
    }

    #[tokio::test]
    async fn test_record_redirect_unknown_code() {
        let mut repo = MockShortUrlRepository::new();
        repo.expect_increment_click_count()
            .times(1)
            .returning(|code| Err(StorageError::NotFound(code.to_string())));

        let service = service_with(repo);
        let err = service.record_redirect("nope1").await.unwrap_err();

        assert!(matches!(err, ShortUrlError::NotFound(code) if code == "nope1"));
    }

    #[tokio::test]
    async fn test_record_redirect_tolerates_cache_outage() {
        let mut repo = MockShortUrlRepository::new();
        repo.expect_increment_click_count()
            .times(1)
            .returning(|_| Ok(short_url(1, "abc12", "https://example.com", 3)));

        let mut cache = MockCacheService::new();
        cache
            .expect_delete()
            .times(2)
            .returning(|_| Err(CacheError::OperationError("timeout".to_string())));

        let service =
            ShortUrlService::new(Arc::new(repo), Arc::new(cache), ShortUrlSettings::default());

        assert_eq!(service.record_redirect("abc12").await.unwrap().click_count, 3);
    }

    #[tokio::test]
    async fn test_get_click_count() {
        let mut repo = MockShortUrlRepository::new();
        repo.expect_get_by_code()
            .times(2)
            .returning(|_| Ok(Some(short_url(1, "abc12", "https://example.com", 42))));

        let service = service_with(repo);

        assert_eq!(service.get_click_count("abc12").await.unwrap(), 42);
    }

    #[test]
    fn test_storage_not_found_maps_to_not_found() {
        let err: ShortUrlError = StorageError::NotFound("abc12".to_string()).into();
        assert!(matches!(err, ShortUrlError::NotFound(code) if code == "abc12"));

        let err: ShortUrlError = StorageError::Database(sqlx::Error::RowNotFound).into();
        assert!(matches!(err, ShortUrlError::Storage(_)));
    }
}
