//! Repository trait for short URL storage.

use crate::domain::entities::{NewShortUrl, ShortUrl};
use async_trait::async_trait;
use thiserror::Error;

/// Errors reported by a storage backend.
///
/// A short code collision is not an error; it is reported through
/// [`CreateStatus::DuplicateCode`].
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("short URL with code {0} not found")]
    NotFound(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Outcome of [`ShortUrlRepository::create`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateStatus {
    /// A new record was stored.
    Inserted(ShortUrl),
    /// The long URL was already shortened; the stored record is returned unchanged.
    Existing(ShortUrl),
    /// Another record already owns the requested short code.
    DuplicateCode,
}

/// Storage port for short URLs.
///
/// Backends must enforce uniqueness of `short_code` and deduplicate by
/// `long_url` on creation.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgShortUrlRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::MemoryShortUrlRepository`] - In-process implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShortUrlRepository: Send + Sync {
    /// Stores a new short URL.
    ///
    /// If a record with the same `long_url` exists it is returned as
    /// [`CreateStatus::Existing`] and nothing is inserted.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Database`] on backend failures.
    async fn create(&self, new_short_url: NewShortUrl) -> Result<CreateStatus, StorageError>;

    /// Finds a short URL by its code.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(ShortUrl))` if found
    /// - `Ok(None)` if not found
    async fn get_by_code(&self, short_code: &str) -> Result<Option<ShortUrl>, StorageError>;

    /// Atomically increments the click count and returns the updated record.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::NotFound`] if no record has this code.
    async fn increment_click_count(&self, short_code: &str) -> Result<ShortUrl, StorageError>;

    /// Checks that the backend is reachable.
    async fn ping(&self) -> Result<(), StorageError>;
}
