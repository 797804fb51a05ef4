//! In-process implementation of the short URL repository.

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::atomic::{AtomicI64, Ordering};

use crate::domain::entities::{NewShortUrl, ShortUrl};
use crate::domain::repositories::{CreateStatus, ShortUrlRepository, StorageError};

/// In-memory repository backed by two sharded maps.
///
/// Lock order is always `by_long_url` then `by_code`, and no guard is held
/// across an `.await`.
#[derive(Debug, Default)]
pub struct MemoryShortUrlRepository {
    by_code: DashMap<String, ShortUrl>,
    by_long_url: DashMap<String, String>,
    next_id: AtomicI64,
}

impl MemoryShortUrlRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored short URLs.
    pub fn len(&self) -> usize {
        self.by_code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_code.is_empty()
    }
}

#[async_trait]
impl ShortUrlRepository for MemoryShortUrlRepository {
    async fn create(&self, new_short_url: NewShortUrl) -> Result<CreateStatus, StorageError> {
        let NewShortUrl {
            long_url,
            short_code,
        } = new_short_url;

        match self.by_long_url.entry(long_url.clone()) {
            Entry::Occupied(slot) => {
                let existing = self
                    .by_code
                    .get(slot.get())
                    .map(|record| record.clone())
                    .ok_or_else(|| StorageError::NotFound(slot.get().clone()))?;
                Ok(CreateStatus::Existing(existing))
            }
            Entry::Vacant(slot) => match self.by_code.entry(short_code.clone()) {
                Entry::Occupied(_) => Ok(CreateStatus::DuplicateCode),
                Entry::Vacant(code_slot) => {
                    let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
                    let short_url = ShortUrl::new(id, long_url, short_code.clone(), 0);
                    code_slot.insert(short_url.clone());
                    slot.insert(short_code);
                    Ok(CreateStatus::Inserted(short_url))
                }
            },
        }
    }

    async fn get_by_code(&self, short_code: &str) -> Result<Option<ShortUrl>, StorageError> {
        Ok(self.by_code.get(short_code).map(|record| record.clone()))
    }

    async fn increment_click_count(&self, short_code: &str) -> Result<ShortUrl, StorageError> {
        let mut record = self
            .by_code
            .get_mut(short_code)
            .ok_or_else(|| StorageError::NotFound(short_code.to_string()))?;
        record.click_count += 1;
        Ok(record.clone())
    }

    async fn ping(&self) -> Result<(), StorageError> {
        Ok(())
    }
}
