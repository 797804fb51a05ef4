//! Short URL entity.

use serde::{Deserialize, Serialize};

/// A persisted mapping from a short code to the original URL.
///
/// `click_count` is only ever changed by
/// [`crate::domain::repositories::ShortUrlRepository::increment_click_count`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortUrl {
    pub id: i64,
    pub long_url: String,
    pub short_code: String,
    pub click_count: i64,
}

impl ShortUrl {
    /// Creates a new ShortUrl instance.
    pub fn new(id: i64, long_url: String, short_code: String, click_count: i64) -> Self {
        Self {
            id,
            long_url,
            short_code,
            click_count,
        }
    }
}

/// Input data for creating a new short URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewShortUrl {
    pub long_url: String,
    pub short_code: String,
}

impl NewShortUrl {
    pub fn new(long_url: impl Into<String>, short_code: impl Into<String>) -> Self {
        Self {
            long_url: long_url.into(),
            short_code: short_code.into(),
        }
    }
}
