//! DTOs for the short URL endpoints.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::domain::entities::ShortUrl;

/// Request to shorten a URL.
#[derive(Debug, Deserialize, Validate)]
pub struct UrlPayload {
    /// The original URL (absolute `http` or `https`).
    #[validate(length(min = 1, max = 2048))]
    #[validate(custom(function = "validate_long_url"))]
    pub long_url: String,
}

/// Short code and the URL it points to.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShortUrlResponse {
    pub short_code: String,
    pub long_url: String,
}

impl From<ShortUrl> for ShortUrlResponse {
    fn from(short_url: ShortUrl) -> Self {
        Self {
            short_code: short_url.short_code,
            long_url: short_url.long_url,
        }
    }
}

/// Resolved short URL including its click count.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResolvedUrlResponse {
    pub short_code: String,
    pub long_url: String,
    pub click_count: i64,
}

impl From<ShortUrl> for ResolvedUrlResponse {
    fn from(short_url: ShortUrl) -> Self {
        Self {
            short_code: short_url.short_code,
            long_url: short_url.long_url,
            click_count: short_url.click_count,
        }
    }
}

/// Click count of a short code.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClickCountResponse {
    pub click_count: i64,
}

/// Accepts absolute `http`/`https` URLs with a host.
///
/// The stored value is sent back verbatim as a `Location` header, so it must
/// be printable ASCII. The URL parser silently drops tabs and newlines, which
/// is why the raw input is checked before parsing.
fn validate_long_url(value: &str) -> Result<(), ValidationError> {
    if !value.bytes().all(|b| b.is_ascii_graphic()) {
        return Err(ValidationError::new("url_chars").with_message(
            "URL must not contain whitespace, control or non-ASCII characters".into(),
        ));
    }

    let parsed = url::Url::parse(value).map_err(|_| {
        ValidationError::new("url").with_message("Invalid URL format".into())
    })?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ValidationError::new("url_scheme")
            .with_message("Only http and https URLs can be shortened".into()));
    }

    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(ValidationError::new("url_host").with_message("URL must have a host".into()));
    }

    Ok(())
}
