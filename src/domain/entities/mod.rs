//! Core domain entities.
//!
//! - [`ShortUrl`] - A persisted short code to long URL mapping
//! - [`NewShortUrl`] - Input for creating a record

pub mod short_url;

pub use short_url::{NewShortUrl, ShortUrl};
