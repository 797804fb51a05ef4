//! Application layer services implementing business logic.
//!
//! Services coordinate the storage port and the cache, and expose the
//! operations used by HTTP handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::short_url_service::ShortUrlService`] - Short code creation, lookup and click counting

pub mod services;
