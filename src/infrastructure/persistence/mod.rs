//! Storage backends for the [`crate::domain::repositories::ShortUrlRepository`] port.
//!
//! - [`PgShortUrlRepository`] - PostgreSQL, used in production
//! - [`MemoryShortUrlRepository`] - Sharded in-process maps, used for development and tests

pub mod memory_short_url_repository;
pub mod pg_short_url_repository;

pub use memory_short_url_repository::MemoryShortUrlRepository;
pub use pg_short_url_repository::PgShortUrlRepository;
