//! Repository trait definitions for the domain layer.
//!
//! # Architecture
//!
//! - Traits define the contract for data operations
//! - Implementations live in `crate::infrastructure::persistence`
//! - Mock implementations are auto-generated via `mockall` for testing
//!
//! # Available Repositories
//!
//! - [`ShortUrlRepository`] - Short URL creation, lookup and click counting

pub mod short_url_repository;

pub use short_url_repository::{CreateStatus, ShortUrlRepository, StorageError};

#[cfg(test)]
pub use short_url_repository::MockShortUrlRepository;
