//! Infrastructure layer for external integrations.
//!
//! # Modules
//!
//! - [`cache`] - Caching backends and the read-through protocol
//! - [`persistence`] - Storage backends for short URLs

pub mod cache;
pub mod persistence;
