//! Domain layer containing the short URL entity and the storage contract.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Storage port implemented by the infrastructure layer
//!
//! # Design Principles
//!
//! - Domain layer has no dependencies on the presentation layer
//! - Repository traits define contracts implemented by `crate::infrastructure::persistence`
//! - Business logic lives in services (see [`crate::application::services`])

pub mod entities;
pub mod repositories;
