//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{ShortUrlService, ShortUrlSettings};
use crate::domain::repositories::ShortUrlRepository;
use crate::infrastructure::cache::CacheService;

/// Handles owned by the host process and shared across requests.
///
/// The repository and cache are kept alongside the service for health checks.
#[derive(Clone)]
pub struct AppState {
    pub short_url_service: Arc<ShortUrlService>,
    pub repository: Arc<dyn ShortUrlRepository>,
    pub cache: Arc<dyn CacheService>,
}

impl AppState {
    /// Wires a [`ShortUrlService`] over the given storage and cache.
    pub fn new(
        repository: Arc<dyn ShortUrlRepository>,
        cache: Arc<dyn CacheService>,
        settings: ShortUrlSettings,
    ) -> Self {
        let short_url_service = Arc::new(ShortUrlService::new(
            repository.clone(),
            cache.clone(),
            settings,
        ));

        Self {
            short_url_service,
            repository,
            cache,
        }
    }
}
