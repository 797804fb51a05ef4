#![allow(dead_code)]

use axum::ServiceExt;
use axum::extract::Request;
use axum_test::TestServer;
use std::sync::Arc;
use link_minimizer::application::services::ShortUrlSettings;
use link_minimizer::domain::entities::NewShortUrl;
use link_minimizer::domain::repositories::{CreateStatus, ShortUrlRepository};
use link_minimizer::infrastructure::cache::{CacheService, MemoryCache, NullCache};
use link_minimizer::infrastructure::persistence::MemoryShortUrlRepository;
use link_minimizer::routes::app_router;
use link_minimizer::state::AppState;

pub fn create_test_state() -> AppState {
    create_state_with(
        Arc::new(MemoryShortUrlRepository::new()),
        Arc::new(MemoryCache::new(1_000)),
    )
}

pub fn create_uncached_state() -> AppState {
    create_state_with(
        Arc::new(MemoryShortUrlRepository::new()),
        Arc::new(NullCache::new()),
    )
}

pub fn create_state_with(
    repository: Arc<dyn ShortUrlRepository>,
    cache: Arc<dyn CacheService>,
) -> AppState {
    AppState::new(repository, cache, ShortUrlSettings::default())
}

/// Test server over the production router, path normalisation included.
pub fn create_test_server(state: AppState) -> TestServer {
    let app = ServiceExt::<Request>::into_make_service(app_router(state));
    TestServer::new(app).unwrap()
}

/// Inserts a record with a fixed code directly into storage.
pub async fn create_test_short_url(state: &AppState, code: &str, url: &str) {
    let status = state
        .repository
        .create(NewShortUrl::new(url, code))
        .await
        .unwrap();

    assert!(matches!(status, CreateStatus::Inserted(_)));
}
