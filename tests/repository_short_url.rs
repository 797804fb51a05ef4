//! PostgreSQL repository tests.
//!
//! Need a running PostgreSQL reachable through `DATABASE_URL`:
//!
//! ```bash
//! cargo test --test repository_short_url -- --ignored
//! ```

use sqlx::PgPool;
use std::sync::Arc;
use link_minimizer::domain::entities::NewShortUrl;
use link_minimizer::domain::repositories::{CreateStatus, ShortUrlRepository, StorageError};
use link_minimizer::infrastructure::persistence::PgShortUrlRepository;

async fn insert(repo: &PgShortUrlRepository, code: &str, url: &str) {
    let status = repo.create(NewShortUrl::new(url, code)).await.unwrap();
    assert!(matches!(status, CreateStatus::Inserted(_)));
}

#[sqlx::test]
#[ignore = "requires PostgreSQL"]
async fn test_create_short_url(pool: PgPool) {
    let repo = PgShortUrlRepository::new(Arc::new(pool));

    let status = repo
        .create(NewShortUrl::new("https://example.com", "abc12"))
        .await
        .unwrap();

    let CreateStatus::Inserted(short_url) = status else {
        panic!("expected a new record, got {:?}", status);
    };
    assert_eq!(short_url.short_code, "abc12");
    assert_eq!(short_url.long_url, "https://example.com");
    assert_eq!(short_url.click_count, 0);
}

#[sqlx::test]
#[ignore = "requires PostgreSQL"]
async fn test_create_existing_long_url(pool: PgPool) {
    let repo = PgShortUrlRepository::new(Arc::new(pool));
    insert(&repo, "first", "https://example.com/same").await;

    let status = repo
        .create(NewShortUrl::new("https://example.com/same", "other"))
        .await
        .unwrap();

    let CreateStatus::Existing(short_url) = status else {
        panic!("expected the existing record, got {:?}", status);
    };
    assert_eq!(short_url.short_code, "first");
}

#[sqlx::test]
#[ignore = "requires PostgreSQL"]
async fn test_create_duplicate_code(pool: PgPool) {
    let repo = PgShortUrlRepository::new(Arc::new(pool));
    insert(&repo, "dup01", "https://example.com/1").await;

    let status = repo
        .create(NewShortUrl::new("https://example.com/2", "dup01"))
        .await
        .unwrap();

    assert_eq!(status, CreateStatus::DuplicateCode);
}

#[sqlx::test]
#[ignore = "requires PostgreSQL"]
async fn test_get_by_code(pool: PgPool) {
    let repo = PgShortUrlRepository::new(Arc::new(pool));
    insert(&repo, "find1", "https://example.com").await;

    let found = repo.get_by_code("find1").await.unwrap();
    assert_eq!(found.unwrap().long_url, "https://example.com");

    let missing = repo.get_by_code("nope1").await.unwrap();
    assert!(missing.is_none());
}

#[sqlx::test]
#[ignore = "requires PostgreSQL"]
async fn test_increment_click_count(pool: PgPool) {
    let repo = PgShortUrlRepository::new(Arc::new(pool));
    insert(&repo, "inc01", "https://example.com").await;

    let first = repo.increment_click_count("inc01").await.unwrap();
    let second = repo.increment_click_count("inc01").await.unwrap();

    assert_eq!(first.click_count, 1);
    assert_eq!(second.click_count, 2);
}

#[sqlx::test]
#[ignore = "requires PostgreSQL"]
async fn test_increment_unknown_code(pool: PgPool) {
    let repo = PgShortUrlRepository::new(Arc::new(pool));

    let result = repo.increment_click_count("nope1").await;

    assert!(matches!(result, Err(StorageError::NotFound(code)) if code == "nope1"));
}

#[sqlx::test]
#[ignore = "requires PostgreSQL"]
async fn test_concurrent_increments(pool: PgPool) {
    let repo = Arc::new(PgShortUrlRepository::new(Arc::new(pool)));
    insert(&repo, "hot01", "https://example.com").await;

    let mut handles = Vec::new();
    for _ in 0..20 {
        let repo = repo.clone();
        handles.push(tokio::spawn(async move {
            repo.increment_click_count("hot01").await.unwrap();
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let short_url = repo.get_by_code("hot01").await.unwrap().unwrap();
    assert_eq!(short_url.click_count, 20);
}

#[sqlx::test]
#[ignore = "requires PostgreSQL"]
async fn test_ping(pool: PgPool) {
    let repo = PgShortUrlRepository::new(Arc::new(pool));

    assert!(repo.ping().await.is_ok());
}
