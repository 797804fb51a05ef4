//! PostgreSQL implementation of the short URL repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;
use tracing::debug;

use crate::domain::entities::{NewShortUrl, ShortUrl};
use crate::domain::repositories::{CreateStatus, ShortUrlRepository, StorageError};
use crate::utils::db_error::is_unique_violation_on_code;

#[derive(sqlx::FromRow)]
struct ShortUrlRow {
    id: i64,
    long_url: String,
    short_code: String,
    click_count: i64,
}

impl From<ShortUrlRow> for ShortUrl {
    fn from(row: ShortUrlRow) -> Self {
        ShortUrl::new(row.id, row.long_url, row.short_code, row.click_count)
    }
}

/// PostgreSQL repository for short URLs.
///
/// Relies on the `short_urls_short_code_key` unique constraint to arbitrate
/// concurrent creators and on `UPDATE ... RETURNING` for atomic click counting.
pub struct PgShortUrlRepository {
    pool: Arc<PgPool>,
}

impl PgShortUrlRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    async fn find_by_long_url(&self, long_url: &str) -> Result<Option<ShortUrl>, StorageError> {
        let row = sqlx::query_as::<_, ShortUrlRow>(
            r#"
            SELECT id, long_url, short_code, click_count
            FROM short_urls
            WHERE long_url = $1
            ORDER BY id
            LIMIT 1
            "#,
        )
        .bind(long_url)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(ShortUrl::from))
    }
}

#[async_trait]
impl ShortUrlRepository for PgShortUrlRepository {
    async fn create(&self, new_short_url: NewShortUrl) -> Result<CreateStatus, StorageError> {
        if let Some(existing) = self.find_by_long_url(&new_short_url.long_url).await? {
            debug!(short_code = %existing.short_code, "long URL already shortened");
            return Ok(CreateStatus::Existing(existing));
        }

        let inserted = sqlx::query_as::<_, ShortUrlRow>(
            r#"
            INSERT INTO short_urls (long_url, short_code)
            VALUES ($1, $2)
            RETURNING id, long_url, short_code, click_count
            "#,
        )
        .bind(&new_short_url.long_url)
        .bind(&new_short_url.short_code)
        .fetch_one(self.pool.as_ref())
        .await;

        match inserted {
            Ok(row) => Ok(CreateStatus::Inserted(row.into())),
            Err(e) if is_unique_violation_on_code(&e) => Ok(CreateStatus::DuplicateCode),
            Err(e) => Err(e.into()),
        }
    }

    async fn get_by_code(&self, short_code: &str) -> Result<Option<ShortUrl>, StorageError> {
        let row = sqlx::query_as::<_, ShortUrlRow>(
            r#"
            SELECT id, long_url, short_code, click_count
            FROM short_urls
            WHERE short_code = $1
            "#,
        )
        .bind(short_code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(ShortUrl::from))
    }

    async fn increment_click_count(&self, short_code: &str) -> Result<ShortUrl, StorageError> {
        let row = sqlx::query_as::<_, ShortUrlRow>(
            r#"
            UPDATE short_urls
            SET click_count = click_count + 1
            WHERE short_code = $1
            RETURNING id, long_url, short_code, click_count
            "#,
        )
        .bind(short_code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(ShortUrl::from)
            .ok_or_else(|| StorageError::NotFound(short_code.to_string()))
    }

    async fn ping(&self) -> Result<(), StorageError> {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await?;
        Ok(())
    }
}
