//! PostgreSQL implementation of the short URL repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewShortUrl, ShortUrl};
use crate::domain::repositories::{InsertOutcome, OwnerPage, UrlRepository};
use crate::error::AppError;

#[derive(sqlx::FromRow)]
struct ShortUrlRow {
    key: String,
    original_url: String,
    owner_id: String,
    created_at: DateTime<Utc>,
}

impl From<ShortUrlRow> for ShortUrl {
    fn from(r: ShortUrlRow) -> Self {
        ShortUrl::new(r.key, r.original_url, r.owner_id, r.created_at)
    }
}

/// PostgreSQL repository for short URL records.
///
/// Uniqueness of keys and of `(original_url, owner_id)` pairs is enforced by
/// table constraints, so concurrent creators cannot produce duplicates.
pub struct PgUrlRepository {
    pool: Arc<PgPool>,
}

impl PgUrlRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UrlRepository for PgUrlRepository {
    async fn find_by_url_and_owner(
        &self,
        original_url: &str,
        owner_id: &str,
    ) -> Result<Option<ShortUrl>, AppError> {
        let row = sqlx::query_as::<_, ShortUrlRow>(
            r#"
            SELECT key, original_url, owner_id, created_at
            FROM urls
            WHERE original_url = $1 AND owner_id = $2
            "#,
        )
        .bind(original_url)
        .bind(owner_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(ShortUrl::from))
    }

    async fn find_by_key(&self, key: &str) -> Result<Option<String>, AppError> {
        let url = sqlx::query_scalar::<_, String>("SELECT original_url FROM urls WHERE key = $1")
            .bind(key)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(url)
    }

    async fn insert(&self, new_url: NewShortUrl) -> Result<InsertOutcome, AppError> {
        let inserted = sqlx::query_as::<_, ShortUrlRow>(
            r#"
            INSERT INTO urls (key, original_url, owner_id)
            VALUES ($1, $2, $3)
            ON CONFLICT DO NOTHING
            RETURNING key, original_url, owner_id, created_at
            "#,
        )
        .bind(&new_url.key)
        .bind(&new_url.original_url)
        .bind(&new_url.owner_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        if let Some(row) = inserted {
            return Ok(InsertOutcome::Created(row.into()));
        }

        // Nothing written: either the pair already exists or the key is taken.
        match self
            .find_by_url_and_owner(&new_url.original_url, &new_url.owner_id)
            .await?
        {
            Some(existing) => Ok(InsertOutcome::Existing(existing)),
            None => Ok(InsertOutcome::KeyTaken),
        }
    }

    async fn list_by_owner(
        &self,
        owner_id: &str,
        limit: i64,
        offset: i64,
    ) -> Result<OwnerPage, AppError> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM urls WHERE owner_id = $1")
            .bind(owner_id)
            .fetch_one(self.pool.as_ref())
            .await?;

        let rows = sqlx::query_as::<_, ShortUrlRow>(
            r#"
            SELECT key, original_url, owner_id, created_at
            FROM urls
            WHERE owner_id = $1
            ORDER BY created_at DESC, key ASC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(owner_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(OwnerPage {
            total,
            items: rows.into_iter().map(ShortUrl::from).collect(),
        })
    }

    async fn delete(&self, key: &str, owner_id: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM urls WHERE key = $1 AND owner_id = $2")
            .bind(key)
            .bind(owner_id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(self.pool.as_ref()).await?;
        Ok(())
    }
}
