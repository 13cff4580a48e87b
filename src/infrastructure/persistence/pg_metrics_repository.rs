//! PostgreSQL implementation of the metrics repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::NewMetricEvent;
use crate::domain::repositories::{KeyHits, MetricsRepository};
use crate::error::AppError;

#[derive(sqlx::FromRow)]
struct KeyHitsRow {
    key: String,
    hit_count: i64,
}

/// PostgreSQL repository for metric events and their aggregates.
pub struct PgMetricsRepository {
    pool: Arc<PgPool>,
}

impl PgMetricsRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MetricsRepository for PgMetricsRepository {
    async fn record_metric(&self, event: NewMetricEvent) -> Result<bool, AppError> {
        // The owner is looked up and copied in the same statement.
        let result = sqlx::query(
            r#"
            INSERT INTO metrics (key, owner_id, client_ip, response_time)
            SELECT key, owner_id, $2, $3
            FROM urls
            WHERE key = $1
            "#,
        )
        .bind(&event.key)
        .bind(&event.client_ip)
        .bind(event.response_time)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn count_hits(&self, key: &str) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM metrics WHERE key = $1")
            .bind(key)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }

    async fn count_unique_clients(&self, key: &str) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(DISTINCT client_ip) FROM metrics WHERE key = $1",
        )
        .bind(key)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(count)
    }

    async fn average_response_time_by_key(&self, key: &str) -> Result<Option<f64>, AppError> {
        let avg = sqlx::query_scalar::<_, Option<f64>>(
            "SELECT AVG(response_time) FROM metrics WHERE key = $1",
        )
        .bind(key)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(avg)
    }

    async fn average_response_time_by_owner(
        &self,
        owner_id: &str,
    ) -> Result<Option<f64>, AppError> {
        let avg = sqlx::query_scalar::<_, Option<f64>>(
            "SELECT AVG(response_time) FROM metrics WHERE owner_id = $1",
        )
        .bind(owner_id)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(avg)
    }

    async fn top_keys_by_hits(
        &self,
        owner_id: &str,
        limit: i64,
    ) -> Result<Vec<KeyHits>, AppError> {
        let rows = sqlx::query_as::<_, KeyHitsRow>(
            r#"
            SELECT key, COUNT(*) AS hit_count
            FROM metrics
            WHERE owner_id = $1
            GROUP BY key
            ORDER BY hit_count DESC, key ASC
            LIMIT $2
            "#,
        )
        .bind(owner_id)
        .bind(limit)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| KeyHits {
                key: r.key,
                hit_count: r.hit_count,
            })
            .collect())
    }
}
