use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Pool, Postgres};
use tracing::debug;

use crate::db::models::DeliveryRow;

/// Where new deliveries are sent and how often they are tried
#[derive(Debug, Clone)]
pub struct DeliveryTarget {
    pub url: String,
    pub max_attempts: i32,
}

/// Outbox of webhook deliveries consumed by the workers
#[async_trait]
pub trait DeliveryQueue: Send + Sync {
    /// Claim the oldest due delivery, counting the attempt
    async fn acquire_next(&self) -> Result<Option<DeliveryRow>, sqlx::Error>;

    async fn mark_delivered(&self, id: i64, http_status: i32) -> Result<(), sqlx::Error>;

    /// Record a failed attempt. `retry_at` re-queues the delivery; `None`
    /// gives up on it.
    async fn mark_failed(
        &self,
        id: i64,
        error: &str,
        http_status: Option<i32>,
        retry_at: Option<DateTime<Utc>>,
    ) -> Result<(), sqlx::Error>;
}

/// Repository for webhook delivery database operations
#[derive(Clone)]
pub struct DeliveryRepository {
    pool: Pool<Postgres>,
}

impl DeliveryRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DeliveryQueue for DeliveryRepository {
    async fn acquire_next(&self) -> Result<Option<DeliveryRow>, sqlx::Error> {
        // Rows stuck in 'delivering' (worker died mid-call) are reclaimed after 5 minutes
        let row = sqlx::query_as::<_, DeliveryRow>(
            r#"
            UPDATE webhook_deliveries
            SET status = 'delivering', attempts = attempts + 1, updated_at = NOW()
            WHERE id = (
                SELECT id FROM webhook_deliveries
                WHERE (status = 'pending' AND next_retry_at <= NOW())
                   OR (status = 'delivering' AND updated_at < NOW() - INTERVAL '5 minutes')
                ORDER BY next_retry_at ASC
                FOR UPDATE SKIP LOCKED
                LIMIT 1
            )
            RETURNING id, submission_id, payload, target_url, status, attempts, max_attempts,
                      next_retry_at, last_error, http_status, created_at, updated_at
            "#,
        )
        .fetch_optional(&self.pool)
        .await?;

        if let Some(delivery) = &row {
            debug!(
                "Acquired delivery id={} attempt {}/{}",
                delivery.id, delivery.attempts, delivery.max_attempts
            );
        }
        Ok(row)
    }

    async fn mark_delivered(&self, id: i64, http_status: i32) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            UPDATE webhook_deliveries
            SET status = 'delivered', http_status = $2, last_error = NULL, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(http_status)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn mark_failed(
        &self,
        id: i64,
        error: &str,
        http_status: Option<i32>,
        retry_at: Option<DateTime<Utc>>,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            UPDATE webhook_deliveries
            SET status = CASE WHEN $4::timestamptz IS NULL THEN 'failed' ELSE 'pending' END,
                next_retry_at = COALESCE($4, next_retry_at),
                last_error = $2,
                http_status = $3,
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(error)
        .bind(http_status)
        .bind(retry_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
