use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::{Pool, Postgres};
use tracing::debug;

use crate::api::lead::NewLead;
use crate::db::delivery_repository::DeliveryTarget;
use crate::db::models::{LeadRecord, LeadRow};

/// Persistence for submitted leads
#[async_trait]
pub trait LeadStore: Send + Sync {
    /// Store a lead together with its pending webhook delivery.
    ///
    /// Idempotent on `submission_id`: a repeated id returns the stored lead
    /// with `created = false` and enqueues nothing.
    async fn record_lead(
        &self,
        lead: &NewLead,
        target: &DeliveryTarget,
    ) -> Result<LeadRecord, sqlx::Error>;
}

/// Repository for lead database operations
#[derive(Clone)]
pub struct LeadRepository {
    pool: Pool<Postgres>,
}

impl LeadRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LeadStore for LeadRepository {
    async fn record_lead(
        &self,
        new_lead: &NewLead,
        target: &DeliveryTarget,
    ) -> Result<LeadRecord, sqlx::Error> {
        debug!("Recording lead: submission_id={}", new_lead.submission_id);

        let mut tx = self.pool.begin().await?;

        let inserted = sqlx::query_as::<_, LeadRow>(
            r#"
            INSERT INTO leads (submission_id, name, phone, email)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (submission_id) DO NOTHING
            RETURNING id, submission_id, name, phone, email, created_at
            "#,
        )
        .bind(new_lead.submission_id)
        .bind(&new_lead.lead.name)
        .bind(&new_lead.lead.phone)
        .bind(&new_lead.lead.email)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(lead) = inserted else {
            let existing = sqlx::query_as::<_, LeadRow>(
                r#"
                SELECT id, submission_id, name, phone, email, created_at
                FROM leads
                WHERE submission_id = $1
                "#,
            )
            .bind(new_lead.submission_id)
            .fetch_one(&mut *tx)
            .await?;
            tx.commit().await?;

            debug!("Lead already recorded with id={}", existing.id);
            return Ok(LeadRecord { lead: existing, created: false });
        };

        sqlx::query(
            r#"
            INSERT INTO webhook_deliveries (submission_id, payload, target_url, max_attempts)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (submission_id) DO NOTHING
            "#,
        )
        .bind(new_lead.submission_id)
        .bind(Json(&new_lead.lead))
        .bind(&target.url)
        .bind(target.max_attempts)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        debug!("Lead created with id={} and delivery enqueued", lead.id);
        Ok(LeadRecord { lead, created: true })
    }
}
