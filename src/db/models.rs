use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

/// Database representation of a lead
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LeadRow {
    pub id: i64,
    pub submission_id: Uuid,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Outcome of recording a lead
#[derive(Debug, Clone)]
pub struct LeadRecord {
    pub lead: LeadRow,
    /// `false` when the submission id was already stored
    pub created: bool,
}

/// Outbox row for a single webhook notification
#[derive(Debug, Clone, FromRow)]
pub struct DeliveryRow {
    pub id: i64,
    pub submission_id: Uuid,
    pub payload: Json<serde_json::Value>,
    pub target_url: String,
    pub status: String,
    /// Attempts made so far, including the one in progress
    pub attempts: i32,
    pub max_attempts: i32,
    pub next_retry_at: DateTime<Utc>,
    pub last_error: Option<String>,
    pub http_status: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DeliveryRow {
    pub fn attempts_exhausted(&self) -> bool {
        self.attempts >= self.max_attempts
    }
}
