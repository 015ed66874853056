//! In-memory stand-ins for the Postgres repositories, used by tests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use std::sync::Mutex;

use crate::api::lead::NewLead;
use crate::db::delivery_repository::{DeliveryQueue, DeliveryTarget};
use crate::db::lead_repository::LeadStore;
use crate::db::models::{DeliveryRow, LeadRecord, LeadRow};

#[derive(Default)]
struct Tables {
    leads: Vec<LeadRow>,
    deliveries: Vec<DeliveryRow>,
}

#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
    unavailable: Mutex<bool>,
}

impl MemoryStore {
    /// Make every subsequent call fail as if the database were down
    pub fn set_unavailable(&self, unavailable: bool) {
        *self.unavailable.lock().unwrap() = unavailable;
    }

    pub fn leads(&self) -> Vec<LeadRow> {
        self.tables.lock().unwrap().leads.clone()
    }

    pub fn deliveries(&self) -> Vec<DeliveryRow> {
        self.tables.lock().unwrap().deliveries.clone()
    }

    /// Make a re-queued delivery due now
    pub fn make_due(&self, id: i64) {
        let mut tables = self.tables.lock().unwrap();
        if let Some(row) = tables.deliveries.iter_mut().find(|d| d.id == id) {
            row.next_retry_at = Utc::now();
        }
    }

    fn check(&self) -> Result<(), sqlx::Error> {
        if *self.unavailable.lock().unwrap() {
            return Err(sqlx::Error::PoolClosed);
        }
        Ok(())
    }
}

#[async_trait]
impl LeadStore for MemoryStore {
    async fn record_lead(
        &self,
        new_lead: &NewLead,
        target: &DeliveryTarget,
    ) -> Result<LeadRecord, sqlx::Error> {
        self.check()?;
        let mut tables = self.tables.lock().unwrap();

        if let Some(existing) = tables
            .leads
            .iter()
            .find(|l| l.submission_id == new_lead.submission_id)
        {
            return Ok(LeadRecord { lead: existing.clone(), created: false });
        }

        let now = Utc::now();
        let lead = LeadRow {
            id: tables.leads.len() as i64 + 1,
            submission_id: new_lead.submission_id,
            name: new_lead.lead.name.clone(),
            phone: new_lead.lead.phone.clone(),
            email: new_lead.lead.email.clone(),
            created_at: now,
        };
        tables.leads.push(lead.clone());

        let delivery = DeliveryRow {
            id: tables.deliveries.len() as i64 + 1,
            submission_id: new_lead.submission_id,
            payload: Json(serde_json::to_value(&new_lead.lead).unwrap()),
            target_url: target.url.clone(),
            status: "pending".to_string(),
            attempts: 0,
            max_attempts: target.max_attempts,
            next_retry_at: now,
            last_error: None,
            http_status: None,
            created_at: now,
            updated_at: now,
        };
        tables.deliveries.push(delivery);

        Ok(LeadRecord { lead, created: true })
    }
}

#[async_trait]
impl DeliveryQueue for MemoryStore {
    async fn acquire_next(&self) -> Result<Option<DeliveryRow>, sqlx::Error> {
        self.check()?;
        let now = Utc::now();
        let mut tables = self.tables.lock().unwrap();

        let next = tables
            .deliveries
            .iter_mut()
            .filter(|d| d.status == "pending" && d.next_retry_at <= now)
            .min_by_key(|d| d.next_retry_at);

        Ok(next.map(|row| {
            row.status = "delivering".to_string();
            row.attempts += 1;
            row.updated_at = now;
            row.clone()
        }))
    }

    async fn mark_delivered(&self, id: i64, http_status: i32) -> Result<(), sqlx::Error> {
        self.check()?;
        let mut tables = self.tables.lock().unwrap();
        let row = tables
            .deliveries
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or(sqlx::Error::RowNotFound)?;
        row.status = "delivered".to_string();
        row.http_status = Some(http_status);
        row.last_error = None;
        Ok(())
    }

    async fn mark_failed(
        &self,
        id: i64,
        error: &str,
        http_status: Option<i32>,
        retry_at: Option<DateTime<Utc>>,
    ) -> Result<(), sqlx::Error> {
        self.check()?;
        let mut tables = self.tables.lock().unwrap();
        let row = tables
            .deliveries
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or(sqlx::Error::RowNotFound)?;
        match retry_at {
            Some(at) => {
                row.status = "pending".to_string();
                row.next_retry_at = at;
            }
            None => row.status = "failed".to_string(),
        }
        row.last_error = Some(error.to_string());
        row.http_status = http_status;
        Ok(())
    }
}
