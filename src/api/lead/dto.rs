use serde::Serialize;
use uuid::Uuid;

use crate::db::models::LeadRow;

/// Response for a recorded lead
#[derive(Debug, Serialize)]
pub struct LeadResponse {
    pub message: String,
    pub submission_id: Uuid,
    /// `false` when the submission id had already been recorded
    pub created: bool,
    pub lead: LeadRow,
}
