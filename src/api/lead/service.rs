use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use std::fmt;
use std::sync::Arc;
use tracing::{error, info, warn};
use validator::{Validate, ValidationErrors};

use crate::api::validation::ErrorResponse;
use crate::db::delivery_repository::DeliveryTarget;
use crate::db::lead_repository::LeadStore;
use crate::landing::form::SUBMIT_ERROR_MESSAGE;
use super::dto::LeadResponse;
use super::models::{LeadForm, NewLead};

/// Service-level errors
#[derive(Debug)]
pub enum ServiceError {
    /// Database operation failed
    DatabaseError(sqlx::Error),

    /// Validation failed
    ValidationError(String),
}

impl ServiceError {
    fn from_validation(errors: &ValidationErrors) -> Self {
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by(|a, b| a.0.cmp(&b.0));

        let messages: Vec<String> = fields
            .into_iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |e| {
                    e.message
                        .as_ref()
                        .map(|m| format!("{}: {}", field, m))
                        .unwrap_or_else(|| format!("Validation error in field: {}", field))
                })
            })
            .collect();

        ServiceError::ValidationError(messages.join("; "))
    }
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::DatabaseError(e) => write!(f, "Database error: {}", e),
            ServiceError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
        }
    }
}

impl std::error::Error for ServiceError {}

impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ServiceError::ValidationError(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            ServiceError::DatabaseError(e) => {
                error!("Database error: {}", e);
                HttpResponse::InternalServerError().json(ErrorResponse {
                    error: "Failed to process request".to_string(),
                    fields: serde_json::json!({"message": SUBMIT_ERROR_MESSAGE}),
                })
            }
            ServiceError::ValidationError(msg) => {
                warn!("Validation error: {}", msg);
                HttpResponse::BadRequest().json(ErrorResponse {
                    error: "Validation failed".to_string(),
                    fields: serde_json::json!({"message": msg}),
                })
            }
        }
    }
}

/// Lead service containing the submission logic
pub struct LeadService {
    store: Arc<dyn LeadStore>,
    target: DeliveryTarget,
}

impl LeadService {
    pub fn new(store: Arc<dyn LeadStore>, target: DeliveryTarget) -> Self {
        Self { store, target }
    }

    /// Submit a lead
    ///
    /// # Business Logic
    /// - Validates the form
    /// - Joins country code and phone into the stored phone number
    /// - Stores the lead and enqueues its webhook delivery atomically
    /// - Re-submitting the same `submission_id` is a no-op returning the stored lead
    ///
    /// # Returns
    /// - `Ok(LeadResponse)` - Lead recorded (or already recorded)
    /// - `Err(ServiceError)` - Validation or storage failed
    pub async fn submit(&self, form: &LeadForm) -> Result<LeadResponse, ServiceError> {
        form.validate()
            .map_err(|errors| ServiceError::from_validation(&errors))?;

        let new_lead = NewLead::from(form);
        info!("Service: Recording lead submission_id={}", new_lead.submission_id);

        let record = self
            .store
            .record_lead(&new_lead, &self.target)
            .await
            .map_err(ServiceError::DatabaseError)?;

        let message = if record.created {
            info!(
                "Service: Lead {} stored with id={}, webhook delivery enqueued",
                new_lead.submission_id, record.lead.id
            );
            "Lead created successfully"
        } else {
            warn!(
                "Service: Duplicate submission {} ignored (lead id={})",
                new_lead.submission_id, record.lead.id
            );
            "Lead already recorded"
        };

        Ok(LeadResponse {
            message: message.to_string(),
            submission_id: new_lead.submission_id,
            created: record.created,
            lead: record.lead,
        })
    }
}
