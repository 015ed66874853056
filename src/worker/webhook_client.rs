use async_trait::async_trait;
use std::fmt;
use std::time::Duration;

use crate::db::models::DeliveryRow;

/// Why a single delivery attempt did not succeed
#[derive(Debug)]
pub enum DeliveryError {
    /// Connection, TLS, timeout or body encoding failure
    Transport(String),

    /// Receiver answered with a non-2xx status
    Status(u16),
}

impl DeliveryError {
    pub fn http_status(&self) -> Option<i32> {
        match self {
            DeliveryError::Transport(_) => None,
            DeliveryError::Status(code) => Some(i32::from(*code)),
        }
    }
}

impl fmt::Display for DeliveryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeliveryError::Transport(msg) => write!(f, "Transport error: {}", msg),
            DeliveryError::Status(code) => write!(f, "Webhook responded with status {}", code),
        }
    }
}

impl std::error::Error for DeliveryError {}

/// Sends one outbox row to its target
#[async_trait]
pub trait WebhookClient: Send + Sync {
    /// Returns the HTTP status of a successful (2xx) delivery
    async fn send(&self, delivery: &DeliveryRow) -> Result<u16, DeliveryError>;
}

/// `reqwest` implementation posting the lead payload as JSON
pub struct HttpWebhookClient {
    client: reqwest::Client,
}

impl HttpWebhookClient {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl WebhookClient for HttpWebhookClient {
    async fn send(&self, delivery: &DeliveryRow) -> Result<u16, DeliveryError> {
        // The response body is not inspected; only the status matters
        let response = self
            .client
            .post(&delivery.target_url)
            .header("Idempotency-Key", delivery.submission_id.to_string())
            .json(&delivery.payload.0)
            .send()
            .await
            .map_err(|e| DeliveryError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            Ok(status.as_u16())
        } else {
            Err(DeliveryError::Status(status.as_u16()))
        }
    }
}
