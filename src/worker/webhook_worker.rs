use chrono::Utc;
use rand::Rng;
use std::sync::Arc;
use tokio::sync::{watch, Semaphore};
use tokio::task::JoinSet;
use tokio::time::{sleep, Duration};
use tracing::{debug, error, info, warn};

use crate::db::delivery_repository::DeliveryQueue;
use crate::db::models::DeliveryRow;
use super::webhook_client::WebhookClient;

/// How long an idle worker waits before polling the outbox again
const POLL_INTERVAL: Duration = Duration::from_secs(2);

/// How long a worker backs off after a database error
const ERROR_BACKOFF: Duration = Duration::from_secs(1);

const BASE_RETRY_SECS: u64 = 30;
const MAX_RETRY_SECS: u64 = 3600;

/// Delay before retrying after the given (1-based) failed attempt:
/// 30s, 60s, 120s, ... capped at one hour
pub fn retry_delay(attempt: i32) -> Duration {
    let exponent = (attempt.max(1) - 1).min(16) as u32;
    let secs = BASE_RETRY_SECS
        .saturating_mul(1u64 << exponent)
        .min(MAX_RETRY_SECS);
    Duration::from_secs(secs)
}

fn jitter() -> Duration {
    Duration::from_millis(rand::thread_rng().gen_range(0..1000))
}

/// Background worker draining the webhook outbox
pub struct WebhookWorker {
    queue: Arc<dyn DeliveryQueue>,
    client: Arc<dyn WebhookClient>,
}

impl WebhookWorker {
    pub fn new(queue: Arc<dyn DeliveryQueue>, client: Arc<dyn WebhookClient>) -> Self {
        Self { queue, client }
    }

    /// Run worker with semaphore-based bounded concurrency
    ///
    /// # Concurrency Model
    /// - A semaphore permit is taken before a delivery is claimed, so rows
    ///   are never claimed faster than they can be sent
    /// - Each claimed delivery is sent on its own task; the permit is released
    ///   when the attempt has been recorded
    /// - Sleeps for `POLL_INTERVAL` when nothing is due
    ///
    /// # Shutdown
    /// Once `shutdown_rx` flips to `true` the worker stops claiming rows and
    /// waits for its in-flight deliveries before returning.
    pub async fn run(
        &self,
        worker_id: u32,
        semaphore: Arc<Semaphore>,
        mut shutdown_rx: watch::Receiver<bool>,
    ) {
        info!("Worker {} started with semaphore-based concurrency", worker_id);
        let mut in_flight = JoinSet::new();

        loop {
            if *shutdown_rx.borrow() {
                break;
            }
            while in_flight.try_join_next().is_some() {}

            let permit = tokio::select! {
                permit = semaphore.clone().acquire_owned() => match permit {
                    Ok(permit) => permit,
                    Err(e) => {
                        error!("Worker {} failed to acquire semaphore: {:?}", worker_id, e);
                        break;
                    }
                },
                _ = shutdown_rx.changed() => break,
            };

            let pause = match self.queue.acquire_next().await {
                Ok(Some(delivery)) => {
                    info!(
                        "Worker {} acquired delivery: id={}, submission_id={}, attempt {}/{}",
                        worker_id,
                        delivery.id,
                        delivery.submission_id,
                        delivery.attempts,
                        delivery.max_attempts
                    );

                    let queue = self.queue.clone();
                    let client = self.client.clone();
                    in_flight.spawn(async move {
                        let id = delivery.id;
                        if let Err(e) = deliver(queue.as_ref(), client.as_ref(), delivery).await {
                            error!("Failed to record outcome of delivery {}: {:?}", id, e);
                        }
                        drop(permit);
                    });
                    None
                }
                Ok(None) => {
                    debug!("Worker {} found no deliveries due, sleeping...", worker_id);
                    Some(POLL_INTERVAL)
                }
                Err(e) => {
                    error!("Worker {} encountered database error: {:?}", worker_id, e);
                    Some(ERROR_BACKOFF)
                }
            };

            if let Some(pause) = pause {
                tokio::select! {
                    _ = sleep(pause) => {}
                    _ = shutdown_rx.changed() => break,
                }
            }
        }

        if !in_flight.is_empty() {
            info!("Worker {} waiting for {} in-flight deliveries", worker_id, in_flight.len());
        }
        while in_flight.join_next().await.is_some() {}
        info!("Worker {} stopped", worker_id);
    }

    /// Claim and send one due delivery inline.
    ///
    /// Returns `false` when nothing was due.
    #[cfg(test)]
    pub async fn process_next(&self) -> Result<bool, sqlx::Error> {
        match self.queue.acquire_next().await? {
            Some(delivery) => {
                deliver(self.queue.as_ref(), self.client.as_ref(), delivery).await?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

/// Send one delivery and record the outcome: delivered, re-queued with
/// backoff, or failed for good once its attempts are used up
async fn deliver(
    queue: &dyn DeliveryQueue,
    client: &dyn WebhookClient,
    delivery: DeliveryRow,
) -> Result<(), sqlx::Error> {
    match client.send(&delivery).await {
        Ok(status) => {
            queue.mark_delivered(delivery.id, i32::from(status)).await?;
            info!(
                "Delivered lead {} to webhook (status={}, attempt {})",
                delivery.submission_id, status, delivery.attempts
            );
        }
        Err(e) if delivery.attempts_exhausted() => {
            queue
                .mark_failed(delivery.id, &e.to_string(), e.http_status(), None)
                .await?;
            error!(
                "Giving up on lead {} after {} attempts: {}",
                delivery.submission_id, delivery.attempts, e
            );
        }
        Err(e) => {
            let delay = retry_delay(delivery.attempts) + jitter();
            let retry_at = Utc::now() + chrono::Duration::milliseconds(delay.as_millis() as i64);
            queue
                .mark_failed(delivery.id, &e.to_string(), e.http_status(), Some(retry_at))
                .await?;
            warn!(
                "Delivery of lead {} failed (attempt {}/{}): {}; retrying at {}",
                delivery.submission_id, delivery.attempts, delivery.max_attempts, e, retry_at
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::lead::{LeadForm, NewLead};
    use crate::db::delivery_repository::DeliveryTarget;
    use crate::db::lead_repository::LeadStore;
    use crate::db::memory::MemoryStore;
    use crate::worker::webhook_client::DeliveryError;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use uuid::Uuid;

    /// Answers with queued outcomes, then with 200
    #[derive(Default)]
    struct ScriptedClient {
        outcomes: Mutex<VecDeque<Result<u16, DeliveryError>>>,
        sent: Mutex<Vec<(String, serde_json::Value)>>,
    }

    impl ScriptedClient {
        fn failing(times: usize) -> Self {
            let client = Self::default();
            {
                let mut outcomes = client.outcomes.lock().unwrap();
                for _ in 0..times {
                    outcomes.push_back(Err(DeliveryError::Status(502)));
                }
            }
            client
        }
    }

    #[async_trait]
    impl WebhookClient for ScriptedClient {
        async fn send(&self, delivery: &DeliveryRow) -> Result<u16, DeliveryError> {
            self.sent
                .lock()
                .unwrap()
                .push((delivery.target_url.clone(), delivery.payload.0.clone()));
            self.outcomes.lock().unwrap().pop_front().unwrap_or(Ok(200))
        }
    }

    async fn store_with_lead(max_attempts: i32) -> Arc<MemoryStore> {
        let store = Arc::new(MemoryStore::default());
        let form = LeadForm {
            submission_id: Uuid::new_v4(),
            name: "Ana Silva".to_string(),
            country_code: "+32".to_string(),
            phone: "470 12 34 56".to_string(),
            email: "ana@example.com".to_string(),
        };
        let target = DeliveryTarget {
            url: "http://hooks.test/lead".to_string(),
            max_attempts,
        };
        store.record_lead(&NewLead::from(&form), &target).await.unwrap();
        store
    }

    #[test]
    fn retry_delay_doubles_and_caps() {
        assert_eq!(retry_delay(0), Duration::from_secs(30));
        assert_eq!(retry_delay(1), Duration::from_secs(30));
        assert_eq!(retry_delay(2), Duration::from_secs(60));
        assert_eq!(retry_delay(4), Duration::from_secs(240));
        assert_eq!(retry_delay(8), Duration::from_secs(3600));
        assert_eq!(retry_delay(i32::MAX), Duration::from_secs(3600));
    }

    #[tokio::test]
    async fn successful_delivery_is_marked_delivered() {
        let store = store_with_lead(5).await;
        let client = Arc::new(ScriptedClient::default());
        let worker = WebhookWorker::new(store.clone(), client.clone());

        assert!(worker.process_next().await.unwrap());
        assert!(!worker.process_next().await.unwrap());

        let delivery = &store.deliveries()[0];
        assert_eq!(delivery.status, "delivered");
        assert_eq!(delivery.http_status, Some(200));
        assert_eq!(delivery.attempts, 1);

        let sent = client.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, "http://hooks.test/lead");
        assert_eq!(sent[0].1["phone"], "+32 470 12 34 56");
    }

    #[tokio::test]
    async fn failed_delivery_is_rescheduled_then_retried() {
        let store = store_with_lead(5).await;
        let worker = WebhookWorker::new(store.clone(), Arc::new(ScriptedClient::failing(1)));

        assert!(worker.process_next().await.unwrap());
        let delivery = store.deliveries()[0].clone();
        assert_eq!(delivery.status, "pending");
        assert_eq!(delivery.http_status, Some(502));
        assert!(delivery.next_retry_at > Utc::now() + chrono::Duration::seconds(29));
        assert!(delivery.last_error.is_some());

        // Not due yet
        assert!(!worker.process_next().await.unwrap());

        store.make_due(delivery.id);
        assert!(worker.process_next().await.unwrap());

        let delivery = &store.deliveries()[0];
        assert_eq!(delivery.status, "delivered");
        assert_eq!(delivery.attempts, 2);
        assert_eq!(delivery.last_error, None);
    }

    #[tokio::test]
    async fn gives_up_after_max_attempts() {
        let store = store_with_lead(2).await;
        let worker = WebhookWorker::new(store.clone(), Arc::new(ScriptedClient::failing(5)));

        assert!(worker.process_next().await.unwrap());
        store.make_due(store.deliveries()[0].id);
        assert!(worker.process_next().await.unwrap());

        let delivery = &store.deliveries()[0];
        assert_eq!(delivery.status, "failed");
        assert_eq!(delivery.attempts, 2);
        assert!(!worker.process_next().await.unwrap());
    }

    #[tokio::test]
    async fn run_delivers_and_stops_on_shutdown() {
        let store = store_with_lead(5).await;
        let worker = WebhookWorker::new(store.clone(), Arc::new(ScriptedClient::default()));
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let semaphore = Arc::new(Semaphore::new(2));

        let handle = tokio::spawn(async move {
            worker.run(1, semaphore, shutdown_rx).await;
        });

        for _ in 0..200 {
            if store.deliveries()[0].status == "delivered" {
                break;
            }
            sleep(Duration::from_millis(10)).await;
        }
        assert_eq!(store.deliveries()[0].status, "delivered");

        shutdown_tx.send(true).unwrap();
        tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .expect("worker did not stop")
            .unwrap();
    }
}
