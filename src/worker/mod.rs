pub mod webhook_client;
pub mod webhook_worker;

pub use webhook_client::HttpWebhookClient;
pub use webhook_worker::WebhookWorker;
