use actix_web::{App, HttpServer, web};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer, filter::LevelFilter};
mod api;
use crate::api::{
    countdown::countdown_config,
    health::health_config,
    lead::{handlers::lead_config, LeadService},
    validation,
};
mod config;
mod db;
mod http;
mod landing;
mod shutdown;
mod worker;
use crate::db::delivery_repository::{DeliveryRepository, DeliveryTarget};
use crate::db::lead_repository::LeadRepository;
use crate::http::AppState;
use crate::shutdown::ShutdownCoordinator;
use crate::worker::{HttpWebhookClient, WebhookWorker};

fn file_layer<S>(log_dir: &str, file_name: &str, level: LevelFilter) -> impl Layer<S>
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    tracing_subscriber::fmt::layer()
        .with_writer(tracing_appender::rolling::daily(log_dir, file_name))
        .with_ansi(false)
        .with_filter(level)
}

/// Console output plus daily rotating files per level:
/// logs/info.log.2025-10-19, logs/error.log.2025-10-19, ...
fn init_tracing(log_dir: &str) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info".into());

    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stdout)
        .with_ansi(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer(log_dir, "info.log", LevelFilter::INFO))
        .with(file_layer(log_dir, "warn.log", LevelFilter::WARN))
        .with(file_layer(log_dir, "error.log", LevelFilter::ERROR))
        .with(file_layer(log_dir, "debug.log", LevelFilter::DEBUG))
        .init();
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load configuration from environment
    let config = config::Config::from_env()
        .expect("Failed to load configuration");

    std::fs::create_dir_all(&config.log_dir)
        .expect("Failed to create logs directory");
    init_tracing(&config.log_dir);

    let pool = db::connection::get_connection(&config.database_url, config.max_db_connections).await
        .expect("Failed to connect to database");

    info!("Starting workshop-landing application");
    info!("Configuration loaded successfully:");
    info!("  - Registration deadline: {}", config.landing.deadline);
    info!(
        "  - Vacancies: {} of {} remaining",
        config.landing.vacancies.remaining, config.landing.vacancies.total
    );
    info!("  - Webhook max attempts: {}", config.webhook_max_attempts);
    info!("  - Max payload size: {} bytes", config.max_payload_size);
    info!("  - Max database connections: {}", config.max_db_connections);
    info!("  - Max concurrent deliveries: {}", config.max_concurrent_deliveries);
    info!("  - Number of workers: {}", config.num_workers);

    db::migrations::run_migrations(&pool).await
        .expect("Failed to run database migrations");

    // watch channel lets every worker observe the same shutdown flag
    let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);

    let webhook_client = Arc::new(
        HttpWebhookClient::new(Duration::from_secs(config.webhook_timeout_secs))
            .expect("Failed to build webhook HTTP client"),
    );
    let delivery_queue = Arc::new(DeliveryRepository::new(pool.clone()));
    let semaphore = Arc::new(Semaphore::new(config.max_concurrent_deliveries));
    let mut worker_handles = Vec::new();

    for worker_id in 1..=config.num_workers {
        let worker = WebhookWorker::new(delivery_queue.clone(), webhook_client.clone());
        let worker_semaphore = semaphore.clone();
        let worker_shutdown_rx = shutdown_rx.clone();

        let handle = tokio::spawn(async move {
            worker.run(worker_id, worker_semaphore, worker_shutdown_rx).await;
        });

        worker_handles.push(handle);
        info!("Spawned webhook worker {}", worker_id);
    }

    let lead_service = web::Data::new(LeadService::new(
        Arc::new(LeadRepository::new(pool.clone())),
        DeliveryTarget {
            url: config.webhook_url.clone(),
            max_attempts: config.webhook_max_attempts,
        },
    ));
    let app_state = web::Data::new(AppState::new(config.landing));
    let server_pool = pool.clone();
    let max_payload_size = config.max_payload_size;

    let server = HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(server_pool.clone()))
            .app_data(lead_service.clone())
            .app_data(app_state.clone())
            .app_data(web::PayloadConfig::default().limit(max_payload_size))
            .app_data(validation::form_config().limit(max_payload_size))
            .app_data(validation::json_config().limit(max_payload_size))
            .configure(health_config)
            .configure(countdown_config)
            .configure(lead_config)
    });

    info!("Server starting on http://{}", config.bind_address);

    let server = server
        .bind(config.bind_address.as_str())?
        .run();

    let server_handle = server.handle();
    let server_task = tokio::spawn(server);

    let coordinator = ShutdownCoordinator::new(
        server_handle,
        server_task,
        worker_handles,
        shutdown_tx,
        pool,
    );

    coordinator.wait_for_shutdown().await
}
