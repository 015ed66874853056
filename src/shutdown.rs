use actix_web::dev::ServerHandle;
use sqlx::{Pool, Postgres};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// Orchestrates graceful shutdown of the landing service
///
/// Order matters: the HTTP server stops first so no new leads are recorded,
/// then webhook workers finish the deliveries they already claimed, and only
/// then is the pool closed. Unsent deliveries stay in the outbox for the next
/// start.
pub struct ShutdownCoordinator {
    server_handle: ServerHandle,
    server_task: JoinHandle<Result<(), std::io::Error>>,
    worker_handles: Vec<JoinHandle<()>>,
    shutdown_tx: watch::Sender<bool>,
    pool: Pool<Postgres>,
}

impl ShutdownCoordinator {
    pub fn new(
        server_handle: ServerHandle,
        server_task: JoinHandle<Result<(), std::io::Error>>,
        worker_handles: Vec<JoinHandle<()>>,
        shutdown_tx: watch::Sender<bool>,
        pool: Pool<Postgres>,
    ) -> Self {
        Self {
            server_handle,
            server_task,
            worker_handles,
            shutdown_tx,
            pool,
        }
    }

    /// Wait for CTRL+C or SIGTERM, then shut everything down
    pub async fn wait_for_shutdown(self) -> Result<(), std::io::Error> {
        let signal = wait_for_signal().await;
        info!("Received {}, initiating graceful shutdown...", signal);
        self.shutdown().await
    }

    async fn shutdown(self) -> Result<(), std::io::Error> {
        info!("Stopping HTTP server (no longer accepting new leads)...");
        self.server_handle.stop(true).await;

        info!("Signaling webhook workers to stop claiming deliveries...");
        if let Err(e) = self.shutdown_tx.send(true) {
            error!("Failed to send shutdown signal to workers: {:?}", e);
        }

        let num_workers = self.worker_handles.len();
        info!("Waiting for {} workers to finish in-flight deliveries...", num_workers);
        for (i, handle) in self.worker_handles.into_iter().enumerate() {
            if let Err(e) = handle.await {
                error!("Worker {} failed to stop: {:?}", i + 1, e);
            }
        }
        info!("All workers stopped");

        let server_result = match self.server_task.await {
            Ok(result) => result,
            Err(e) => {
                error!("HTTP server task panicked: {:?}", e);
                Ok(())
            }
        };
        if let Err(e) = &server_result {
            error!("HTTP server encountered error during shutdown: {:?}", e);
        }

        info!("Closing database connection pool...");
        self.pool.close().await;

        info!("Graceful shutdown completed");
        server_result
    }
}

/// Resolve with the name of the first termination signal received
async fn wait_for_signal() -> &'static str {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for CTRL+C: {:?}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {:?}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => "CTRL+C",
        _ = terminate => "SIGTERM",
    }
}
