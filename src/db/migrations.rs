use sqlx::{Pool, Postgres};
use tracing::info;

/// Run all pending database migrations
///
/// Creates the `leads` table and the `webhook_deliveries` outbox. Safe to run
/// on every start; sqlx tracks which migrations have already been applied.
pub async fn run_migrations(pool: &Pool<Postgres>) -> Result<(), sqlx::migrate::MigrateError> {
    info!("Running database migrations...");

    sqlx::migrate!("./migrations")
        .run(pool)
        .await?;

    info!("Database migrations completed successfully");
    Ok(())
}
