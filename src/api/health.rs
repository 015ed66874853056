use actix_web::{HttpResponse, Responder, get, web};
use serde::Serialize;
use sqlx::{Pool, Postgres};
use tracing::error;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    database: &'static str,
    /// Webhook deliveries waiting to be sent or retried
    #[serde(skip_serializing_if = "Option::is_none")]
    pending_deliveries: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl HealthResponse {
    fn down(status: &'static str, err: &sqlx::Error) -> Self {
        Self {
            status,
            database: "disconnected",
            pending_deliveries: None,
            error: Some(format!("Database unavailable: {}", err)),
        }
    }
}

/// Health check including database connectivity and the outbox backlog.
#[get("/health")]
async fn health_check(pool: web::Data<Pool<Postgres>>) -> impl Responder {
    let backlog: Result<i64, sqlx::Error> = sqlx::query_scalar(
        "SELECT COUNT(*) FROM webhook_deliveries WHERE status IN ('pending', 'delivering')",
    )
    .fetch_one(pool.get_ref())
    .await;

    match backlog {
        Ok(pending) => HttpResponse::Ok().json(HealthResponse {
            status: "healthy",
            database: "connected",
            pending_deliveries: Some(pending),
            error: None,
        }),
        Err(e) => {
            error!("Health check failed: {:?}", e);
            HttpResponse::ServiceUnavailable().json(HealthResponse::down("unhealthy", &e))
        }
    }
}

/// Readiness probe: 503 while the database is unreachable.
#[get("/ready")]
async fn readiness_check(pool: web::Data<Pool<Postgres>>) -> impl Responder {
    match sqlx::query("SELECT 1").execute(pool.get_ref()).await {
        Ok(_) => HttpResponse::Ok().json(HealthResponse {
            status: "ready",
            database: "connected",
            pending_deliveries: None,
            error: None,
        }),
        Err(e) => {
            error!("Readiness check failed: database unavailable: {:?}", e);
            HttpResponse::ServiceUnavailable().json(HealthResponse::down("not_ready", &e))
        }
    }
}

/// Liveness probe. Does not check dependencies.
#[get("/live")]
async fn liveness_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "alive",
        database: "not_checked",
        pending_deliveries: None,
        error: None,
    })
}

pub fn health_config(config: &mut web::ServiceConfig) {
    config
        .service(health_check)
        .service(readiness_check)
        .service(liveness_check);
}
