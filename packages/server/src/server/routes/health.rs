use axum::{extract::Extension, http::StatusCode, Json};
use serde::Serialize;

use crate::server::app::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    directory_backend: String,
    database: DatabaseHealth,
}

#[derive(Serialize)]
pub struct DatabaseHealth {
    status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Health check endpoint
///
/// Reports the configured directory backend and, when a database is configured,
/// its responsiveness. Returns 503 if the database check fails.
pub async fn health_handler(
    Extension(state): Extension<AppState>,
) -> (StatusCode, Json<HealthResponse>) {
    let db_health = match &state.deps.db_pool {
        None => DatabaseHealth {
            status: "disabled".to_string(),
            error: None,
        },
        Some(pool) => match tokio::time::timeout(
            std::time::Duration::from_secs(5),
            sqlx::query("SELECT 1").execute(pool),
        )
        .await
        {
            Ok(Ok(_)) => DatabaseHealth {
                status: "ok".to_string(),
                error: None,
            },
            Ok(Err(e)) => DatabaseHealth {
                status: "error".to_string(),
                error: Some(format!("Query failed: {}", e)),
            },
            Err(_) => DatabaseHealth {
                status: "error".to_string(),
                error: Some("Query timeout (>5s)".to_string()),
            },
        },
    };

    let is_healthy = db_health.status != "error";

    let status_code = if is_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status_code,
        Json(HealthResponse {
            status: if is_healthy { "healthy" } else { "unhealthy" }.to_string(),
            directory_backend: state.deps.directory.name().to_string(),
            database: db_health,
        }),
    )
}
