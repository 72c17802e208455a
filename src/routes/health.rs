use axum::{extract::State, http::StatusCode, response::Json};

use crate::models::HealthResponse;
use crate::state::AppState;

/// GET /health - Liveness plus a round trip to the cache database
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let (status, label) = match sqlx::query("SELECT 1").execute(&state.pool).await {
        Ok(_) => (StatusCode::OK, "ok"),
        Err(e) => {
            tracing::error!("Health check could not reach the database: {}", e);
            (StatusCode::SERVICE_UNAVAILABLE, "database unavailable")
        }
    };

    let response = HealthResponse {
        status: label.to_string(),
        timestamp: chrono::Utc::now().timestamp(),
    };

    (status, Json(response))
}
