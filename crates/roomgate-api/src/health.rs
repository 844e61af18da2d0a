use axum::Json;

use roomgate_types::api::HealthResponse;

/// Liveness probe. Does not touch the database.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}
