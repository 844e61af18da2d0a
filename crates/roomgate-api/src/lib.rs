pub mod auth;
pub mod config;
pub mod error;
pub mod health;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use auth::{AppState, AppStateInner};
pub use config::Config;
pub use error::ApiError;

/// All routes of the service, with CORS and request tracing applied.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/register", post(auth::register))
        .route("/getToken", post(auth::get_token))
        .route("/health", get(health::health))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
