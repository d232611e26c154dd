pub mod health;

use axum::extract::DefaultBodyLimit;
use axum::{
    routing::{get, post},
    Router,
};

use crate::analysis::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/analyze", post(handlers::handle_analyze))
        .route("/api/v1/analyses", get(handlers::handle_history))
        .route("/api/v1/analyses/:id", get(handlers::handle_get_analysis))
        .layer(DefaultBodyLimit::max(state.config.max_upload_bytes))
        .with_state(state)
}
