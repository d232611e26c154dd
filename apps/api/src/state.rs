use std::sync::Arc;

use sqlx::PgPool;

use crate::analysis::Analyzer;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Config,
    /// Analysis engine. Holds the read-only skill vocabulary, built once at
    /// startup and shared across concurrent requests.
    pub analyzer: Arc<Analyzer>,
}
