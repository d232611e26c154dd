mod analysis;
mod config;
mod db;
mod errors;
mod models;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::scoring::{Scorer, ScoreThresholds, ScoreWeights};
use crate::analysis::vocabulary::{FuzzySkillMatcher, Vocabulary};
use crate::analysis::Analyzer;
use crate::config::Config;
use crate::db::create_pool;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resumatch API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config).await?;

    // Build the analysis engine: skill vocabulary, fuzzy matcher, scorer
    let scorer = Scorer::new(
        ScoreWeights::default(),
        ScoreThresholds {
            strong: config.strong_score_threshold,
            weak: config.weak_score_threshold,
            ..ScoreThresholds::default()
        },
    );
    let analyzer = Arc::new(Analyzer::new(
        Arc::new(Vocabulary::builtin()),
        Arc::new(FuzzySkillMatcher::default()),
        scorer,
    ));
    info!("Analysis engine initialized");

    let state = AppState {
        db,
        config: config.clone(),
        analyzer,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
