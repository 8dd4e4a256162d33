mod analysis;
mod config;
mod errors;
mod models;
mod routes;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::sync::Arc;

use crate::analysis::engine::KeywordCompatibilityScorer;
use crate::analysis::vocabulary::Vocabulary;
use crate::config::Config;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume Fit API v{}", env!("CARGO_PKG_VERSION"));

    // Load skill vocabulary once; shared read-only by every request
    let vocabulary = match &config.skill_vocabulary_path {
        Some(path) => Vocabulary::from_json_file(path)
            .with_context(|| format!("Failed to load skill vocabulary from {}", path.display()))?,
        None => {
            info!("Using built-in skill vocabulary");
            Vocabulary::default()
        }
    };

    let scorer = Arc::new(KeywordCompatibilityScorer::new(
        Arc::new(vocabulary),
        config.engine_config(),
    ));
    info!(
        "Compatibility scorer ready: {}% required skills, {}-char level window",
        scorer.config().required_share_percent,
        scorer.config().level_context_window
    );

    let state = AppState { scorer };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the web UI has a fixed host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
