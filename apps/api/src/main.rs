use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use ats_api::config::{Config, LogFormat};
use ats_api::db::create_pool;
use ats_api::extraction::LlmExtractor;
use ats_api::llm_client::LlmClient;
use ats_api::matching::MatchingEngine;
use ats_api::routes::build_router;
use ats_api::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing or malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "{}={},tower_http=info",
            env!("CARGO_CRATE_NAME"),
            &config.rust_log
        ))
    });
    let (pretty, json) = match config.log_format {
        LogFormat::Pretty => (Some(tracing_subscriber::fmt::layer()), None),
        LogFormat::Json => (None, Some(tracing_subscriber::fmt::layer().json())),
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(pretty)
        .with(json)
        .init();

    info!("Starting ATS API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL (creates match_history if missing)
    let db = create_pool(&config.database_url).await?;

    // Initialize LLM-backed extraction
    let llm = LlmClient::new(
        config.llm_api_url.clone(),
        config.llm_api_key.clone(),
        config.llm_model.clone(),
    )
    .context("Failed to build LLM client")?;
    info!("LLM client initialized (model: {})", llm.model());
    let extractor = Arc::new(LlmExtractor::new(llm));

    // Initialize matching engine
    let engine = MatchingEngine::new(config.matching.clone())
        .context("Matching configuration is invalid")?;
    info!(
        skills_weight = config.matching.blend.skills_weight,
        alignment_weight = config.matching.blend.alignment_weight,
        relevance_threshold = config.matching.relevance_threshold,
        strategy = ?config.matching.strategy,
        "Matching engine ready"
    );

    let state = AppState {
        db,
        engine: Arc::new(engine),
        extractor,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the frontend host is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
