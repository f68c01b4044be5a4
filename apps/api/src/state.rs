use std::sync::Arc;

use sqlx::PgPool;

use crate::extraction::Extractor;
use crate::matching::MatchingEngine;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Read-only after startup; scoring holds no locks.
    pub engine: Arc<MatchingEngine>,
    /// Pluggable extraction backend. Default: LlmExtractor.
    pub extractor: Arc<dyn Extractor>,
}
