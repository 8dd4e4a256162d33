use std::sync::Arc;

use crate::analysis::engine::CompatibilityScorer;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable compatibility scorer. Default: KeywordCompatibilityScorer.
    /// Read-only; every request gets an independent analysis.
    pub scorer: Arc<dyn CompatibilityScorer>,
}
