use std::sync::Arc;

use crate::analysis::Analyzer;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable analyzer. The server binary wires in `LlmAnalyzer`; tests use canned ones.
    pub analyzer: Arc<dyn Analyzer>,
}
