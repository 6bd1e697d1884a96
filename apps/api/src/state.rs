use crate::analysis::analyzer::ResumeAnalyzer;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// LLM-backed analyzer: the pluggable `ChatCompleter` plus the stateless pipeline.
    pub analyzer: ResumeAnalyzer,
}
