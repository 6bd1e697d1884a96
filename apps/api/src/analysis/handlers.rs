//! Axum route handlers for the Analysis API.

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::analysis::report::AnalysisReport;
use crate::errors::AppError;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub resume_text: String,
}

#[derive(Debug, Deserialize)]
pub struct NormalizeRequest {
    pub raw_text: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/analysis
///
/// Sends the resume text to the LLM and returns the normalized analysis.
/// Poor model output still yields 200 with `stage: "default"`.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalysisReport>, AppError> {
    let processed = state.analyzer.analyze(&request.resume_text).await?;
    Ok(Json(AnalysisReport::from(processed)))
}

/// POST /api/v1/analysis/normalize
///
/// Runs captured model output through the normalization pipeline only.
pub async fn handle_normalize(
    State(state): State<AppState>,
    Json(request): Json<NormalizeRequest>,
) -> Result<Json<AnalysisReport>, AppError> {
    if request.raw_text.trim().is_empty() {
        return Err(AppError::Validation("raw_text cannot be empty".to_string()));
    }

    let processed = state.analyzer.normalize(&request.raw_text);
    Ok(Json(AnalysisReport::from(processed)))
}
