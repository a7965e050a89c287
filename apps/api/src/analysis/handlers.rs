//! Axum route handlers for the analysis API.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use tracing::info;

use crate::analysis::analyzer::AnalyzeRequest;
use crate::analysis::payload::AnalysisPayload;
use crate::errors::AppError;
use crate::state::AppState;

/// POST /analyze
pub async fn handle_analyze(
    State(state): State<AppState>,
    req: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalysisPayload>, AppError> {
    let Json(req) = req.map_err(|e| AppError::Validation(e.body_text()))?;
    if req.text.trim().is_empty() {
        return Err(AppError::Validation("text must not be empty".to_string()));
    }

    info!(chars = req.text.chars().count(), "Analyzing text");
    let payload = state.analyzer.analyze(&req.text).await?;
    Ok(Json(payload))
}
