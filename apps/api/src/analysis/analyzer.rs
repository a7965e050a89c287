use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::analysis::payload::AnalysisPayload;
use crate::llm_client::LlmError;

/// Message shown when the service fails without saying why.
pub const FALLBACK_MESSAGE: &str = "Analysis failed";

/// Body of `POST /analyze`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    pub text: String,
}

#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The service answered with an error status; carries its `error` message.
    #[error("{0}")]
    Rejected(String),

    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    /// A success response whose body is not a JSON object.
    #[error("Analysis failed: {0}")]
    Malformed(#[source] serde_json::Error),

    /// The model replied with something that is not a JSON object.
    #[error("Invalid response from AI model")]
    InvalidResponse,

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),
}

/// Anything that turns text into an analysis payload: the HTTP client of a
/// remote service, or the LLM-backed analyzer behind that service.
///
/// Carried in `AppState` as `Arc<dyn Analyzer>`.
#[async_trait]
pub trait Analyzer: Send + Sync {
    async fn analyze(&self, text: &str) -> Result<AnalysisPayload, AnalysisError>;
}

#[async_trait]
impl<T: Analyzer + ?Sized> Analyzer for Arc<T> {
    async fn analyze(&self, text: &str) -> Result<AnalysisPayload, AnalysisError> {
        (**self).analyze(text).await
    }
}
