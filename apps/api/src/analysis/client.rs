use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::analysis::analyzer::{AnalysisError, AnalyzeRequest, Analyzer, FALLBACK_MESSAGE};
use crate::analysis::payload::AnalysisPayload;

/// Client of a remote `POST /analyze` endpoint.
///
/// One request per call: no retry, no timeout beyond the transport's own.
#[derive(Clone)]
pub struct HttpAnalysisClient {
    client: Client,
    endpoint: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

impl HttpAnalysisClient {
    /// `base_url` is the service root, e.g. `http://127.0.0.1:8080`.
    pub fn new(base_url: &str) -> Result<Self, AnalysisError> {
        Ok(Self {
            client: Client::builder().build()?,
            endpoint: format!("{}/analyze", base_url.trim_end_matches('/')),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Analyzer for HttpAnalysisClient {
    async fn analyze(&self, text: &str) -> Result<AnalysisPayload, AnalysisError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&AnalyzeRequest {
                text: text.to_string(),
            })
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        debug!(status = status.as_u16(), bytes = body.len(), "Analyze response");

        if !status.is_success() {
            return Err(AnalysisError::Rejected(error_message(&body)));
        }

        serde_json::from_str(&body).map_err(AnalysisError::Malformed)
    }
}

/// The service's `error` string, or the generic fallback when there is none.
fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| FALLBACK_MESSAGE.to_string())
}
