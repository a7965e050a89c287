use async_trait::async_trait;
use tracing::{info, warn};

use crate::analysis::analyzer::{AnalysisError, Analyzer};
use crate::analysis::payload::AnalysisPayload;
use crate::analysis::prompts::build_analysis_prompt;
use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::{LlmClient, LlmError};

/// Scores text by asking the LLM for a JSON verdict.
pub struct LlmAnalyzer {
    llm: LlmClient,
}

impl LlmAnalyzer {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl Analyzer for LlmAnalyzer {
    async fn analyze(&self, text: &str) -> Result<AnalysisPayload, AnalysisError> {
        let prompt = build_analysis_prompt(text);
        match self
            .llm
            .call_json::<AnalysisPayload>(&prompt, JSON_ONLY_SYSTEM)
            .await
        {
            Ok(payload) => {
                info!(fields = payload.as_map().len(), "Analysis completed");
                Ok(payload)
            }
            Err(LlmError::Parse(e)) => {
                warn!("Could not parse JSON from model response: {e}");
                Err(AnalysisError::InvalidResponse)
            }
            Err(e) => Err(e.into()),
        }
    }
}
