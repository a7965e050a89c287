//! Analysis domain: the payload the service returns, how it is flattened for
//! display, and the analyzers that produce it.

pub mod analyzer;
pub mod client;
pub mod handlers;
pub mod llm;
pub mod normalize;
pub mod payload;
pub mod prompts;

pub use analyzer::{AnalysisError, AnalyzeRequest, Analyzer, FALLBACK_MESSAGE};
pub use client::HttpAnalysisClient;
pub use llm::LlmAnalyzer;
pub use normalize::{normalize, radar_series, NormalizedCategory, RadarPoint};
pub use payload::{AnalysisPayload, CategoryScore, NamedCategoryScore, FIXED_CATEGORIES};
