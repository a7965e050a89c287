/// LLM Client — the only module that talks to the Anthropic Messages API.
///
/// The analysis service builds its prompt elsewhere and hands it here; this
/// module owns transport, retries and turning the model's reply into JSON.
use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub mod prompts;

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
/// Model used for every analysis. Hardcoded so scores stay comparable over time.
pub const MODEL: &str = "claude-sonnet-4-5";
const MAX_TOKENS: u32 = 2048;
const MAX_ATTEMPTS: u32 = 3;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);
const BASE_BACKOFF: Duration = Duration::from_secs(1);

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("LLM returned empty content")]
    EmptyContent,
}

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: [Message<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct LlmResponse {
    pub content: Vec<ContentBlock>,
    pub usage: Usage,
}

#[derive(Debug, Deserialize)]
pub struct ContentBlock {
    #[serde(rename = "type")]
    pub block_type: String,
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

impl LlmResponse {
    /// Text of the first text block.
    pub fn text(&self) -> Option<&str> {
        self.content
            .iter()
            .find(|b| b.block_type == "text")
            .and_then(|b| b.text.as_deref())
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Outcome of a single HTTP attempt.
enum Attempt {
    Done(LlmResponse),
    Retry(LlmError),
}

#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
    api_url: String,
    backoff: Duration,
}

impl LlmClient {
    pub fn new(api_key: String) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder().timeout(REQUEST_TIMEOUT).build()?,
            api_key,
            api_url: ANTHROPIC_API_URL.to_string(),
            backoff: BASE_BACKOFF,
        })
    }

    /// Points the client at another Messages-compatible endpoint.
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    #[cfg(test)]
    fn with_backoff(mut self, backoff: Duration) -> Self {
        self.backoff = backoff;
        self
    }

    /// Sends one prompt. 429 and 5xx responses are retried with exponential
    /// backoff (1s, 2s); other failures return immediately.
    pub async fn call(&self, prompt: &str, system: &str) -> Result<LlmResponse, LlmError> {
        let body = MessagesRequest {
            model: MODEL,
            max_tokens: MAX_TOKENS,
            system,
            messages: [Message {
                role: "user",
                content: prompt,
            }],
        };

        let mut failures = 0;
        loop {
            match self.attempt(&body).await? {
                Attempt::Done(response) => {
                    debug!(
                        input_tokens = response.usage.input_tokens,
                        output_tokens = response.usage.output_tokens,
                        "LLM call succeeded"
                    );
                    return Ok(response);
                }
                Attempt::Retry(e) => {
                    failures += 1;
                    if failures >= MAX_ATTEMPTS {
                        return Err(e);
                    }
                    let delay = self.backoff * 2u32.pow(failures - 1);
                    warn!(
                        attempt = failures,
                        delay_ms = delay.as_millis() as u64,
                        "Retrying LLM call"
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }

    async fn attempt(&self, body: &MessagesRequest<'_>) -> Result<Attempt, LlmError> {
        let response = match self
            .client
            .post(&self.api_url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(body)
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => return Ok(Attempt::Retry(LlmError::Http(e))),
        };

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
            let message = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "LLM API unavailable: {message}");
            return Ok(Attempt::Retry(LlmError::Api {
                status: status.as_u16(),
                message,
            }));
        }

        if !status.is_success() {
            let raw = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorEnvelope>(&raw)
                .map(|e| e.error.message)
                .unwrap_or(raw);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(Attempt::Done(response.json().await?))
    }

    /// Calls the model and parses its text reply as JSON, tolerating a
    /// surrounding markdown code fence.
    pub async fn call_json<T: DeserializeOwned>(
        &self,
        prompt: &str,
        system: &str,
    ) -> Result<T, LlmError> {
        let response = self.call(prompt, system).await?;
        let text = response.text().ok_or(LlmError::EmptyContent)?;
        Ok(serde_json::from_str(strip_json_fences(text))?)
    }
}

/// Strips ```json ... ``` or ``` ... ``` fences from model output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    let Some(inner) = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```"))
    else {
        return text;
    };
    let inner = inner.trim_start();
    inner.strip_suffix("```").map(str::trim).unwrap_or(inner)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;
    use axum::{
        http::StatusCode as AxumStatus,
        response::IntoResponse,
        routing::post,
        Json, Router,
    };
    use serde_json::{json, Value};

    async fn spawn(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, router).await.unwrap() });
        format!("http://{addr}/v1/messages")
    }

    fn reply(text: &str) -> Value {
        json!({
            "content": [{"type": "text", "text": text}],
            "usage": {"input_tokens": 10, "output_tokens": 20}
        })
    }

    /// Answers 503 for the first `failures` requests, then a normal reply.
    fn flaky(failures: usize, hits: Arc<AtomicUsize>) -> Router {
        Router::new().route(
            "/v1/messages",
            post(move || async move {
                let n = hits.fetch_add(1, Ordering::SeqCst);
                if n < failures {
                    (AxumStatus::SERVICE_UNAVAILABLE, "overloaded").into_response()
                } else {
                    Json(reply("{}")).into_response()
                }
            }),
        )
    }

    async fn flaky_client(failures: usize, hits: Arc<AtomicUsize>) -> LlmClient {
        LlmClient::new("key".into())
            .unwrap()
            .with_api_url(spawn(flaky(failures, hits)).await)
            .with_backoff(Duration::from_millis(1))
    }

    #[test]
    fn test_strip_json_fences_with_json_tag() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_without_tag() {
        let input = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_no_fences() {
        let input = "  {\"key\": \"value\"}\n";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_unterminated() {
        assert_eq!(strip_json_fences("```json\n{}"), "{}");
    }

    #[tokio::test]
    async fn test_call_json_parses_fenced_reply() {
        let router = Router::new().route(
            "/v1/messages",
            post(|| async { Json(reply("```json\n{\"racism\": 1}\n```")) }),
        );
        let llm = LlmClient::new("key".into())
            .unwrap()
            .with_api_url(spawn(router).await);

        let value: Value = llm.call_json("prompt", "system").await.unwrap();
        assert_eq!(value, json!({"racism": 1}));
    }

    #[tokio::test]
    async fn test_client_error_is_not_retried() {
        let router = Router::new().route(
            "/v1/messages",
            post(|| async {
                (
                    AxumStatus::BAD_REQUEST,
                    Json(json!({"error": {"message": "bad key"}})),
                )
            }),
        );
        let llm = LlmClient::new("key".into())
            .unwrap()
            .with_api_url(spawn(router).await);

        match llm.call("prompt", "system").await {
            Err(LlmError::Api { status, message }) => {
                assert_eq!(status, 400);
                assert_eq!(message, "bad key");
            }
            other => panic!("unexpected result: {:?}", other.map(|r| r.usage.input_tokens)),
        }
    }

    #[tokio::test]
    async fn test_empty_content() {
        let router = Router::new().route(
            "/v1/messages",
            post(|| async {
                Json(json!({"content": [], "usage": {"input_tokens": 1, "output_tokens": 0}}))
            }),
        );
        let llm = LlmClient::new("key".into())
            .unwrap()
            .with_api_url(spawn(router).await);

        let result: Result<Value, _> = llm.call_json("prompt", "system").await;
        assert!(matches!(result, Err(LlmError::EmptyContent)));
    }

    #[tokio::test]
    async fn test_server_errors_are_retried_until_success() {
        let hits = Arc::new(AtomicUsize::new(0));
        let llm = flaky_client(2, hits.clone()).await;

        let response = llm.call("prompt", "system").await.unwrap();
        assert_eq!(response.text(), Some("{}"));
        assert_eq!(hits.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_gives_up_with_last_server_error() {
        let hits = Arc::new(AtomicUsize::new(0));
        let llm = flaky_client(usize::MAX, hits.clone()).await;

        match llm.call("prompt", "system").await {
            Err(LlmError::Api { status, message }) => {
                assert_eq!(status, 503);
                assert_eq!(message, "overloaded");
            }
            other => panic!("unexpected result: {:?}", other.map(|r| r.usage.input_tokens)),
        }
        assert_eq!(hits.load(Ordering::SeqCst), MAX_ATTEMPTS as usize);
    }
}
