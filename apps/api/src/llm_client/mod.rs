/// LLM Client — the single point of entry for all completion calls in Tailor.
///
/// ARCHITECTURAL RULE: No other module may call the chat-completions endpoint directly.
/// All LLM interactions MUST go through this module.
///
/// Model: qwen-plus (hardcoded — do not make configurable to prevent drift)
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub mod prompts;

const CHAT_COMPLETIONS_URL: &str =
    "https://dashscope.aliyuncs.com/compatible-mode/v1/chat/completions";
/// The model used for all LLM calls in Tailor.
/// This is intentionally hardcoded to prevent accidental drift.
pub const MODEL: &str = "qwen-plus";
/// Total attempts against a rate-limiting endpoint before giving up.
const MAX_ATTEMPTS: u32 = 5;
const REQUEST_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("Rate limited after {attempts} attempts")]
    RateLimited { attempts: u32 },

    #[error("API error (status {status}): {body}")]
    Api { status: u16, body: String },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("DASHSCOPE_API_KEY is not set")]
    MissingApiKey,

    #[error("Prompt must not be empty")]
    EmptyPrompt,
}

#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

impl<'a> ChatRequest<'a> {
    fn new(prompt: &'a str) -> Self {
        Self {
            model: MODEL,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
        }
    }

    /// The user prompt carried by this request.
    #[cfg(test)]
    pub fn prompt(&self) -> &str {
        self.messages.first().map(|m| m.content).unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Status code and body of one round trip, before any interpretation.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

/// The network seam under `LlmClient`.
///
/// Implementations perform exactly one POST per call and never retry;
/// retry policy lives in `LlmClient::complete`.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn post(&self, api_key: &str, request: &ChatRequest<'_>)
        -> Result<RawResponse, LlmError>;
}

/// reqwest-backed transport for the DashScope OpenAI-compatible endpoint.
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .expect("Failed to build HTTP client"),
        }
    }
}

#[async_trait]
impl ChatTransport for HttpTransport {
    async fn post(
        &self,
        api_key: &str,
        request: &ChatRequest<'_>,
    ) -> Result<RawResponse, LlmError> {
        let response = self
            .client
            .post(CHAT_COMPLETIONS_URL)
            .bearer_auth(api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| LlmError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| LlmError::Transport(e.to_string()))?;

        Ok(RawResponse { status, body })
    }
}

/// The single LLM client used by all services in Tailor.
/// Wraps a `ChatTransport` with the rate-limit backoff policy and envelope parsing.
#[derive(Clone)]
pub struct LlmClient {
    transport: Arc<dyn ChatTransport>,
    api_key: Option<String>,
}

impl LlmClient {
    pub fn new(api_key: Option<String>) -> Self {
        Self::with_transport(Arc::new(HttpTransport::new()), api_key)
    }

    pub fn with_transport(transport: Arc<dyn ChatTransport>, api_key: Option<String>) -> Self {
        Self { transport, api_key }
    }

    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    /// Sends `prompt` as the sole user message and returns the first choice's text.
    ///
    /// Only 429 responses are retried: up to `MAX_ATTEMPTS` requests, sleeping
    /// `2^attempt + 1` seconds after each one (2s, 3s, 5s, 9s, 17s).
    /// Every other failure is returned on first sight.
    pub async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        let api_key = self.api_key.as_deref().ok_or(LlmError::MissingApiKey)?;
        if prompt.trim().is_empty() {
            return Err(LlmError::EmptyPrompt);
        }

        let request = ChatRequest::new(prompt);

        for attempt in 0..MAX_ATTEMPTS {
            let response = self.transport.post(api_key, &request).await?;

            if response.status == 429 {
                let delay = backoff_delay(attempt);
                warn!(
                    "LLM rate limit hit (attempt {}/{}), retrying in {}s",
                    attempt + 1,
                    MAX_ATTEMPTS,
                    delay.as_secs()
                );
                tokio::time::sleep(delay).await;
                continue;
            }

            if !(200..300).contains(&response.status) {
                warn!("LLM API returned {}: {}", response.status, response.body);
                return Err(LlmError::Api {
                    status: response.status,
                    body: response.body,
                });
            }

            let text = extract_content(&response.body)?;
            debug!("LLM call succeeded: {} chars returned", text.len());
            return Ok(text);
        }

        Err(LlmError::RateLimited {
            attempts: MAX_ATTEMPTS,
        })
    }
}

fn backoff_delay(attempt: u32) -> Duration {
    Duration::from_secs((1u64 << attempt) + 1)
}

/// Pulls `choices[0].message.content` out of a success envelope.
fn extract_content(body: &str) -> Result<String, LlmError> {
    let envelope: ChatResponse = serde_json::from_str(body)
        .map_err(|e| LlmError::MalformedResponse(format!("unexpected envelope: {e}")))?;

    envelope
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| LlmError::MalformedResponse("no message content in choices".to_string()))
}
