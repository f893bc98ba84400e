//! The AI drafting boundary.
//!
//! ARCHITECTURAL RULE: no other module may call the text-generation API
//! directly. Every model interaction goes through the `Drafter` trait, so
//! tests can substitute a deterministic stub.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// The model chain, tried in order. There are no per-model retries; the
/// ordering is the whole recovery policy, and a caller that sees
/// `ChainExhausted` switches to the deterministic fallback template.
pub const MODEL_CHAIN: [&str; 3] = [
    "deepseek/deepseek-chat-v3.1:free",
    "x-ai/grok-4-fast:free",
    "qwen/qwen2-72b-instruct:free",
];

const MAX_TOKENS: u32 = 4096;
const REQUEST_TIMEOUT_SECS: u64 = 90;
const REFERER: &str = "http://localhost:8080";
const APP_TITLE: &str = "Vitae";

#[derive(Debug, Error)]
pub enum DraftError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("model returned empty content")]
    EmptyContent,

    #[error("all models in the chain failed, last error: {last}")]
    ChainExhausted { last: String },
}

/// One drafting call: the system framing, the user prompt, and the
/// sampling temperature chosen for the document intent.
#[derive(Debug, Clone)]
pub struct DraftRequest {
    pub system: String,
    pub prompt: String,
    pub temperature: f32,
}

#[derive(Debug, Clone)]
pub struct Draft {
    pub content: String,
    /// Which model produced the content.
    pub model: String,
}

#[async_trait]
pub trait Drafter: Send + Sync {
    async fn draft(&self, request: &DraftRequest) -> Result<Draft, DraftError>;
}

// ────────────────────────────────────────────────────────────────────────────
// OpenRouter wire format (OpenAI-style chat completions)
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Drafter backed by the OpenRouter chat-completions API.
#[derive(Clone)]
pub struct OpenRouterDrafter {
    client: Client,
    base_url: String,
    api_key: String,
    models: Vec<String>,
}

impl OpenRouterDrafter {
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .expect("Failed to build HTTP client"),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            models: MODEL_CHAIN.iter().map(|m| m.to_string()).collect(),
        }
    }

    async fn call_model(&self, model: &str, request: &DraftRequest) -> Result<Draft, DraftError> {
        let body = ChatRequest {
            model,
            max_tokens: MAX_TOKENS,
            temperature: request.temperature,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &request.system,
                },
                ChatMessage {
                    role: "user",
                    content: &request.prompt,
                },
            ],
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("HTTP-Referer", REFERER)
            .header("X-Title", APP_TITLE)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorEnvelope>(&body_text)
                .map(|e| e.error.message)
                .unwrap_or(body_text);
            return Err(DraftError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: ChatResponse = response.json().await?;
        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .ok_or(DraftError::EmptyContent)?;

        debug!(model, chars = content.len(), "model draft received");

        Ok(Draft {
            content,
            model: model.to_string(),
        })
    }
}

#[async_trait]
impl Drafter for OpenRouterDrafter {
    /// Walks the model chain until one model produces usable content.
    async fn draft(&self, request: &DraftRequest) -> Result<Draft, DraftError> {
        let mut last_error = "no models configured".to_string();
        for model in &self.models {
            match self.call_model(model, request).await {
                Ok(draft) => return Ok(draft),
                Err(e) => {
                    warn!(model = model.as_str(), error = %e, "model failed, trying next in chain");
                    last_error = e.to_string();
                }
            }
        }
        Err(DraftError::ChainExhausted { last: last_error })
    }
}

/// Strips a markdown code fence (with optional language tag, e.g.
/// ```` ```json ```` or ```` ```html ````) wrapping the model reply.
pub fn strip_fences(text: &str) -> &str {
    let text = text.trim();
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let rest = match rest.find('\n') {
        Some(idx) if rest[..idx].trim().chars().all(|c| c.is_ascii_alphanumeric()) => {
            &rest[idx + 1..]
        }
        _ => rest,
    };
    rest.strip_suffix("```").map(str::trim).unwrap_or_else(|| rest.trim())
}
