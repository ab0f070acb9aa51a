//! LLM generation hook.
//!
//! The scripted dialogue flow never calls the model — every response the
//! engine emits is a template. This hook exists for hosts that want
//! free-form replies outside the scripted flow, behind a single
//! `generate` method so tests can stub it.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};

use crate::error::LlmError;

/// Restrictive system prompt for the generation hook. Keeps any
/// free-form reply confined to keyword collection and classification.
pub const SYSTEM_PROMPT: &str = "\
You are DMO Assist, a specialized Document Management Organization assistant.

YOUR ONLY PURPOSE is to:
1. Collect department information from employees
2. Collect commonly used words/terms in their work
3. Help classify those words as Internal, Public, or Confidential

STRICT RULES:
- DO NOT respond to any questions outside of keyword collection and classification
- DO NOT provide general information, advice, or assistance on other topics
- DO NOT engage in casual conversation
- If asked about anything else, respond ONLY with: \"I'm sorry, I can only help with \
collecting and classifying workplace keywords for document management. Please tell me \
about the words you commonly use in your work.\"

ALLOWED TOPICS ONLY:
- Department identification
- Workplace terminology collection
- Word classification (Internal/Public/Confidential)
- File saving and data organization

Stay focused on your mission: collecting and classifying workplace keywords.";

/// One-method generation seam.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Produce a free-form reply for the given prompt.
    async fn generate(&self, prompt: &str) -> Result<String, LlmError>;

    /// Model identifier, for logging.
    fn model_name(&self) -> &str;
}

/// Gemini client over the generateContent REST endpoint.
pub struct GeminiClient {
    api_key: SecretString,
    model: String,
    client: reqwest::Client,
    base_url: String,
}

impl GeminiClient {
    pub fn new(api_key: SecretString, model: &str) -> Self {
        Self {
            api_key,
            model: model.to_string(),
            client: reqwest::Client::new(),
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
        }
    }

    /// Override the API base URL (for tests against a local server).
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    fn api_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url, self.model
        )
    }
}

#[async_trait]
impl LlmProvider for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        let body = serde_json::json!({
            "system_instruction": { "parts": [{ "text": SYSTEM_PROMPT }] },
            "contents": [{ "parts": [{ "text": prompt }] }]
        });

        let response = self
            .client
            .post(self.api_url())
            .header("x-goog-api-key", self.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::RequestFailed {
                provider: "gemini".to_string(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(LlmError::AuthFailed {
                provider: "gemini".to_string(),
            });
        }
        if !status.is_success() {
            return Err(LlmError::RequestFailed {
                provider: "gemini".to_string(),
                reason: format!("HTTP {status}"),
            });
        }

        let payload: serde_json::Value =
            response.json().await.map_err(|e| LlmError::InvalidResponse {
                provider: "gemini".to_string(),
                reason: e.to_string(),
            })?;

        payload["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| LlmError::InvalidResponse {
                provider: "gemini".to_string(),
                reason: "no candidate text in response".to_string(),
            })
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
