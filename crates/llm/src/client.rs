use std::time::Duration;

use async_trait::async_trait;
use freshboard_core::ChatMessage;

use crate::ai_types::{ChatRequest, ChatResponse, Message};
use crate::error::LlmError;
use crate::provider::CompletionProvider;

/// Default model for the dashboard assistant.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
/// Default completion API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";
/// Default sampling temperature.
pub const DEFAULT_TEMPERATURE: f32 = 0.3;
/// Default cap on generated tokens per answer.
pub const DEFAULT_MAX_TOKENS: u32 = 500;
/// Default HTTP timeout for one completion call.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Client for an OpenAI-compatible chat-completion API.
pub struct LlmClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl std::fmt::Debug for LlmClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmClient")
            .field("api_key", &"***")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}

impl LlmClient {
    /// Creates a new client with the given API key, base URL, and request timeout.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built (TLS backend failure).
    pub fn new(api_key: String, base_url: &str, timeout: Duration) -> Result<Self, LlmError> {
        let base_url = base_url.trim_end_matches('/').to_owned();
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LlmError::ClientInit(e.to_string()))?;
        Ok(Self {
            client,
            api_key,
            base_url,
            model: DEFAULT_MODEL.to_owned(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        })
    }

    /// Sets a custom model for this client.
    #[must_use]
    pub fn with_model(mut self, model: String) -> Self {
        self.model = model;
        self
    }

    /// Overrides the sampling temperature and the answer length cap.
    #[must_use]
    pub const fn with_sampling(mut self, temperature: f32, max_tokens: u32) -> Self {
        self.temperature = temperature;
        self.max_tokens = max_tokens;
        self
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send one chat completion request and return the trimmed answer.
    ///
    /// A single attempt: the caller reports failures to the user instead of
    /// retrying.
    ///
    /// # Errors
    /// Returns an error if the HTTP request fails, the API returns a
    /// non-success status, the body cannot be parsed, or no choice carries
    /// content.
    pub async fn chat_completion(&self, messages: &[ChatMessage]) -> Result<String, LlmError> {
        let request = ChatRequest {
            model: &self.model,
            messages: messages.iter().map(Message::from).collect(),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body =
                response.text().await.unwrap_or_else(|_| "Could not read error body".to_owned());
            tracing::warn!(status = status.as_u16(), "completion API returned an error");
            return Err(LlmError::HttpStatus { code: status.as_u16(), body });
        }

        let body = response.text().await?;
        let chat_response: ChatResponse =
            serde_json::from_str(&body).map_err(|e| LlmError::JsonParse {
                context: format!("chat completion response (body: {})", truncate(&body, 200)),
                source: e,
            })?;

        let content = chat_response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or(LlmError::EmptyResponse)?;
        Ok(content.trim().to_owned())
    }
}

#[async_trait]
impl CompletionProvider for LlmClient {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, LlmError> {
        self.chat_completion(messages).await
    }
}

/// Truncates a string to the given maximum length in bytes at a char boundary.
#[must_use]
pub fn truncate(s: &str, max_len: usize) -> &str {
    if s.len() <= max_len {
        s
    } else {
        let mut end = max_len;
        while end > 0 && !s.is_char_boundary(end) {
            end = end.saturating_sub(1);
        }
        s.get(..end).unwrap_or("")
    }
}
