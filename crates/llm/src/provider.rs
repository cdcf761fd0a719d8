use async_trait::async_trait;
use freshboard_core::ChatMessage;

use crate::error::LlmError;

/// Something that turns a conversation into one assistant answer.
///
/// [`crate::LlmClient`] talks to the hosted API; tests plug in fakes.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, LlmError>;
}
