use std::sync::Arc;

use freshboard_core::analytics::ContextSnapshot;
use freshboard_core::{ChatMessage, ChatRole, DashboardSession};
use freshboard_llm::{build_context_prompt, build_conversation, CompletionProvider};

use crate::dashboard_service::{DashboardService, DateFilter};
use crate::error::ServiceError;
use crate::session_registry::SharedSession;
use crate::views::ChatReply;

/// Answers questions about the session's currently filtered data.
pub struct ChatService {
    provider: Option<Arc<dyn CompletionProvider>>,
    dashboard: Arc<DashboardService>,
}

impl ChatService {
    /// `provider` is `None` when no API key is configured; every question then
    /// fails with [`ServiceError::NotConfigured`].
    #[must_use]
    pub fn new(
        provider: Option<Arc<dyn CompletionProvider>>,
        dashboard: Arc<DashboardService>,
    ) -> Self {
        Self { provider, dashboard }
    }

    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.provider.is_some()
    }

    #[must_use]
    pub fn transcript(session: &DashboardSession) -> &[ChatMessage] {
        &session.chat
    }

    /// One chat turn. The transcript only grows when the model answered.
    ///
    /// The session is locked while the context is built and again when the
    /// answer is recorded, never across the completion call, so the same
    /// user's other requests proceed while the model is thinking.
    pub async fn ask(
        &self,
        session: &SharedSession,
        question: &str,
    ) -> Result<ChatReply, ServiceError> {
        let question = question.trim();
        if question.is_empty() {
            return Err(ServiceError::InvalidInput("message must not be empty".to_owned()));
        }
        let Some(provider) = self.provider.as_ref() else {
            return Err(ServiceError::NotConfigured("chat assistant has no API key".to_owned()));
        };

        let (messages, username) = {
            let mut guard = session.lock().await;
            let view = self.dashboard.load_view(&mut guard, DateFilter::default()).await?;
            let snapshot = ContextSnapshot::from_rows(&view.filtered);
            let prompt = build_context_prompt(snapshot.as_ref(), &view.filtered, question);
            (build_conversation(&guard.chat, prompt), guard.username.clone())
        };

        let answer = provider.complete(&messages).await.map_err(|e| {
            tracing::warn!(username = %username, error = %e, "chat completion failed");
            e
        })?;
        let answer = answer.trim().to_owned();

        let mut guard = session.lock().await;
        guard.chat.push(ChatMessage::new(ChatRole::User, question));
        guard.chat.push(ChatMessage::new(ChatRole::Assistant, answer.clone()));
        Ok(ChatReply { answer, transcript: guard.chat.clone() })
    }
}
