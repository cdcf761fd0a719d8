//! Prompt construction for the dashboard assistant.
//!
//! The assistant never sees the full table: only the snapshot statistics and
//! a bounded sample of the filtered rows.

use freshboard_core::analytics::ContextSnapshot;
use freshboard_core::constants::{CHAT_SAMPLE_MAX_CHARS, CHAT_SAMPLE_ROWS};
use freshboard_core::{ChatMessage, ChatRole, DerivedReading};

pub const SYSTEM_PROMPT: &str =
    "You are an assistant that helps interpret the data of the company dashboard.";

/// Rows forwarded to the model before the character budget is applied.
pub(crate) fn sample_rows(rows: &[DerivedReading]) -> &[DerivedReading] {
    &rows[..rows.len().min(CHAT_SAMPLE_ROWS)]
}

/// JSON array of the first filtered rows, cut to the sample character budget.
#[must_use]
pub fn sample_rows_json(rows: &[DerivedReading]) -> String {
    let json = serde_json::to_string(sample_rows(rows)).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "failed to serialize sample rows");
        "[]".to_owned()
    });
    truncate_chars(&json, CHAT_SAMPLE_MAX_CHARS).to_owned()
}

/// The user turn actually sent to the model for `question`.
#[must_use]
pub fn build_context_prompt(
    snapshot: Option<&ContextSnapshot>,
    rows: &[DerivedReading],
    question: &str,
) -> String {
    format!(
        "Here is some context with the filtered dashboard data:\n\n\
         Statistics: {}\n\n\
         Sample data: {}\n\n\
         Question: {}",
        ContextSnapshot::to_json(snapshot),
        sample_rows_json(rows),
        question
    )
}

/// System prompt, prior transcript, then the context-bearing prompt.
#[must_use]
pub fn build_conversation(transcript: &[ChatMessage], prompt: String) -> Vec<ChatMessage> {
    let mut messages = Vec::with_capacity(transcript.len() + 2);
    messages.push(ChatMessage::new(ChatRole::System, SYSTEM_PROMPT));
    messages.extend(transcript.iter().filter(|m| m.role != ChatRole::System).cloned());
    messages.push(ChatMessage::new(ChatRole::User, prompt));
    messages
}

/// First `max_chars` characters of `s`.
#[must_use]
pub fn truncate_chars(s: &str, max_chars: usize) -> &str {
    s.char_indices().nth(max_chars).map_or(s, |(idx, _)| &s[..idx])
}
