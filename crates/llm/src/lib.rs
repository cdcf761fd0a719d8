//! Chat-completion integration for the freshboard assistant

mod ai_types;
mod client;
mod error;
mod prompt;
mod provider;


pub use client::{
    truncate, LlmClient, DEFAULT_BASE_URL, DEFAULT_MAX_TOKENS, DEFAULT_MODEL,
    DEFAULT_TEMPERATURE, DEFAULT_TIMEOUT_SECS,
};
pub use error::LlmError;
pub use prompt::{
    build_context_prompt, build_conversation, sample_rows_json, truncate_chars, SYSTEM_PROMPT,
};
pub use provider::CompletionProvider;
