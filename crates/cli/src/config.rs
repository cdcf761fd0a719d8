//! Server configuration read from the environment.

use std::time::Duration;

use anyhow::{Context, Result};
use freshboard_core::constants::DEFAULT_DB_TIMEOUT_SECS;
use freshboard_core::{env_first_non_empty, env_parse_with_default, TableResolver};
use freshboard_llm::{
    DEFAULT_BASE_URL, DEFAULT_MAX_TOKENS, DEFAULT_MODEL, DEFAULT_TEMPERATURE, DEFAULT_TIMEOUT_SECS,
};

pub(crate) struct ServerConfig {
    pub database_url: String,
    pub db_timeout: Duration,
    pub llm: Option<LlmConfig>,
    pub resolver: TableResolver,
}

pub(crate) struct LlmConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub timeout: Duration,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl ServerConfig {
    pub(crate) fn from_env() -> Result<Self> {
        let database_url = env_first_non_empty(&["DATABASE_URL"])
            .context("DATABASE_URL environment variable must be set")?;
        let db_timeout = Duration::from_secs(env_parse_with_default(
            "FRESHBOARD_DB_TIMEOUT_SECS",
            DEFAULT_DB_TIMEOUT_SECS,
        ));

        let llm = env_first_non_empty(&["FRESHBOARD_LLM_API_KEY", "OPENAI_API_KEY"]).map(
            |api_key| LlmConfig {
                api_key,
                base_url: env_first_non_empty(&["FRESHBOARD_LLM_URL"])
                    .unwrap_or_else(|| DEFAULT_BASE_URL.to_owned()),
                model: env_first_non_empty(&["FRESHBOARD_MODEL"])
                    .unwrap_or_else(|| DEFAULT_MODEL.to_owned()),
                timeout: Duration::from_secs(env_parse_with_default(
                    "FRESHBOARD_LLM_TIMEOUT_SECS",
                    DEFAULT_TIMEOUT_SECS,
                )),
                temperature: env_parse_with_default(
                    "FRESHBOARD_LLM_TEMPERATURE",
                    DEFAULT_TEMPERATURE,
                ),
                max_tokens: env_parse_with_default("FRESHBOARD_LLM_MAX_TOKENS", DEFAULT_MAX_TOKENS),
            },
        );

        let resolver = match env_first_non_empty(&["FRESHBOARD_COMPANY_TABLES"]) {
            Some(list) => TableResolver::from_allow_list(&list)
                .context("FRESHBOARD_COMPANY_TABLES is not a valid Company=table list")?,
            None => TableResolver::derived(),
        };

        Ok(Self { database_url, db_timeout, llm, resolver })
    }
}
