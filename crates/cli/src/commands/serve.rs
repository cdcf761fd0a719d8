use anyhow::Result;
use freshboard_http::{create_router, AppState};
use freshboard_llm::{CompletionProvider, LlmClient};
use freshboard_service::{AuthService, ChatService, DashboardService};
use freshboard_storage::PgStorage;
use std::sync::Arc;

use crate::config::ServerConfig;

pub(crate) async fn run(port: u16, host: String) -> Result<()> {
    let config = ServerConfig::from_env()?;
    let storage = Arc::new(PgStorage::new(&config.database_url, config.db_timeout).await?);
    tracing::info!("Connected to PostgreSQL");

    let provider: Option<Arc<dyn CompletionProvider>> = match config.llm {
        Some(llm) => {
            let client = LlmClient::new(llm.api_key, &llm.base_url, llm.timeout)?
                .with_model(llm.model)
                .with_sampling(llm.temperature, llm.max_tokens);
            tracing::info!(
                model = client.model(),
                temperature = llm.temperature,
                max_tokens = llm.max_tokens,
                base_url = client.base_url(),
                "Chat assistant enabled"
            );
            Some(Arc::new(client) as Arc<dyn CompletionProvider>)
        },
        None => {
            tracing::info!("No completion API key set, chat assistant disabled");
            None
        },
    };

    if config.resolver.is_allow_list() {
        tracing::info!("Company tables restricted to FRESHBOARD_COMPANY_TABLES");
    }

    let dashboard = Arc::new(DashboardService::new(storage.clone()));
    let state = Arc::new(AppState::new(
        AuthService::new(storage, config.resolver),
        Arc::clone(&dashboard),
        ChatService::new(provider, dashboard),
    ));

    let router = create_router(state);
    let addr = format!("{host}:{port}");
    tracing::info!("Starting HTTP server on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
