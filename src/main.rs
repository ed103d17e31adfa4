use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use incident_intake::config::AppConfig;
use incident_intake::handlers;
use incident_intake::services::ai::gemini::GeminiProvider;
use incident_intake::services::ai::ollama::OllamaProvider;
use incident_intake::services::ai::CompletionProvider;
use incident_intake::services::session::SessionStore;
use incident_intake::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();

    let llm: Box<dyn CompletionProvider> = match config.ai_provider.as_str() {
        "ollama" => {
            tracing::info!("using Ollama completion provider (url: {})", config.ollama_url);
            Box::new(OllamaProvider::new(
                config.ollama_url.clone(),
                config.ollama_model.clone(),
                config.ai_timeout,
            )?)
        }
        _ => {
            anyhow::ensure!(!config.ai_api_key.is_empty(), "AI_API_KEY must be set when AI_PROVIDER=gemini");
            tracing::info!("using Gemini completion provider (model: {})", config.ai_model);
            Box::new(GeminiProvider::new(
                config.ai_api_url.clone(),
                config.ai_api_key.clone(),
                config.ai_model.clone(),
                config.ai_timeout,
            )?)
        }
    };

    tracing::info!(
        origins = ?config.allowed_origins,
        merge_policy = ?config.merge_policy,
        date_format = config.date_format.label(),
        "configuration loaded"
    );

    let addr = format!("0.0.0.0:{}", config.port);
    let session_ttl = chrono::Duration::from_std(config.session_ttl)
        .unwrap_or_else(|_| chrono::Duration::minutes(30));

    let state = Arc::new(AppState {
        config,
        llm,
        sessions: SessionStore::with_ttl(session_ttl),
    });

    let app = handlers::router(state);

    tracing::info!("starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
