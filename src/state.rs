use crate::config::AppConfig;
use crate::services::ai::CompletionProvider;
use crate::services::session::SessionStore;

pub struct AppState {
    pub config: AppConfig,
    pub llm: Box<dyn CompletionProvider>,
    pub sessions: SessionStore,
}
