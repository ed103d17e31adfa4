use std::env;
use std::time::Duration;

use crate::services::dates::DateFormat;
use crate::services::merge::MergePolicy;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub ai_provider: String,
    pub ai_api_key: String,
    pub ai_api_url: String,
    pub ai_model: String,
    pub ollama_url: String,
    pub ollama_model: String,
    pub ai_timeout: Duration,
    pub session_ttl: Duration,
    pub allowed_origins: Vec<String>,
    pub date_format: DateFormat,
    pub merge_policy: MergePolicy,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5000),
            ai_provider: env::var("AI_PROVIDER").unwrap_or_else(|_| "gemini".to_string()),
            ai_api_key: env::var("AI_API_KEY").unwrap_or_default(),
            ai_api_url: env::var("AI_API_URL")
                .unwrap_or_else(|_| "https://generativelanguage.googleapis.com".to_string()),
            ai_model: env::var("AI_MODEL").unwrap_or_else(|_| "gemini-pro".to_string()),
            ollama_url: env::var("OLLAMA_URL")
                .unwrap_or_else(|_| "http://localhost:11434".to_string()),
            ollama_model: env::var("OLLAMA_MODEL").unwrap_or_else(|_| "llama3.2".to_string()),
            ai_timeout: Duration::from_secs(
                env::var("AI_TIMEOUT_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(30),
            ),
            session_ttl: Duration::from_secs(
                env::var("SESSION_TTL_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(30 * 60),
            ),
            allowed_origins: parse_origins(
                &env::var("ALLOWED_ORIGINS").unwrap_or_else(|_| "http://localhost:3000".to_string()),
            ),
            date_format: DateFormat::parse(&env::var("DATE_FORMAT").unwrap_or_default()),
            merge_policy: MergePolicy::parse(&env::var("MERGE_POLICY").unwrap_or_default()),
        }
    }

    pub fn origin_allowed(&self, origin: &str) -> bool {
        self.allowed_origins.iter().any(|o| o == origin)
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|o| o.trim().trim_end_matches('/').to_string())
        .filter(|o| !o.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_origins() {
        let origins = parse_origins(" https://app.example.com/ ,http://localhost:3000,,");
        assert_eq!(origins, vec!["https://app.example.com", "http://localhost:3000"]);
    }
}
