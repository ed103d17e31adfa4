pub mod extraction;
pub mod gemini;
pub mod ollama;

use async_trait::async_trait;

/// Opaque text completion: one prompt in, the model's raw text out.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(&self, prompt: &str) -> anyhow::Result<String>;
}
