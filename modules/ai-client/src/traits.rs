use anyhow::Result;
use async_trait::async_trait;

pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful assistant.";

// =============================================================================
// TextCompletion Trait
// =============================================================================

/// A single-turn text generator. Implemented by every provider agent so
/// callers can hold `Arc<dyn TextCompletion>` without caring which one.
#[async_trait]
pub trait TextCompletion: Send + Sync {
    /// Provider name, for logs.
    fn provider(&self) -> &'static str;

    fn model(&self) -> &str;

    async fn chat_completion(&self, system: &str, user: &str) -> Result<String>;

    async fn complete(&self, prompt: &str) -> Result<String> {
        self.chat_completion(DEFAULT_SYSTEM_PROMPT, prompt).await
    }
}
