mod client;
pub(crate) mod types;

use std::time::Duration;

use anyhow::{anyhow, Result};
use async_trait::async_trait;

use crate::traits::TextCompletion;
use client::ClaudeClient;
use types::*;

pub const DEFAULT_MODEL: &str = "claude-haiku-4-5-20251001";

// =============================================================================
// Claude Agent
// =============================================================================

#[derive(Clone)]
pub struct Claude {
    api_key: String,
    pub(crate) model: String,
    base_url: Option<String>,
    http: reqwest::Client,
}

impl Claude {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
            base_url: None,
            http: reqwest::Client::new(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Bound every request to `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self> {
        self.http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(self)
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub(crate) fn client(&self) -> ClaudeClient {
        let client = ClaudeClient::new(&self.api_key, self.http.clone());
        if let Some(ref url) = self.base_url {
            client.with_base_url(url)
        } else {
            client
        }
    }

    pub async fn chat_completion(
        &self,
        system: impl Into<String>,
        user: impl Into<String>,
    ) -> Result<String> {
        let request = ChatRequest::new(&self.model)
            .system(system)
            .message(WireMessage::user(user))
            .max_tokens(1024)
            .temperature(0.7);

        let response = self.client().chat(&request).await?;

        response
            .text()
            .ok_or_else(|| anyhow!("No response from Claude"))
    }
}

#[async_trait]
impl TextCompletion for Claude {
    fn provider(&self) -> &'static str {
        "anthropic"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn chat_completion(&self, system: &str, user: &str) -> Result<String> {
        Claude::chat_completion(self, system, user).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claude_new() {
        let ai = Claude::new("sk-ant-test", DEFAULT_MODEL);
        assert_eq!(ai.model, DEFAULT_MODEL);
        assert_eq!(ai.api_key, "sk-ant-test");
        assert_eq!(TextCompletion::provider(&ai), "anthropic");
    }

    #[test]
    fn test_claude_with_base_url() {
        let ai = Claude::new("sk-ant-test", DEFAULT_MODEL).with_base_url("https://custom.api.com");
        assert_eq!(ai.base_url, Some("https://custom.api.com".to_string()));
    }

    #[test]
    fn unreachable_endpoint_is_an_error() {
        let ai = Claude::new("sk-ant-test", DEFAULT_MODEL)
            .with_base_url("http://127.0.0.1:9")
            .with_timeout(Duration::from_secs(2))
            .unwrap();
        let result = tokio_test::block_on(ai.complete("hi"));
        assert!(result.is_err());
    }
}
