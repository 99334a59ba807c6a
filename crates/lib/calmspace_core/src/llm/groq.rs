//! Groq chat-completions client.
//!
//! Speaks the OpenAI `/chat/completions` wire format with bearer auth, so it
//! works against any compatible endpoint. Transient failures are retried with
//! exponential backoff.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::time::sleep;
use tracing::{debug, warn};

use super::{ChatMessage, ChatModel, LlmConfig, LlmError, MAX_ATTEMPTS};

const BASE_BACKOFF_MS: u64 = 500;
const MAX_BACKOFF_SHIFT: u32 = 6;

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
    max_tokens: u32,
    presence_penalty: f32,
    frequency_penalty: f32,
}

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Deserialize)]
struct CompletionMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Hosted chat model client.
#[derive(Debug, Clone)]
pub struct GroqClient {
    client: Client,
    config: LlmConfig,
}

impl GroqClient {
    pub fn new(config: LlmConfig) -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client, config })
    }

    async fn complete_once(&self, api_key: &str, messages: &[ChatMessage]) -> Result<String, LlmError> {
        let resp = self
            .client
            .post(self.config.completions_url())
            .bearer_auth(api_key)
            .json(&CompletionRequest {
                model: &self.config.model,
                messages,
                temperature: self.config.temperature,
                max_tokens: self.config.max_tokens,
                presence_penalty: self.config.presence_penalty,
                frequency_penalty: self.config.frequency_penalty,
            })
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_else(|_| "<no body>".to_string());
            return Err(LlmError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let data: CompletionResponse = resp
            .json()
            .await
            .map_err(|e| LlmError::Parse(e.to_string()))?;

        let content = data
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|c| c.trim().to_string())
            .unwrap_or_default();

        if content.is_empty() {
            return Err(LlmError::Empty);
        }
        Ok(content)
    }
}

#[async_trait]
impl ChatModel for GroqClient {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, LlmError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| LlmError::Config("GROQ_API_KEY is not set".to_string()))?;

        let attempts = self.config.max_attempts.clamp(1, MAX_ATTEMPTS);
        let mut attempt = 0;
        loop {
            match self.complete_once(api_key, messages).await {
                Ok(reply) => {
                    debug!(model = %self.config.model, attempt, "completion succeeded");
                    return Ok(reply);
                }
                Err(e) if e.is_transient() && attempt + 1 < attempts => {
                    warn!(error = %e, attempt, "completion failed, retrying");
                    sleep(backoff(attempt)).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn name(&self) -> &str {
        &self.config.model
    }

    fn is_configured(&self) -> bool {
        self.config.api_key.is_some()
    }
}

/// Delay before retry number `attempt + 1`: 500 ms doubling, capped at 32 s.
fn backoff(attempt: u32) -> Duration {
    Duration::from_millis(BASE_BACKOFF_MS << attempt.min(MAX_BACKOFF_SHIFT))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backoff_doubles_then_caps() {
        assert_eq!(backoff(0), Duration::from_millis(500));
        assert_eq!(backoff(1), Duration::from_secs(1));
        assert_eq!(backoff(6), Duration::from_secs(32));
        assert_eq!(backoff(64), Duration::from_secs(32));
        assert_eq!(backoff(u32::MAX), Duration::from_secs(32));
    }
}
