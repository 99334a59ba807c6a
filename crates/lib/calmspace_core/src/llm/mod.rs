//! Chat model access: OpenAI-compatible chat completions.
//!
//! # Public API
//!
//! - [`ChatModel`]: async trait the responder talks to
//! - [`groq::GroqClient`]: hosted implementation (Groq, or any
//!   OpenAI-compatible `/chat/completions` endpoint)
//! - [`LlmConfig`]: endpoint, model and credentials, resolved from env

pub mod groq;

pub use groq::GroqClient;

use std::env;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";

/// Key value shipped in `env_template.txt`; treated as unset.
pub const PLACEHOLDER_API_KEY: &str = "your_groq_api_key_here";

/// Upper bound on completion attempts per request.
pub const MAX_ATTEMPTS: u32 = 5;

/// Errors that can occur while calling the model.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Upstream returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Response parse error: {0}")]
    Parse(String),

    #[error("Model returned an empty response")]
    Empty,
}

impl LlmError {
    /// Worth another attempt: transport failures, rate limits, 5xx.
    pub fn is_transient(&self) -> bool {
        match self {
            LlmError::Http(_) => true,
            LlmError::Status { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

/// Speaker of a chat turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One chat turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// A model that turns a conversation into the next assistant reply.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Complete the conversation; returns the trimmed reply text.
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, LlmError>;

    /// Model identifier for logs.
    fn name(&self) -> &str {
        "model"
    }

    /// Whether credentials are present. Calls fail fast when false.
    fn is_configured(&self) -> bool {
        true
    }
}

/// Model endpoint configuration.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub timeout_secs: u64,
    pub max_attempts: u32,
    pub temperature: f32,
    pub max_tokens: u32,
    pub presence_penalty: f32,
    pub frequency_penalty: f32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout_secs: 30,
            max_attempts: 2,
            temperature: 0.7,
            max_tokens: 300,
            presence_penalty: 0.1,
            frequency_penalty: 0.1,
        }
    }
}

impl LlmConfig {
    /// Reads configuration from environment variables.
    ///
    /// | Variable           | Default                              |
    /// |--------------------|--------------------------------------|
    /// | `GROQ_API_KEY`     | unset (model calls fail, fallback answers) |
    /// | `LLM_BASE_URL`     | `https://api.groq.com/openai/v1`     |
    /// | `LLM_MODEL`        | `llama-3.3-70b-versatile`            |
    /// | `LLM_TIMEOUT_SECS` | `30`                                 |
    /// | `LLM_MAX_ATTEMPTS` | `2`, at most [`MAX_ATTEMPTS`]        |
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_key: env::var("GROQ_API_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty() && k != PLACEHOLDER_API_KEY),
            base_url: env::var("LLM_BASE_URL").unwrap_or(defaults.base_url),
            model: env::var("LLM_MODEL").unwrap_or(defaults.model),
            timeout_secs: env::var("LLM_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.timeout_secs),
            max_attempts: env::var("LLM_MAX_ATTEMPTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(|n: u32| n.min(MAX_ATTEMPTS))
                .filter(|n| *n > 0)
                .unwrap_or(defaults.max_attempts),
            ..defaults
        }
    }

    /// Full URL of the completions endpoint.
    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}
