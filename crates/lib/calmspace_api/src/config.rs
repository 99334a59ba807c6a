//! API server configuration.

use calmspace_core::dataset::DatasetConfig;
use calmspace_core::llm::LlmConfig;

/// Configuration for the API server.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Address to bind the HTTP listener (e.g. "0.0.0.0:5050").
    pub bind_addr: String,
    /// Chat model endpoint and credentials.
    pub llm: LlmConfig,
    /// Where the retrieval corpora live.
    pub datasets: DatasetConfig,
}

impl ApiConfig {
    /// Reads configuration from environment variables with sensible defaults.
    ///
    /// | Variable                | Default                          |
    /// |-------------------------|----------------------------------|
    /// | `BIND_ADDR`             | `0.0.0.0:5050`                   |
    /// | `GROQ_API_KEY`          | unset (fallback replies only)    |
    /// | `LLM_BASE_URL`          | `https://api.groq.com/openai/v1` |
    /// | `CALMSPACE_DATASET_DIR` | `dataset`                        |
    pub fn from_env() -> Self {
        Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:5050".into()),
            llm: LlmConfig::from_env(),
            datasets: DatasetConfig::from_env(),
        }
    }
}
