//! Environment-supplied configuration.

use secrecy::SecretString;

use crate::error::ConfigError;

/// Default completion endpoint (OpenAI-compatible).
pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";

/// Default model identifier.
pub const DEFAULT_MODEL: &str = "qwen/qwen2.5-vl-32b-instruct:free";

/// Configuration for the LLM completion endpoint.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// API key — never logged or printed.
    pub api_key: SecretString,
    /// Base URL of the OpenAI-compatible API.
    pub base_url: String,
    /// Model identifier sent with every completion request.
    pub model: String,
}

impl LlmConfig {
    /// Load configuration from the environment.
    ///
    /// `OPENAI_API_KEY` is required. `TRIAGE_BASE_URL` and `TRIAGE_MODEL`
    /// fall back to the OpenRouter defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| ConfigError::MissingEnvVar("OPENAI_API_KEY".to_string()))?;

        let base_url =
            std::env::var("TRIAGE_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let model = std::env::var("TRIAGE_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        Ok(Self {
            api_key: SecretString::from(api_key),
            base_url,
            model,
        })
    }

    /// Build a config directly (tests, embedding).
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::from(api_key.into()),
            base_url: base_url.into(),
            model: model.into(),
        }
    }
}
