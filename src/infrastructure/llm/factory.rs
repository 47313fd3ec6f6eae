use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

use super::gemini::{GeminiProvider, DEFAULT_GEMINI_BASE_URL};
use super::http_client::HttpClient;
use crate::config::LlmConfig;
use crate::domain::{DomainError, LlmProvider};

/// Supported chat providers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LlmProviderKind {
    #[default]
    Gemini,
}

/// Factory for creating LLM providers
#[derive(Debug)]
pub struct LlmProviderFactory;

impl LlmProviderFactory {
    /// Create an LLM provider from configuration and API key
    pub fn create(config: &LlmConfig, api_key: &str) -> Result<Arc<dyn LlmProvider>, DomainError> {
        if api_key.trim().is_empty() {
            return Err(DomainError::configuration("LLM API key must not be empty"));
        }

        let http_client = HttpClient::with_timeout(Duration::from_secs(config.timeout_secs))?;

        match config.provider {
            LlmProviderKind::Gemini => {
                let base_url = config
                    .base_url
                    .as_deref()
                    .unwrap_or(DEFAULT_GEMINI_BASE_URL);
                let provider = GeminiProvider::with_base_url(http_client, api_key, base_url);
                Ok(Arc::new(provider))
            }
        }
    }

    /// Create a Gemini provider directly
    pub fn create_gemini(api_key: impl Into<String>) -> Arc<dyn LlmProvider> {
        Arc::new(GeminiProvider::new(HttpClient::new(), api_key))
    }
}
