use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

use super::{GeminiEmbeddingProvider, HashingEmbeddingProvider, HttpClient};
use crate::config::EmbeddingConfig;
use crate::domain::{DomainError, EmbeddingProvider};
use crate::infrastructure::llm::DEFAULT_GEMINI_BASE_URL;

/// Supported embedding providers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmbeddingProviderKind {
    #[default]
    Gemini,
    /// Offline feature hashing, no credentials required
    Hashing,
}

impl EmbeddingProviderKind {
    pub fn requires_api_key(&self) -> bool {
        matches!(self, Self::Gemini)
    }
}

/// Factory for creating embedding providers
#[derive(Debug)]
pub struct EmbeddingProviderFactory;

impl EmbeddingProviderFactory {
    /// Create an embedding provider from configuration.
    /// `api_key` is only consulted by providers that call a remote API.
    pub fn create(
        config: &EmbeddingConfig,
        api_key: Option<&str>,
    ) -> Result<Arc<dyn EmbeddingProvider>, DomainError> {
        match config.provider {
            EmbeddingProviderKind::Gemini => {
                let api_key = api_key
                    .filter(|k| !k.trim().is_empty())
                    .ok_or_else(|| {
                        DomainError::configuration("Gemini embeddings require an API key")
                    })?;
                let http_client =
                    HttpClient::with_timeout(Duration::from_secs(config.timeout_secs))?;
                let base_url = config
                    .base_url
                    .as_deref()
                    .unwrap_or(DEFAULT_GEMINI_BASE_URL);

                Ok(Arc::new(GeminiEmbeddingProvider::with_base_url(
                    http_client,
                    api_key,
                    &config.model,
                    base_url,
                )))
            }
            EmbeddingProviderKind::Hashing => {
                Ok(Arc::new(HashingEmbeddingProvider::new(config.dimensions)?))
            }
        }
    }
}
