use serde::Deserialize;
use std::path::PathBuf;

use crate::domain::ingestion::{ChunkingConfig, SourceFailurePolicy};
use crate::domain::DomainError;
use crate::infrastructure::embedding::EmbeddingProviderKind;
use crate::infrastructure::llm::LlmProviderKind;

/// Environment variable holding the Gemini API key
pub const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub llm: LlmConfig,
    pub embedding: EmbeddingConfig,
    pub index: IndexConfig,
    pub agent: AgentConfig,
    pub orchestrator: OrchestratorConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Chat model used by the classifier and the answering loop
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub provider: LlmProviderKind,
    pub model: String,
    pub base_url: Option<String>,
    pub timeout_secs: u64,
    pub temperature: Option<f32>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    pub provider: EmbeddingProviderKind,
    pub model: String,
    pub base_url: Option<String>,
    /// Vector size for the hashing provider
    pub dimensions: usize,
    pub batch_size: usize,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Directory scanned for sources when `sources` is empty
    pub data_dir: PathBuf,
    /// Location of the persisted index
    pub path: PathBuf,
    pub sources: Vec<PathBuf>,
    pub chunk_size: usize,
    pub chunk_overlap: usize,
    pub on_source_error: SourceFailurePolicy,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    pub max_iterations: usize,
    pub max_parse_errors: usize,
    pub retrieval_k: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OrchestratorConfig {
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: LlmProviderKind::Gemini,
            model: "gemini-2.5-flash".to_string(),
            base_url: None,
            timeout_secs: 30,
            temperature: None,
        }
    }
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: EmbeddingProviderKind::Gemini,
            model: "text-embedding-004".to_string(),
            base_url: None,
            dimensions: 768,
            batch_size: 32,
            timeout_secs: 30,
        }
    }
}

impl Default for IndexConfig {
    fn default() -> Self {
        let chunking = ChunkingConfig::default();

        Self {
            data_dir: PathBuf::from("data"),
            path: PathBuf::from("vectorstore/index.json"),
            sources: Vec::new(),
            chunk_size: chunking.chunk_size,
            chunk_overlap: chunking.chunk_overlap,
            on_source_error: SourceFailurePolicy::default(),
        }
    }
}

impl IndexConfig {
    pub fn chunking(&self) -> ChunkingConfig {
        ChunkingConfig::new(self.chunk_size, self.chunk_overlap)
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            max_iterations: 15,
            max_parse_errors: 3,
            retrieval_k: 3,
        }
    }
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: 60,
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Reject settings that would only fail later at query time
    pub fn validate(&self) -> Result<(), DomainError> {
        self.index.chunking().validate()?;

        if self.embedding.batch_size == 0 {
            return Err(DomainError::configuration("embedding.batch_size must be greater than 0"));
        }

        if self.embedding.provider == EmbeddingProviderKind::Hashing && self.embedding.dimensions == 0 {
            return Err(DomainError::configuration("embedding.dimensions must be greater than 0"));
        }

        if self.agent.retrieval_k == 0 {
            return Err(DomainError::configuration("agent.retrieval_k must be greater than 0"));
        }

        if self.agent.max_iterations == 0 {
            return Err(DomainError::configuration("agent.max_iterations must be greater than 0"));
        }

        if self.orchestrator.request_timeout_secs == 0 {
            return Err(DomainError::configuration(
                "orchestrator.request_timeout_secs must be greater than 0",
            ));
        }

        Ok(())
    }
}

/// Read the Gemini API key from the environment
pub fn gemini_api_key() -> Result<String, DomainError> {
    match std::env::var(GEMINI_API_KEY_ENV) {
        Ok(key) if !key.trim().is_empty() => Ok(key),
        _ => Err(DomainError::configuration(format!(
            "{} environment variable is not set",
            GEMINI_API_KEY_ENV
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();

        assert_eq!(config.llm.model, "gemini-2.5-flash");
        assert_eq!(config.index.path, PathBuf::from("vectorstore/index.json"));
        assert_eq!(config.index.chunking(), ChunkingConfig::new(1000, 200));
        assert_eq!(config.agent.retrieval_k, 3);
        assert_eq!(config.agent.max_parse_errors, 3);
        assert_eq!(config.agent.max_iterations, 15);
        assert_eq!(config.orchestrator.request_timeout_secs, 60);
        assert_eq!(config.embedding.batch_size, 32);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_sections_fill_defaults() {
        let source = config::Config::builder()
            .add_source(config::File::from_str(
                r#"
                [embedding]
                provider = "hashing"
                dimensions = 64

                [index]
                chunk_size = 500
                on_source_error = "fail"
                "#,
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap();

        let config: AppConfig = source.try_deserialize().unwrap();

        assert_eq!(config.embedding.provider, EmbeddingProviderKind::Hashing);
        assert_eq!(config.embedding.dimensions, 64);
        assert_eq!(config.embedding.batch_size, 32);
        assert_eq!(config.index.chunk_size, 500);
        assert_eq!(config.index.chunk_overlap, 200);
        assert_eq!(config.index.on_source_error, SourceFailurePolicy::Fail);
        assert_eq!(config.server.port, 8000);
    }

    #[test]
    fn test_validate_rejects_bad_chunking() {
        let mut config = AppConfig::default();
        config.index.chunk_overlap = config.index.chunk_size;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_k() {
        let mut config = AppConfig::default();
        config.agent.retrieval_k = 0;

        assert!(config.validate().is_err());
    }
}
