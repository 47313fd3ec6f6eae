//! Layered application configuration

mod app_config;

pub use app_config::{
    gemini_api_key, AgentConfig, AppConfig, EmbeddingConfig, IndexConfig, LlmConfig, LogFormat,
    LoggingConfig, OrchestratorConfig, ServerConfig, GEMINI_API_KEY_ENV,
};
