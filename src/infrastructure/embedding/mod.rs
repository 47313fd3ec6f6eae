//! Embedding provider implementations

mod factory;
mod gemini;
mod hashing;

pub use factory::{EmbeddingProviderFactory, EmbeddingProviderKind};
pub use gemini::GeminiEmbeddingProvider;
pub use hashing::HashingEmbeddingProvider;

// Re-export HTTP client for use by embedding providers
pub use super::llm::{HttpClient, HttpClientTrait};
