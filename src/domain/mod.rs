//! Domain layer - Core business logic and entities

pub mod agent;
pub mod embedding;
pub mod error;
pub mod ingestion;
pub mod llm;
pub mod retrieval;
pub mod routing;

pub use agent::{AgentOutcome, AgentRun, AgentStep, AgentTool, AgentTurn, AnsweringAgent};
pub use embedding::{EmbeddingProvider, EmbeddingRequest, EmbeddingResponse, EmbeddingTask};
pub use error::DomainError;
pub use ingestion::{
    Chunk, ChunkingConfig, ChunkingStrategy, Document, DocumentLoader, SourceFailurePolicy,
    SourceKind, SourceLoadError, SourceSpec,
};
pub use llm::{FinishReason, LlmProvider, LlmRequest, LlmResponse, Message, MessageRole, Usage};
pub use retrieval::{IndexEntry, IndexMetadata, Retriever, ScoredChunk, VectorIndex};
pub use routing::{Category, QueryClassifier, QueryResponse, Route, RouteDecision};
