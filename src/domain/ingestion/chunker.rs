//! Chunking strategy trait and configuration

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use super::{Chunk, Document};
use crate::domain::DomainError;

/// Configuration for chunking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkingConfig {
    /// Maximum chunk size in characters
    pub chunk_size: usize,
    /// Maximum overlap between consecutive chunks in characters
    pub chunk_overlap: usize,
}

impl ChunkingConfig {
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Self {
        Self {
            chunk_size,
            chunk_overlap,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.chunk_size == 0 {
            return Err(DomainError::validation("chunk_size must be greater than 0"));
        }

        if self.chunk_overlap >= self.chunk_size {
            return Err(DomainError::validation(
                "chunk_overlap must be less than chunk_size",
            ));
        }

        Ok(())
    }
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: 1000,
            chunk_overlap: 200,
        }
    }
}

/// Trait for chunking strategies
pub trait ChunkingStrategy: Send + Sync + Debug {
    /// Split raw text into chunk contents, in document order
    fn split_text(&self, text: &str, config: &ChunkingConfig) -> Result<Vec<String>, DomainError>;

    /// Get the strategy name
    fn name(&self) -> &'static str;

    /// Split a document into chunks that inherit its metadata
    fn split_document(
        &self,
        document: &Document,
        config: &ChunkingConfig,
    ) -> Result<Vec<Chunk>, DomainError> {
        let pieces = self.split_text(document.content(), config)?;

        Ok(pieces
            .into_iter()
            .enumerate()
            .map(|(index, content)| Chunk::from_parent(document, index, content))
            .collect())
    }
}
