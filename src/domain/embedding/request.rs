//! Embedding request types

use serde::{Deserialize, Serialize};

/// What the embedded text will be used for
///
/// Some providers produce asymmetric embeddings for stored passages and for
/// search queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmbeddingTask {
    Document,
    Query,
}

/// Request to embed one or more texts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingRequest {
    inputs: Vec<String>,
    task: EmbeddingTask,
}

impl EmbeddingRequest {
    /// Embed passages that will be stored in the index
    pub fn documents(inputs: Vec<String>) -> Self {
        Self {
            inputs,
            task: EmbeddingTask::Document,
        }
    }

    /// Embed a single search query
    pub fn query(text: impl Into<String>) -> Self {
        Self {
            inputs: vec![text.into()],
            task: EmbeddingTask::Query,
        }
    }

    pub fn inputs(&self) -> &[String] {
        &self.inputs
    }

    pub fn task(&self) -> EmbeddingTask {
        self.task
    }

    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }
}
