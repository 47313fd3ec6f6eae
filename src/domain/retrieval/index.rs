//! Exact nearest-neighbour index over chunk embeddings

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::embedding::cosine_similarity;
use crate::domain::ingestion::Chunk;
use crate::domain::DomainError;

/// A chunk and its embedding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexEntry {
    pub chunk: Chunk,
    pub embedding: Vec<f32>,
}

impl IndexEntry {
    pub fn new(chunk: Chunk, embedding: Vec<f32>) -> Self {
        Self { chunk, embedding }
    }
}

/// Provenance recorded alongside the vectors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexMetadata {
    /// Embedding model the vectors were produced with
    pub model: String,
    pub dimensions: usize,
    pub built_at: DateTime<Utc>,
}

impl IndexMetadata {
    pub fn new(model: impl Into<String>, dimensions: usize) -> Self {
        Self {
            model: model.into(),
            dimensions,
            built_at: Utc::now(),
        }
    }
}

/// A chunk ranked against a query
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredChunk {
    pub chunk: Chunk,
    pub score: f32,
}

/// Immutable collection of embedded chunks with brute-force cosine lookup
#[derive(Debug, Clone, PartialEq)]
pub struct VectorIndex {
    metadata: IndexMetadata,
    entries: Vec<IndexEntry>,
}

impl VectorIndex {
    /// Create an index, checking every vector has the declared dimensionality
    pub fn new(metadata: IndexMetadata, entries: Vec<IndexEntry>) -> Result<Self, DomainError> {
        if let Some(position) = entries
            .iter()
            .position(|e| e.embedding.len() != metadata.dimensions)
        {
            return Err(DomainError::validation(format!(
                "Embedding {} has {} dimensions, expected {}",
                position,
                entries[position].embedding.len(),
                metadata.dimensions
            )));
        }

        Ok(Self { metadata, entries })
    }

    pub fn empty(model: impl Into<String>) -> Self {
        Self {
            metadata: IndexMetadata::new(model, 0),
            entries: Vec::new(),
        }
    }

    pub fn metadata(&self) -> &IndexMetadata {
        &self.metadata
    }

    pub fn entries(&self) -> &[IndexEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Return at most `k` chunks ordered by descending similarity.
    /// Equal scores keep insertion order.
    pub fn nearest_neighbors(&self, query: &[f32], k: usize) -> Vec<ScoredChunk> {
        let mut scored: Vec<(usize, f32)> = self
            .entries
            .iter()
            .enumerate()
            .map(|(i, entry)| (i, cosine_similarity(query, &entry.embedding)))
            .collect();

        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(k);

        scored
            .into_iter()
            .map(|(i, score)| ScoredChunk {
                chunk: self.entries[i].chunk.clone(),
                score,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ingestion::Document;

    fn entry(text: &str, embedding: Vec<f32>) -> IndexEntry {
        let doc = Document::new(text);
        IndexEntry::new(Chunk::from_parent(&doc, 0, text), embedding)
    }

    fn index(entries: Vec<IndexEntry>) -> VectorIndex {
        VectorIndex::new(IndexMetadata::new("test", 2), entries).unwrap()
    }

    #[test]
    fn test_nearest_neighbors_ranks_by_similarity() {
        let index = index(vec![
            entry("east", vec![1.0, 0.0]),
            entry("north", vec![0.0, 1.0]),
            entry("north-east", vec![1.0, 1.0]),
        ]);

        let results = index.nearest_neighbors(&[0.0, 1.0], 2);

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].chunk.content(), "north");
        assert_eq!(results[1].chunk.content(), "north-east");
        assert!(results[0].score >= results[1].score);
    }

    #[test]
    fn test_ties_keep_index_order() {
        let index = index(vec![
            entry("first", vec![1.0, 0.0]),
            entry("second", vec![2.0, 0.0]),
            entry("third", vec![3.0, 0.0]),
        ]);

        let results = index.nearest_neighbors(&[1.0, 0.0], 3);
        let contents: Vec<_> = results.iter().map(|r| r.chunk.content()).collect();

        assert_eq!(contents, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_k_larger_than_index() {
        let index = index(vec![entry("only", vec![1.0, 0.0])]);

        assert_eq!(index.nearest_neighbors(&[1.0, 0.0], 10).len(), 1);
    }

    #[test]
    fn test_dimension_mismatch_is_rejected() {
        let result = VectorIndex::new(
            IndexMetadata::new("test", 3),
            vec![entry("bad", vec![1.0, 0.0])],
        );

        assert!(result.is_err());
    }

    #[test]
    fn test_empty_index() {
        let index = VectorIndex::empty("test");

        assert!(index.is_empty());
        assert!(index.nearest_neighbors(&[1.0], 3).is_empty());
    }
}
