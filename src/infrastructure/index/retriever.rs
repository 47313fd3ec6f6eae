use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

use super::IndexProvider;
use crate::domain::embedding::EmbeddingProvider;
use crate::domain::ingestion::Chunk;
use crate::domain::retrieval::Retriever;
use crate::domain::DomainError;

/// Cosine-similarity retriever over the active index
#[derive(Clone)]
pub struct IndexRetriever {
    index: Arc<dyn IndexProvider>,
    embedder: Arc<dyn EmbeddingProvider>,
}

impl std::fmt::Debug for IndexRetriever {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IndexRetriever")
            .field("embedder", &self.embedder)
            .finish_non_exhaustive()
    }
}

impl IndexRetriever {
    pub fn new(index: Arc<dyn IndexProvider>, embedder: Arc<dyn EmbeddingProvider>) -> Self {
        Self { index, embedder }
    }
}

#[async_trait]
impl Retriever for IndexRetriever {
    async fn retrieve(&self, query: &str, k: usize) -> Result<Vec<Chunk>, DomainError> {
        if k == 0 {
            return Err(DomainError::validation("k must be greater than 0"));
        }

        let index = self.index.index().await?;

        if index.is_empty() {
            return Ok(vec![]);
        }

        let vector = self.embedder.embed_query(query).await?;
        let results = index.nearest_neighbors(&vector, k);

        debug!(
            k,
            returned = results.len(),
            top_score = results.first().map(|r| r.score),
            "Retrieved chunks"
        );

        Ok(results.into_iter().map(|r| r.chunk).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::embedding::MockEmbeddingProvider;
    use crate::domain::ingestion::Document;
    use crate::domain::retrieval::{IndexEntry, IndexMetadata, VectorIndex};
    use crate::infrastructure::embedding::HashingEmbeddingProvider;

    struct FixedIndex(Arc<VectorIndex>);

    #[async_trait]
    impl IndexProvider for FixedIndex {
        async fn index(&self) -> Result<Arc<VectorIndex>, DomainError> {
            Ok(Arc::clone(&self.0))
        }
    }

    async fn hashed_index(embedder: &HashingEmbeddingProvider, texts: &[&str]) -> Arc<dyn IndexProvider> {
        let mut entries = Vec::new();
        for (i, text) in texts.iter().enumerate() {
            let doc = Document::new(*text);
            let vector = embedder.embed_query(text).await.unwrap();
            entries.push(IndexEntry::new(Chunk::from_parent(&doc, i, *text), vector));
        }
        let metadata = IndexMetadata::new(embedder.model(), embedder.dimensions());
        Arc::new(FixedIndex(Arc::new(VectorIndex::new(metadata, entries).unwrap())))
    }

    #[tokio::test]
    async fn test_returns_most_similar_first() {
        let embedder = HashingEmbeddingProvider::new(256).unwrap();
        let index = hashed_index(
            &embedder,
            &[
                "The VPN client must be updated monthly",
                "Employees receive 20 annual leave days",
                "Lunch is served at noon in the cafeteria",
            ],
        )
        .await;
        let retriever = IndexRetriever::new(index, Arc::new(embedder));

        let chunks = retriever.retrieve("how many annual leave days", 2).await.unwrap();

        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].content(), "Employees receive 20 annual leave days");
    }

    #[tokio::test]
    async fn test_never_returns_more_than_k() {
        let embedder = HashingEmbeddingProvider::new(64).unwrap();
        let index = hashed_index(&embedder, &["a", "b", "c", "d", "e"]).await;
        let retriever = IndexRetriever::new(index, Arc::new(embedder));

        assert_eq!(retriever.retrieve("a", 3).await.unwrap().len(), 3);
        assert_eq!(retriever.retrieve("a", 10).await.unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_empty_index_skips_embedding() {
        let embedder = Arc::new(MockEmbeddingProvider::new(4));
        let index: Arc<dyn IndexProvider> =
            Arc::new(FixedIndex(Arc::new(VectorIndex::empty("mock-embedding"))));
        let retriever = IndexRetriever::new(index, embedder.clone());

        let chunks = retriever.retrieve("anything", 3).await.unwrap();

        assert!(chunks.is_empty());
        assert_eq!(embedder.call_count(), 0);
    }

    #[tokio::test]
    async fn test_zero_k_is_validation_error() {
        let index: Arc<dyn IndexProvider> =
            Arc::new(FixedIndex(Arc::new(VectorIndex::empty("mock-embedding"))));
        let retriever = IndexRetriever::new(index, Arc::new(MockEmbeddingProvider::new(4)));

        let err = retriever.retrieve("anything", 0).await.unwrap_err();

        assert!(matches!(err, DomainError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_embedding_error_propagates() {
        let embedder = HashingEmbeddingProvider::new(8).unwrap();
        let index = hashed_index(&embedder, &["a"]).await;
        let failing = Arc::new(MockEmbeddingProvider::new(8).with_error("down"));
        let retriever = IndexRetriever::new(index, failing);

        assert!(retriever.retrieve("a", 1).await.is_err());
    }
}
