//! Document store builder: load, chunk and embed sources into an index

use std::sync::Arc;
use std::time::Instant;

use futures::stream::{self, StreamExt};
use tracing::{info, warn};

use crate::domain::embedding::{EmbeddingProvider, EmbeddingRequest};
use crate::domain::ingestion::{
    Chunk, ChunkingConfig, ChunkingStrategy, Document, DocumentLoader, SourceFailurePolicy,
    SourceSpec,
};
use crate::domain::retrieval::{IndexEntry, IndexMetadata, VectorIndex};
use crate::domain::DomainError;

/// Sources read concurrently while loading
const LOAD_CONCURRENCY: usize = 4;

/// Settings for one index build
#[derive(Debug, Clone, Copy)]
pub struct BuildOptions {
    pub chunking: ChunkingConfig,
    pub batch_size: usize,
    pub on_source_error: SourceFailurePolicy,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            chunking: ChunkingConfig::default(),
            batch_size: 32,
            on_source_error: SourceFailurePolicy::Skip,
        }
    }
}

/// Turns raw sources into a `VectorIndex`
#[derive(Debug, Clone)]
pub struct DocumentStoreBuilder {
    loader: Arc<dyn DocumentLoader>,
    chunker: Arc<dyn ChunkingStrategy>,
    embedder: Arc<dyn EmbeddingProvider>,
    options: BuildOptions,
}

impl DocumentStoreBuilder {
    pub fn new(
        loader: Arc<dyn DocumentLoader>,
        chunker: Arc<dyn ChunkingStrategy>,
        embedder: Arc<dyn EmbeddingProvider>,
        options: BuildOptions,
    ) -> Result<Self, DomainError> {
        options.chunking.validate()?;

        if options.batch_size == 0 {
            return Err(DomainError::validation("batch_size must be greater than 0"));
        }

        Ok(Self {
            loader,
            chunker,
            embedder,
            options,
        })
    }

    /// Model name recorded in indexes built by this builder
    pub fn embedding_model(&self) -> &str {
        self.embedder.model()
    }

    /// Build an index from `sources`.
    ///
    /// Unloadable sources are skipped or abort the build depending on the
    /// configured policy. Embedding failures always abort.
    pub async fn build(&self, sources: &[SourceSpec]) -> Result<VectorIndex, DomainError> {
        let started = Instant::now();

        let documents = self.load_documents(sources).await?;
        let chunks = self.chunk_documents(&documents)?;
        let entries = self.embed_chunks(chunks).await?;

        let dimensions = entries.first().map(|e| e.embedding.len()).unwrap_or(0);
        let metadata = IndexMetadata::new(self.embedder.model(), dimensions);
        let index = VectorIndex::new(metadata, entries)?;

        info!(
            sources = sources.len(),
            documents = documents.len(),
            chunks = index.len(),
            dimensions,
            duration_ms = started.elapsed().as_millis() as u64,
            "Built document index"
        );

        Ok(index)
    }

    async fn load_documents(&self, sources: &[SourceSpec]) -> Result<Vec<Document>, DomainError> {
        let results: Vec<_> = stream::iter(sources.iter().cloned())
            .map(|source| {
                let loader = Arc::clone(&self.loader);
                async move {
                    let result = loader.load(&source).await;
                    (source, result)
                }
            })
            .buffered(LOAD_CONCURRENCY)
            .collect()
            .await;

        let mut documents = Vec::new();

        for (source, result) in results {
            match result {
                Ok(docs) => documents.extend(docs),
                Err(e) => match self.options.on_source_error {
                    SourceFailurePolicy::Skip => {
                        warn!(source = %source.display_path(), error = %e, "Skipping source");
                    }
                    SourceFailurePolicy::Fail => {
                        return Err(DomainError::validation(e.to_string()));
                    }
                },
            }
        }

        Ok(documents)
    }

    fn chunk_documents(&self, documents: &[Document]) -> Result<Vec<Chunk>, DomainError> {
        let mut chunks = Vec::new();

        for document in documents {
            chunks.extend(self.chunker.split_document(document, &self.options.chunking)?);
        }

        Ok(chunks)
    }

    async fn embed_chunks(&self, chunks: Vec<Chunk>) -> Result<Vec<IndexEntry>, DomainError> {
        let mut entries = Vec::with_capacity(chunks.len());

        for batch in chunks.chunks(self.options.batch_size) {
            let inputs = batch.iter().map(|c| c.content().to_string()).collect();
            let response = self.embedder.embed(EmbeddingRequest::documents(inputs)).await?;
            let vectors = response.into_vectors();

            if vectors.len() != batch.len() {
                return Err(DomainError::provider(
                    self.embedder.provider_name(),
                    format!("Expected {} embeddings, got {}", batch.len(), vectors.len()),
                ));
            }

            entries.extend(
                batch
                    .iter()
                    .cloned()
                    .zip(vectors)
                    .map(|(chunk, vector)| IndexEntry::new(chunk, vector)),
            );
        }

        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::embedding::MockEmbeddingProvider;
    use crate::domain::ingestion::SourceLoadError;
    use crate::infrastructure::ingestion::{FileDocumentLoader, RecursiveChunker};
    use tempfile::TempDir;

    fn builder(embedder: Arc<dyn EmbeddingProvider>, options: BuildOptions) -> DocumentStoreBuilder {
        DocumentStoreBuilder::new(
            Arc::new(FileDocumentLoader::new()),
            Arc::new(RecursiveChunker::new()),
            embedder,
            options,
        )
        .unwrap()
    }

    fn write(dir: &TempDir, name: &str, content: &str) -> SourceSpec {
        let path = dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        SourceSpec::from_path(path).unwrap()
    }

    #[tokio::test]
    async fn test_build_indexes_every_chunk() {
        let dir = TempDir::new().unwrap();
        let sources = vec![
            write(&dir, "policies.txt", "Leave policy.\n\nRemote work policy."),
            write(&dir, "faq.json", r#"[{"q": "Wifi?"}, {"q": "Parking?"}]"#),
        ];
        let embedder = Arc::new(MockEmbeddingProvider::new(8));

        let index = builder(embedder.clone(), BuildOptions::default())
            .build(&sources)
            .await
            .unwrap();

        assert_eq!(index.len(), 3);
        assert_eq!(index.metadata().dimensions, 8);
        assert_eq!(index.metadata().model, "mock-embedding");
        assert_eq!(embedder.call_count(), 1);
    }

    #[tokio::test]
    async fn test_embeds_in_batches() {
        let dir = TempDir::new().unwrap();
        let items: Vec<String> = (0..5).map(|i| format!("{{\"n\": {}}}", i)).collect();
        let sources = vec![write(&dir, "items.json", &format!("[{}]", items.join(",")))];
        let embedder = Arc::new(MockEmbeddingProvider::new(4));
        let options = BuildOptions {
            batch_size: 2,
            ..Default::default()
        };

        let index = builder(embedder.clone(), options).build(&sources).await.unwrap();

        assert_eq!(index.len(), 5);
        assert_eq!(embedder.call_count(), 3);
    }

    #[tokio::test]
    async fn test_unreadable_source_is_skipped() {
        let dir = TempDir::new().unwrap();
        let sources = vec![
            write(&dir, "broken.json", "{oops"),
            SourceSpec::from_path(dir.path().join("missing.txt")).unwrap(),
            write(&dir, "handbook.txt", "Working hours are 9 to 5."),
        ];

        let index = builder(Arc::new(MockEmbeddingProvider::new(4)), BuildOptions::default())
            .build(&sources)
            .await
            .unwrap();

        assert_eq!(index.len(), 1);
        assert_eq!(index.entries()[0].chunk.content(), "Working hours are 9 to 5.");
    }

    #[tokio::test]
    async fn test_fail_policy_aborts() {
        let dir = TempDir::new().unwrap();
        let sources = vec![write(&dir, "broken.json", "{oops")];
        let options = BuildOptions {
            on_source_error: SourceFailurePolicy::Fail,
            ..Default::default()
        };

        let result = builder(Arc::new(MockEmbeddingProvider::new(4)), options)
            .build(&sources)
            .await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_embedding_failure_aborts() {
        let dir = TempDir::new().unwrap();
        let sources = vec![write(&dir, "handbook.txt", "Working hours are 9 to 5.")];
        let embedder = Arc::new(MockEmbeddingProvider::new(4).with_error("quota exceeded"));

        let result = builder(embedder, BuildOptions::default()).build(&sources).await;

        assert!(matches!(result, Err(DomainError::Provider { .. })));
    }

    #[tokio::test]
    async fn test_build_runs_on_spawned_task() {
        let dir = TempDir::new().unwrap();
        let sources = vec![
            write(&dir, "a.txt", "Badges are issued at reception."),
            write(&dir, "b.txt", "Lunch is served at noon."),
        ];
        let builder = builder(Arc::new(MockEmbeddingProvider::new(4)), BuildOptions::default());

        let index = tokio::spawn(async move { builder.build(&sources).await })
            .await
            .unwrap()
            .unwrap();

        assert_eq!(index.len(), 2);
    }

    #[tokio::test]
    async fn test_no_sources_builds_empty_index() {
        let embedder = Arc::new(MockEmbeddingProvider::new(4));

        let index = builder(embedder.clone(), BuildOptions::default())
            .build(&[])
            .await
            .unwrap();

        assert!(index.is_empty());
        assert_eq!(embedder.call_count(), 0);
    }

    #[test]
    fn test_rejects_zero_batch_size() {
        let options = BuildOptions {
            batch_size: 0,
            ..Default::default()
        };

        let result = DocumentStoreBuilder::new(
            Arc::new(FileDocumentLoader::new()),
            Arc::new(RecursiveChunker::new()),
            Arc::new(MockEmbeddingProvider::new(4)),
            options,
        );

        assert!(result.is_err());
    }

    #[test]
    fn test_source_error_message() {
        let err = SourceLoadError::Unsupported {
            path: "x.pdf".into(),
        };
        assert_eq!(err.to_string(), "Unsupported source type: x.pdf");
    }
}
