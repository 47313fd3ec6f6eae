//! Lifecycle of the active index: lazy load-or-build, rebuild and swap

use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::{info, warn};

use super::IndexStore;
use crate::domain::ingestion::SourceSpec;
use crate::domain::retrieval::VectorIndex;
use crate::domain::DomainError;
use crate::infrastructure::ingestion::{discover_sources, DocumentStoreBuilder};

/// Hands out the index queries should run against
#[async_trait]
pub trait IndexProvider: Send + Sync {
    async fn index(&self) -> Result<Arc<VectorIndex>, DomainError>;
}

/// Where an index build takes its sources from
#[derive(Debug, Clone)]
pub enum IndexSources {
    /// Exactly these files
    Explicit(Vec<PathBuf>),
    /// Every supported file directly inside the directory
    Directory(PathBuf),
}

impl IndexSources {
    /// Explicit sources win over directory discovery when any are listed
    pub fn from_config(sources: &[PathBuf], data_dir: &std::path::Path) -> Self {
        if sources.is_empty() {
            Self::Directory(data_dir.to_path_buf())
        } else {
            Self::Explicit(sources.to_vec())
        }
    }

    async fn resolve(&self) -> Result<Vec<SourceSpec>, DomainError> {
        match self {
            Self::Directory(dir) => discover_sources(dir).await,
            Self::Explicit(paths) => Ok(paths
                .iter()
                .filter_map(|path| match SourceSpec::from_path(path.clone()) {
                    Ok(spec) => Some(spec),
                    Err(e) => {
                        warn!(error = %e, "Skipping configured source");
                        None
                    }
                })
                .collect()),
        }
    }
}

/// Owns the active index
///
/// Readers clone an `Arc` out of the lock and query it without holding the
/// lock. Loading and building are serialized by `build_lock`, so concurrent
/// first accesses build once. A rebuild is persisted before it is swapped in;
/// readers holding the previous `Arc` keep using it.
#[derive(Debug)]
pub struct IndexManager {
    builder: DocumentStoreBuilder,
    store: Arc<dyn IndexStore>,
    sources: IndexSources,
    current: RwLock<Option<Arc<VectorIndex>>>,
    build_lock: Mutex<()>,
}

impl IndexManager {
    pub fn new(builder: DocumentStoreBuilder, store: Arc<dyn IndexStore>, sources: IndexSources) -> Self {
        Self {
            builder,
            store,
            sources,
            current: RwLock::new(None),
            build_lock: Mutex::new(()),
        }
    }

    /// The active index, loading it from storage or building it on first use
    pub async fn get(&self) -> Result<Arc<VectorIndex>, DomainError> {
        if let Some(index) = self.current.read().await.as_ref() {
            return Ok(Arc::clone(index));
        }

        let _guard = self.build_lock.lock().await;

        if let Some(index) = self.current.read().await.as_ref() {
            return Ok(Arc::clone(index));
        }

        let index = match self.load_compatible().await {
            Some(index) => index,
            None => self.build_and_persist().await?,
        };

        let index = Arc::new(index);
        *self.current.write().await = Some(Arc::clone(&index));
        Ok(index)
    }

    /// Build a fresh index from the sources, persist it, then make it active.
    /// On failure the previous index stays active.
    pub async fn rebuild(&self) -> Result<Arc<VectorIndex>, DomainError> {
        let _guard = self.build_lock.lock().await;

        let index = Arc::new(self.build_and_persist().await?);
        *self.current.write().await = Some(Arc::clone(&index));

        info!(chunks = index.len(), "Swapped in rebuilt index");
        Ok(index)
    }

    /// Whether an index is currently active in memory
    pub async fn is_loaded(&self) -> bool {
        self.current.read().await.is_some()
    }

    async fn load_compatible(&self) -> Option<VectorIndex> {
        match self.store.load().await {
            Ok(Some(index)) => {
                let expected = self.builder.embedding_model();

                if !index.is_empty() && index.metadata().model != expected {
                    warn!(
                        persisted = %index.metadata().model,
                        expected,
                        "Persisted index was built with a different embedding model, rebuilding"
                    );
                    return None;
                }

                info!(chunks = index.len(), "Loaded persisted index");
                Some(index)
            }
            Ok(None) => {
                info!("No persisted index found, building");
                None
            }
            Err(e) => {
                warn!(error = %e, "Failed to load persisted index, rebuilding");
                None
            }
        }
    }

    async fn build_and_persist(&self) -> Result<VectorIndex, DomainError> {
        let sources = self.sources.resolve().await?;
        let index = self.builder.build(&sources).await?;
        self.store.save(&index).await?;
        Ok(index)
    }
}

#[async_trait]
impl IndexProvider for IndexManager {
    async fn index(&self) -> Result<Arc<VectorIndex>, DomainError> {
        self.get().await
    }
}
