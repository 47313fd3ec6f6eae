//! Durable storage for built indexes

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::path::{Path, PathBuf};

use crate::domain::retrieval::{IndexEntry, IndexMetadata, VectorIndex};
use crate::domain::DomainError;

/// Version written into every persisted index
pub const INDEX_FORMAT_VERSION: u32 = 1;

/// Loads and saves whole indexes
#[async_trait]
pub trait IndexStore: Send + Sync + Debug {
    /// `Ok(None)` when nothing has been persisted yet
    async fn load(&self) -> Result<Option<VectorIndex>, DomainError>;

    /// Replace the persisted index. Readers never observe a partial write.
    async fn save(&self, index: &VectorIndex) -> Result<(), DomainError>;
}

#[derive(Debug, Serialize, Deserialize)]
struct PersistedIndex {
    version: u32,
    model: String,
    dimensions: usize,
    built_at: DateTime<Utc>,
    entries: Vec<IndexEntry>,
}

/// Index stored as a single JSON file, replaced via write-to-temp and rename
#[derive(Debug, Clone)]
pub struct JsonIndexStore {
    path: PathBuf,
}

impl JsonIndexStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        self.path.with_extension("tmp")
    }
}

#[async_trait]
impl IndexStore for JsonIndexStore {
    async fn load(&self) -> Result<Option<VectorIndex>, DomainError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(DomainError::storage(format!(
                    "Failed to read index {}: {}",
                    self.path.display(),
                    e
                )));
            }
        };

        let persisted: PersistedIndex = serde_json::from_slice(&bytes).map_err(|e| {
            DomainError::storage(format!(
                "Failed to decode index {}: {}",
                self.path.display(),
                e
            ))
        })?;

        if persisted.version != INDEX_FORMAT_VERSION {
            return Err(DomainError::storage(format!(
                "Unsupported index format version {} (expected {})",
                persisted.version, INDEX_FORMAT_VERSION
            )));
        }

        let metadata = IndexMetadata {
            model: persisted.model,
            dimensions: persisted.dimensions,
            built_at: persisted.built_at,
        };

        VectorIndex::new(metadata, persisted.entries).map(Some)
    }

    async fn save(&self, index: &VectorIndex) -> Result<(), DomainError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                DomainError::storage(format!("Failed to create {}: {}", parent.display(), e))
            })?;
        }

        let metadata = index.metadata();
        let persisted = PersistedIndex {
            version: INDEX_FORMAT_VERSION,
            model: metadata.model.clone(),
            dimensions: metadata.dimensions,
            built_at: metadata.built_at,
            entries: index.entries().to_vec(),
        };

        let json = serde_json::to_vec(&persisted)
            .map_err(|e| DomainError::storage(format!("Failed to encode index: {}", e)))?;

        let tmp = self.tmp_path();
        tokio::fs::write(&tmp, json).await.map_err(|e| {
            DomainError::storage(format!("Failed to write {}: {}", tmp.display(), e))
        })?;
        tokio::fs::rename(&tmp, &self.path).await.map_err(|e| {
            DomainError::storage(format!(
                "Failed to move {} to {}: {}",
                tmp.display(),
                self.path.display(),
                e
            ))
        })?;

        Ok(())
    }
}
