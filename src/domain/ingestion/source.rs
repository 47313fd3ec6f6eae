//! Raw document sources and the loader contract

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::Document;

/// Format of a source file, derived from its extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// Plain text or markdown, loaded as a single document
    Text,
    /// JSON array (one document per item) or object (one document)
    Json,
}

impl SourceKind {
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();

        match extension.as_str() {
            "txt" | "md" => Some(Self::Text),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// A single file to load during an index build
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSpec {
    pub path: PathBuf,
    pub kind: SourceKind,
}

impl SourceSpec {
    /// Describe a source by path, rejecting unsupported extensions
    pub fn from_path(path: impl Into<PathBuf>) -> Result<Self, SourceLoadError> {
        let path = path.into();
        let kind = SourceKind::from_path(&path)
            .ok_or_else(|| SourceLoadError::Unsupported { path: path.clone() })?;

        Ok(Self { path, kind })
    }

    pub fn display_path(&self) -> String {
        self.path.display().to_string()
    }
}

/// Failure to turn one source into documents
#[derive(Debug, Error)]
pub enum SourceLoadError {
    #[error("Failed to read {path}: {message}")]
    Read { path: PathBuf, message: String },

    #[error("Failed to decode {path}: {message}")]
    Decode { path: PathBuf, message: String },

    #[error("Unsupported source type: {path}")]
    Unsupported { path: PathBuf },
}

/// What an index build does when a source cannot be loaded
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceFailurePolicy {
    /// Log a warning and continue with the remaining sources
    #[default]
    Skip,
    /// Abort the build on the first failing source
    Fail,
}

/// Turns a source file into documents
#[async_trait]
pub trait DocumentLoader: Send + Sync + Debug {
    async fn load(&self, source: &SourceSpec) -> Result<Vec<Document>, SourceLoadError>;
}
