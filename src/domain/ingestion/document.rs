//! Documents and the chunks cut from them

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Metadata key holding the path a document was loaded from
pub const SOURCE_KEY: &str = "source";

/// Metadata key holding a chunk's position within its parent document
pub const CHUNK_INDEX_KEY: &str = "chunk_index";

/// A raw document loaded from a source file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    content: String,
    metadata: BTreeMap<String, String>,
}

impl Document {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            metadata: BTreeMap::new(),
        }
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn metadata(&self) -> &BTreeMap<String, String> {
        &self.metadata
    }

    pub fn source(&self) -> Option<&str> {
        self.metadata.get(SOURCE_KEY).map(String::as_str)
    }
}

/// A bounded slice of a document; the unit of retrieval
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    content: String,
    metadata: BTreeMap<String, String>,
}

impl Chunk {
    /// Cut a chunk from `parent`, inheriting its metadata
    pub fn from_parent(parent: &Document, index: usize, content: impl Into<String>) -> Self {
        let mut metadata = parent.metadata.clone();
        metadata.insert(CHUNK_INDEX_KEY.to_string(), index.to_string());

        Self {
            content: content.into(),
            metadata,
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn metadata(&self) -> &BTreeMap<String, String> {
        &self.metadata
    }

    pub fn source(&self) -> Option<&str> {
        self.metadata.get(SOURCE_KEY).map(String::as_str)
    }

    pub fn chunk_index(&self) -> Option<usize> {
        self.metadata
            .get(CHUNK_INDEX_KEY)
            .and_then(|v| v.parse().ok())
    }

    /// Length in characters
    pub fn len(&self) -> usize {
        self.content.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}
