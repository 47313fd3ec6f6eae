//! Document ingestion domain types and traits
//!
//! This module provides:
//! - `Document` and `Chunk`, the units loaded from sources and indexed
//! - `ChunkingStrategy` for splitting documents into bounded chunks
//! - `DocumentLoader` and the source description types used by index builds

pub mod chunker;
pub mod document;
pub mod source;

pub use chunker::{ChunkingConfig, ChunkingStrategy};
pub use document::{Chunk, Document, CHUNK_INDEX_KEY, SOURCE_KEY};
pub use source::{DocumentLoader, SourceFailurePolicy, SourceKind, SourceLoadError, SourceSpec};
