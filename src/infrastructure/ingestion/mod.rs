//! Document ingestion infrastructure
//!
//! This module provides the file loader, the recursive chunker and the
//! builder that turns sources into a searchable index.

pub mod builder;
pub mod chunkers;
pub mod loader;

pub use builder::{BuildOptions, DocumentStoreBuilder};
pub use chunkers::RecursiveChunker;
pub use loader::{discover_sources, FileDocumentLoader, ITEM_INDEX_KEY};
