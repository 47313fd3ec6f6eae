//! Similarity retrieval over embedded chunks

mod index;
mod retriever;

pub use index::{IndexEntry, IndexMetadata, ScoredChunk, VectorIndex};
pub use retriever::Retriever;

#[cfg(test)]
pub use retriever::MockRetriever;
