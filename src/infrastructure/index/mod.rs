//! Index persistence, lifecycle and retrieval

mod manager;
mod retriever;
mod store;

pub use manager::{IndexManager, IndexProvider, IndexSources};
pub use retriever::IndexRetriever;
pub use store::{IndexStore, JsonIndexStore, INDEX_FORMAT_VERSION};
