use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use crate::domain::ingestion::Chunk;
use crate::domain::DomainError;

/// Returns the chunks most similar to a query
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Retriever: Send + Sync {
    /// At most `k` chunks, most similar first. `k` must be positive.
    async fn retrieve(&self, query: &str, k: usize) -> Result<Vec<Chunk>, DomainError>;
}
