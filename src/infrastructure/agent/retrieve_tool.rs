use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::agent::AgentTool;
use crate::domain::retrieval::Retriever;
use crate::domain::DomainError;

/// Observation returned when retrieval finds nothing
pub const NO_DOCUMENTS_FOUND: &str = "No relevant documents found.";

/// `retrieve_documents`: fetches the top-k chunks for the tool input
pub struct RetrieveDocumentsTool {
    retriever: Arc<dyn Retriever>,
    k: usize,
}

impl RetrieveDocumentsTool {
    pub const NAME: &'static str = "retrieve_documents";
    pub const DESCRIPTION: &'static str = "Retrieve relevant company documents for the query.";

    pub fn new(retriever: Arc<dyn Retriever>, k: usize) -> Self {
        Self { retriever, k }
    }
}

#[async_trait]
impl AgentTool for RetrieveDocumentsTool {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn description(&self) -> &str {
        Self::DESCRIPTION
    }

    async fn call(&self, input: &str) -> Result<String, DomainError> {
        let chunks = self.retriever.retrieve(input, self.k).await?;

        if chunks.is_empty() {
            return Ok(NO_DOCUMENTS_FOUND.to_string());
        }

        Ok(chunks
            .iter()
            .map(|c| c.content())
            .collect::<Vec<_>>()
            .join("\n\n"))
    }
}
