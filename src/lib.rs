//! Query Router
//!
//! Routes workplace questions to a specialized handler:
//! - Prompt-driven intent classification
//! - Retrieval-augmented answering over company documents
//! - Persistent embedding index with lazy build and atomic rebuild

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;
use std::time::Duration;

use api::state::AppState;
use config::gemini_api_key;
use domain::{AgentTool, DomainError, EmbeddingProvider, LlmProvider};
use infrastructure::{
    agent::{AgentLimits, ReactAgent, RetrieveDocumentsTool},
    classifier::LlmQueryClassifier,
    embedding::EmbeddingProviderFactory,
    index::{IndexManager, IndexProvider, IndexRetriever, IndexSources, JsonIndexStore},
    ingestion::{BuildOptions, DocumentStoreBuilder, FileDocumentLoader, RecursiveChunker},
    llm::LlmProviderFactory,
    services::QueryService,
};
use tracing::info;

/// Long-lived services shared by every query
#[derive(Debug, Clone)]
pub struct Components {
    pub index_manager: Arc<IndexManager>,
    pub query_service: Arc<QueryService>,
}

/// Create the embedding provider, reading the API key only when the
/// configured provider needs one
pub fn create_embedding_provider(config: &AppConfig) -> Result<Arc<dyn EmbeddingProvider>, DomainError> {
    let api_key = if config.embedding.provider.requires_api_key() {
        Some(gemini_api_key()?)
    } else {
        None
    };

    EmbeddingProviderFactory::create(&config.embedding, api_key.as_deref())
}

/// Create the index manager over the configured sources and index file
pub fn create_index_manager(
    config: &AppConfig,
    embedder: Arc<dyn EmbeddingProvider>,
) -> Result<IndexManager, DomainError> {
    let options = BuildOptions {
        chunking: config.index.chunking(),
        batch_size: config.embedding.batch_size,
        on_source_error: config.index.on_source_error,
    };

    let builder = DocumentStoreBuilder::new(
        Arc::new(FileDocumentLoader::new()),
        Arc::new(RecursiveChunker::new()),
        embedder,
        options,
    )?;

    Ok(IndexManager::new(
        builder,
        Arc::new(JsonIndexStore::new(config.index.path.clone())),
        IndexSources::from_config(&config.index.sources, &config.index.data_dir),
    ))
}

/// Wire classifier, answering loop and retrieval into a query service
pub fn create_query_service(
    config: &AppConfig,
    llm: Arc<dyn LlmProvider>,
    embedder: Arc<dyn EmbeddingProvider>,
    index: Arc<dyn IndexProvider>,
) -> QueryService {
    let classifier = LlmQueryClassifier::new(Arc::clone(&llm), &config.llm.model)
        .with_temperature(config.llm.temperature);

    let retriever = Arc::new(IndexRetriever::new(index, embedder));
    let tools: Vec<Arc<dyn AgentTool>> = vec![Arc::new(RetrieveDocumentsTool::new(
        retriever,
        config.agent.retrieval_k,
    ))];

    let agent = ReactAgent::new(llm, &config.llm.model, tools)
        .with_temperature(config.llm.temperature)
        .with_limits(AgentLimits {
            max_iterations: config.agent.max_iterations,
            max_parse_errors: config.agent.max_parse_errors,
        });

    QueryService::new(
        Arc::new(classifier),
        Arc::new(agent),
        Duration::from_secs(config.orchestrator.request_timeout_secs),
    )
}

/// Create every component from configuration.
///
/// Fails when `GEMINI_API_KEY` is missing.
pub fn create_components(config: &AppConfig) -> anyhow::Result<Components> {
    let api_key = gemini_api_key()?;
    let llm = LlmProviderFactory::create(&config.llm, &api_key)?;
    let embedder = create_embedding_provider(config)?;

    info!(
        llm_model = %config.llm.model,
        embedding_model = %embedder.model(),
        index_path = %config.index.path.display(),
        "Creating components"
    );

    let index_manager = Arc::new(create_index_manager(config, Arc::clone(&embedder))?);
    let query_service = Arc::new(create_query_service(
        config,
        llm,
        embedder,
        index_manager.clone(),
    ));

    Ok(Components {
        index_manager,
        query_service,
    })
}

/// Create the application state for the HTTP API
pub fn create_app_state(components: &Components) -> AppState {
    AppState::new(components.query_service.clone())
}
