//! Query service - classify a query and dispatch it to exactly one handler

use std::fmt::Debug;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tracing::{error, info, info_span, Instrument};
use uuid::Uuid;

use crate::domain::{
    AnsweringAgent, DomainError, QueryClassifier, QueryResponse, Route, RouteDecision,
};

pub const DEFAULT_OTHER_REPLY: &str = "Hello!";
pub const WEBSEARCH_REPLY: &str =
    "Web search agent not implemented yet. (Planned Tavily/SerpAPI integration).";
pub const IT_SUPPORT_REPLY: &str = "Routing to IT Support. Please provide more details.";
pub const UNKNOWN_ROUTE_REPLY: &str = "Sorry, I couldn't classify your question.";

/// Trait for the query service (for dynamic dispatch in AppState)
#[async_trait]
pub trait QueryServiceTrait: Send + Sync + Debug {
    /// Answer one query. Never fails; handler errors come back with
    /// category `ERROR`.
    async fn handle(&self, query: &str) -> QueryResponse;
}

/// Orchestrates classification and routing for a single query
pub struct QueryService {
    classifier: Arc<dyn QueryClassifier>,
    agent: Arc<dyn AnsweringAgent>,
    timeout: Duration,
}

impl Debug for QueryService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryService")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl QueryService {
    pub fn new(
        classifier: Arc<dyn QueryClassifier>,
        agent: Arc<dyn AnsweringAgent>,
        timeout: Duration,
    ) -> Self {
        Self {
            classifier,
            agent,
            timeout,
        }
    }

    async fn route(&self, query: &str) -> Result<(Route, QueryResponse), DomainError> {
        let decision = self.classifier.classify(query).await;
        let route = decision.route.clone();
        let response = self.dispatch(query, decision).await?;
        Ok((route, response))
    }

    async fn dispatch(&self, query: &str, decision: RouteDecision) -> Result<QueryResponse, DomainError> {
        let RouteDecision { route, reply } = decision;
        let category = route.category();

        let reply = match route {
            Route::Other => reply.unwrap_or_else(|| DEFAULT_OTHER_REPLY.to_string()),
            Route::RagAgent => self.agent.answer(query).await?.reply().to_string(),
            Route::WebsearchAgent => WEBSEARCH_REPLY.to_string(),
            Route::ItSupport => IT_SUPPORT_REPLY.to_string(),
            Route::Unknown(_) => UNKNOWN_ROUTE_REPLY.to_string(),
        };

        Ok(QueryResponse::new(reply, category))
    }
}

#[async_trait]
impl QueryServiceTrait for QueryService {
    async fn handle(&self, query: &str) -> QueryResponse {
        let span = info_span!("query", query_id = %Uuid::new_v4());

        async {
            let started = Instant::now();

            let outcome = match tokio::time::timeout(self.timeout, self.route(query)).await {
                Ok(result) => result,
                Err(_) => Err(DomainError::timeout(self.timeout.as_secs())),
            };

            let latency_ms = started.elapsed().as_millis() as u64;

            match outcome {
                Ok((route, response)) => {
                    info!(route = %route, category = %response.category, latency_ms, "Query handled");
                    response
                }
                Err(e) => {
                    error!(error = %e, latency_ms, "Query handler failed");
                    QueryResponse::error(e.to_string())
                }
            }
        }
        .instrument(span)
        .await
    }
}
