//! LLM-backed query classifier
//!
//! One model call per query. The reply is expected to be a JSON object with
//! a `route` label and an optional `reply`; anything else falls back to a
//! conversational "please rephrase" decision.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, error};

use super::prompt::build_classification_prompt;
use crate::domain::llm::{LlmProvider, LlmRequest};
use crate::domain::routing::{ClassifierRetryPolicy, QueryClassifier, Route, RouteDecision};
use crate::domain::DomainError;

/// Reply used when the model output cannot be turned into a decision
pub const FALLBACK_REPLY: &str = "Sorry, I didn't understand. Can you rephrase?";

/// Why a classification attempt failed
#[derive(Debug, Error)]
pub enum ClassificationError {
    #[error("Model call failed: {0}")]
    Model(#[from] DomainError),

    #[error("Unparseable classifier output: {0}")]
    Parse(String),
}

#[derive(Debug)]
pub struct LlmQueryClassifier {
    provider: Arc<dyn LlmProvider>,
    model: String,
    temperature: Option<f32>,
    retry_policy: ClassifierRetryPolicy,
}

impl LlmQueryClassifier {
    pub fn new(provider: Arc<dyn LlmProvider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
            temperature: None,
            retry_policy: ClassifierRetryPolicy::default(),
        }
    }

    pub fn with_temperature(mut self, temperature: Option<f32>) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn retry_policy(&self) -> ClassifierRetryPolicy {
        self.retry_policy
    }

    /// Classify without the fallback, surfacing the failure reason
    pub async fn try_classify(&self, query: &str) -> Result<RouteDecision, ClassificationError> {
        let mut builder = LlmRequest::builder().user(build_classification_prompt(query));
        if let Some(temperature) = self.temperature {
            builder = builder.temperature(temperature);
        }

        let output = self.provider.complete(&self.model, builder.build()).await?;
        debug!(output = %output, "Classifier output");

        parse_decision(&output)
    }
}

#[async_trait]
impl QueryClassifier for LlmQueryClassifier {
    async fn classify(&self, query: &str) -> RouteDecision {
        match self.retry_policy {
            ClassifierRetryPolicy::SingleAttempt => match self.try_classify(query).await {
                Ok(decision) => decision,
                Err(e) => {
                    error!(error = %e, "Classification failed, using fallback reply");
                    RouteDecision::other(FALLBACK_REPLY)
                }
            },
        }
    }
}

/// Find the outermost `{...}` span, tolerating code fences and prose
fn extract_json(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;

    (start < end).then(|| &text[start..=end])
}

/// Decode a classifier reply into a decision
pub(crate) fn parse_decision(output: &str) -> Result<RouteDecision, ClassificationError> {
    let json = extract_json(output).ok_or_else(|| ClassificationError::Parse(output.to_string()))?;

    let value: serde_json::Value =
        serde_json::from_str(json).map_err(|e| ClassificationError::Parse(e.to_string()))?;

    let object = value
        .as_object()
        .ok_or_else(|| ClassificationError::Parse("expected a JSON object".to_string()))?;

    let route = match object.get("route") {
        None | Some(serde_json::Value::Null) => Route::Other,
        Some(serde_json::Value::String(label)) => Route::from_label(label.trim()),
        Some(other) => {
            return Err(ClassificationError::Parse(format!(
                "route must be a string, got {}",
                other
            )));
        }
    };

    let reply = object
        .get("reply")
        .and_then(|r| r.as_str())
        .map(str::to_string);

    Ok(RouteDecision::with_reply(route, reply))
}
