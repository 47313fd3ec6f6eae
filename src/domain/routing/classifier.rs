use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use super::RouteDecision;

/// How often a failed classification is attempted before falling back
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ClassifierRetryPolicy {
    /// One model call; any failure yields the conversational fallback
    #[default]
    SingleAttempt,
}

/// Maps a raw query onto a route
///
/// Classification never fails: model and parse errors are reported as a
/// conversational fallback decision.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait QueryClassifier: Send + Sync {
    async fn classify(&self, query: &str) -> RouteDecision;
}
