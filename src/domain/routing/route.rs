//! Routes, classifier decisions and the normalized query response

use serde::{Deserialize, Serialize};
use std::fmt;

/// Intent a query is dispatched on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    RagAgent,
    WebsearchAgent,
    ItSupport,
    Other,
    /// Label produced by the model that is outside the known set
    Unknown(String),
}

impl Route {
    pub const RAG_AGENT: &'static str = "RAG_AGENT";
    pub const WEBSEARCH_AGENT: &'static str = "WEBSEARCH_AGENT";
    pub const IT_SUPPORT: &'static str = "IT_SUPPORT";
    pub const OTHER: &'static str = "OTHER";

    /// Map a classifier label onto a route. Matching is exact.
    pub fn from_label(label: &str) -> Self {
        match label {
            Self::RAG_AGENT => Self::RagAgent,
            Self::WEBSEARCH_AGENT => Self::WebsearchAgent,
            Self::IT_SUPPORT => Self::ItSupport,
            Self::OTHER => Self::Other,
            other => Self::Unknown(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::RagAgent => Self::RAG_AGENT,
            Self::WebsearchAgent => Self::WEBSEARCH_AGENT,
            Self::ItSupport => Self::IT_SUPPORT,
            Self::Other => Self::OTHER,
            Self::Unknown(label) => label,
        }
    }

    /// Response category for a query answered on this route
    pub fn category(&self) -> Category {
        match self {
            Self::RagAgent => Category::RagAgent,
            Self::WebsearchAgent => Category::WebsearchAgent,
            Self::ItSupport => Category::ItSupport,
            Self::Other => Category::Other,
            Self::Unknown(_) => Category::Unknown,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Output of the classifier for one query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDecision {
    pub route: Route,
    /// Direct reply, only meaningful for `Route::Other`
    pub reply: Option<String>,
}

impl RouteDecision {
    pub fn new(route: Route) -> Self {
        Self { route, reply: None }
    }

    /// A conversational decision carrying its own reply
    pub fn other(reply: impl Into<String>) -> Self {
        Self {
            route: Route::Other,
            reply: Some(reply.into()),
        }
    }

    /// Build a decision from a route and raw reply text. Blank replies and
    /// replies on non-conversational routes are dropped.
    pub fn with_reply(route: Route, reply: Option<String>) -> Self {
        let reply = match route {
            Route::Other => reply.filter(|r| !r.trim().is_empty()),
            _ => None,
        };

        Self { route, reply }
    }
}

/// Category attached to every response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    RagAgent,
    WebsearchAgent,
    ItSupport,
    Other,
    Unknown,
    Error,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RagAgent => "RAG_AGENT",
            Self::WebsearchAgent => "WEBSEARCH_AGENT",
            Self::ItSupport => "IT_SUPPORT",
            Self::Other => "OTHER",
            Self::Unknown => "UNKNOWN",
            Self::Error => "ERROR",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalized answer to a query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryResponse {
    pub reply: String,
    pub category: Category,
}

impl QueryResponse {
    pub fn new(reply: impl Into<String>, category: Category) -> Self {
        Self {
            reply: reply.into(),
            category,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, Category::Error)
    }

    pub fn is_error(&self) -> bool {
        self.category == Category::Error
    }
}
