//! Intent routing domain types

mod classifier;
mod route;

pub use classifier::{ClassifierRetryPolicy, QueryClassifier};
pub use route::{Category, QueryResponse, Route, RouteDecision};

#[cfg(test)]
pub use classifier::MockQueryClassifier;
