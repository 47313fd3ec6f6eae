//! Prompt-driven query classification

mod llm_classifier;
mod prompt;

pub use llm_classifier::{ClassificationError, LlmQueryClassifier, FALLBACK_REPLY};
pub use prompt::build_classification_prompt;
