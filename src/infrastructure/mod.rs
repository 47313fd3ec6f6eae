//! Infrastructure layer - External service implementations

pub mod agent;
pub mod classifier;
pub mod embedding;
pub mod index;
pub mod ingestion;
pub mod llm;
pub mod logging;
pub mod services;
