use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use super::AgentRun;
use crate::domain::DomainError;

/// A capability the answering loop can invoke by name
#[async_trait]
pub trait AgentTool: Send + Sync {
    fn name(&self) -> &str;

    /// One-line description shown to the model
    fn description(&self) -> &str;

    /// Run the tool and return the observation text
    async fn call(&self, input: &str) -> Result<String, DomainError>;
}

/// Answers a question grounded on retrieved documents
#[cfg_attr(test, automock)]
#[async_trait]
pub trait AnsweringAgent: Send + Sync {
    /// Model and tool errors propagate; format errors end in a failed run
    async fn answer(&self, question: &str) -> Result<AgentRun, DomainError>;
}
