//! Reasoning-loop domain types
//!
//! The answering loop alternates model turns and tool calls until the model
//! produces a final answer or the loop gives up.

mod step;
mod tool;

pub use step::{AgentOutcome, AgentRun, AgentStep, AgentTurn, NO_ANSWER_REPLY};
pub use tool::{AgentTool, AnsweringAgent};

#[cfg(test)]
pub use tool::MockAnsweringAgent;
