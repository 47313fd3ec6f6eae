//! ReAct-style answering loop
//!
//! Each step renders the question, the tool catalogue and the scratchpad of
//! previous turns, asks the model for its next move, and either runs the
//! requested tool or finishes with the model's final answer.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use super::parser::{parse_step, truncate_at_stop, OBSERVATION_STOP};
use super::prompt::{build_react_prompt, tool_names};
use crate::domain::agent::{AgentRun, AgentStep, AgentTool, AgentTurn, AnsweringAgent};
use crate::domain::llm::{LlmProvider, LlmRequest};
use crate::domain::DomainError;

/// Bounds on a single answering run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgentLimits {
    /// Model turns before the run is abandoned
    pub max_iterations: usize,
    /// Malformed model outputs tolerated before the run is abandoned
    pub max_parse_errors: usize,
}

impl Default for AgentLimits {
    fn default() -> Self {
        Self {
            max_iterations: 15,
            max_parse_errors: 3,
        }
    }
}

pub struct ReactAgent {
    provider: Arc<dyn LlmProvider>,
    model: String,
    temperature: Option<f32>,
    tools: Vec<Arc<dyn AgentTool>>,
    limits: AgentLimits,
}

impl std::fmt::Debug for ReactAgent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReactAgent")
            .field("model", &self.model)
            .field("tools", &tool_names(&self.tools))
            .field("limits", &self.limits)
            .finish()
    }
}

impl ReactAgent {
    pub fn new(
        provider: Arc<dyn LlmProvider>,
        model: impl Into<String>,
        tools: Vec<Arc<dyn AgentTool>>,
    ) -> Self {
        Self {
            provider,
            model: model.into(),
            temperature: None,
            tools,
            limits: AgentLimits::default(),
        }
    }

    pub fn with_limits(mut self, limits: AgentLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn with_temperature(mut self, temperature: Option<f32>) -> Self {
        self.temperature = temperature;
        self
    }

    fn find_tool(&self, name: &str) -> Option<&Arc<dyn AgentTool>> {
        self.tools.iter().find(|t| t.name() == name)
    }

    async fn next_output(&self, question: &str, turns: &[AgentTurn]) -> Result<String, DomainError> {
        let prompt = build_react_prompt(question, &self.tools, turns);

        let mut builder = LlmRequest::builder().user(prompt).stop(OBSERVATION_STOP);
        if let Some(temperature) = self.temperature {
            builder = builder.temperature(temperature);
        }

        let output = self.provider.complete(&self.model, builder.build()).await?;
        Ok(truncate_at_stop(&output, OBSERVATION_STOP))
    }

    async fn observe(&self, tool: &str, input: &str) -> Result<String, DomainError> {
        match self.find_tool(tool) {
            Some(found) => found.call(input).await,
            None => Ok(format!(
                "{} is not a valid tool, try one of [{}].",
                tool,
                tool_names(&self.tools)
            )),
        }
    }
}

#[async_trait]
impl AnsweringAgent for ReactAgent {
    async fn answer(&self, question: &str) -> Result<AgentRun, DomainError> {
        let mut turns: Vec<AgentTurn> = Vec::new();
        let mut parse_errors = 0;

        for iteration in 1..=self.limits.max_iterations {
            let output = self.next_output(question, &turns).await?;

            match parse_step(&output) {
                AgentStep::FinalAnswer(answer) => {
                    info!(iterations = iteration, "Answering loop finished");
                    turns.push(AgentTurn::new(output));
                    return Ok(AgentRun::done(answer, turns));
                }
                AgentStep::Action { tool, input } => {
                    debug!(iteration, tool = %tool, input = %input, "Agent action");
                    let observation = self.observe(&tool, &input).await?;

                    turns.push(AgentTurn {
                        thought: output,
                        action: Some(tool),
                        action_input: Some(input),
                        observation: Some(observation),
                    });
                }
                AgentStep::ParseError { message } => {
                    parse_errors += 1;
                    warn!(iteration, parse_errors, error = %message, "Malformed agent output");

                    turns.push(AgentTurn {
                        thought: output,
                        observation: Some(message),
                        ..Default::default()
                    });

                    if parse_errors >= self.limits.max_parse_errors {
                        return Ok(AgentRun::failed("too many malformed outputs", turns));
                    }
                }
            }
        }

        warn!(max_iterations = self.limits.max_iterations, "Answering loop hit iteration limit");
        Ok(AgentRun::failed("iteration limit reached", turns))
    }
}
