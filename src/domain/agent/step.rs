use serde::Serialize;

/// Reply used when the loop ends without a final answer
pub const NO_ANSWER_REPLY: &str = "No answer generated.";

/// Parsed interpretation of one model output
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgentStep {
    /// The model produced its answer
    FinalAnswer(String),
    /// The model requested a tool call
    Action { tool: String, input: String },
    /// The output did not follow the expected format
    ParseError { message: String },
}

/// One thought/action/observation step of the reasoning trace
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AgentTurn {
    /// Raw model output for this step, truncated at the stop sequence
    pub thought: String,
    pub action: Option<String>,
    pub action_input: Option<String>,
    pub observation: Option<String>,
}

impl AgentTurn {
    pub fn new(thought: impl Into<String>) -> Self {
        Self {
            thought: thought.into(),
            ..Default::default()
        }
    }
}

/// Terminal state of the answering loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgentOutcome {
    Done(String),
    Failed { reason: String },
}

/// Result of answering one question, with its trace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentRun {
    pub outcome: AgentOutcome,
    pub turns: Vec<AgentTurn>,
}

impl AgentRun {
    pub fn done(answer: impl Into<String>, turns: Vec<AgentTurn>) -> Self {
        Self {
            outcome: AgentOutcome::Done(answer.into()),
            turns,
        }
    }

    pub fn failed(reason: impl Into<String>, turns: Vec<AgentTurn>) -> Self {
        Self {
            outcome: AgentOutcome::Failed {
                reason: reason.into(),
            },
            turns,
        }
    }

    /// Text returned to the user
    pub fn reply(&self) -> &str {
        match &self.outcome {
            AgentOutcome::Done(answer) => answer,
            AgentOutcome::Failed { .. } => NO_ANSWER_REPLY,
        }
    }

    pub fn is_done(&self) -> bool {
        matches!(self.outcome, AgentOutcome::Done(_))
    }
}
