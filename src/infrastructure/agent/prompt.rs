use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::domain::agent::{AgentTool, AgentTurn};

const REACT_TEMPLATE: &str = r#"You are a helpful assistant answering workplace questions using company documents.

You have access to the following tools:
${tools}

Tool names: ${tool_names}

Always first use the `retrieve_documents` tool to fetch relevant context.

Format strictly:
Thought: ...
Action: <tool name>
Action Input: <tool input>
Observation: <tool output>
... repeat as needed
Thought: I now know the final answer
Final Answer: <the user-facing answer>

Question: ${input}
${agent_scratchpad}"#;

/// Template placeholders such as `${input}`
static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\{([a-z_]+)\}").expect("placeholder pattern is valid"));

/// Render the prompt for the next reasoning step
pub fn build_react_prompt(question: &str, tools: &[Arc<dyn AgentTool>], turns: &[AgentTurn]) -> String {
    let descriptions = tools
        .iter()
        .map(|t| format!("{}: {}", t.name(), t.description()))
        .collect::<Vec<_>>()
        .join("\n");

    let names = tool_names(tools);
    let scratchpad = format_scratchpad(turns);

    // Substituted values are never rescanned for placeholders
    PLACEHOLDER
        .replace_all(REACT_TEMPLATE, |caps: &Captures| match &caps[1] {
            "tools" => descriptions.clone(),
            "tool_names" => names.clone(),
            "input" => question.to_string(),
            "agent_scratchpad" => scratchpad.clone(),
            _ => caps[0].to_string(),
        })
        .into_owned()
}

pub(crate) fn tool_names(tools: &[Arc<dyn AgentTool>]) -> String {
    tools.iter().map(|t| t.name()).collect::<Vec<_>>().join(", ")
}

/// Replay prior turns as `<output>\nObservation: <obs>\nThought: ` blocks
pub fn format_scratchpad(turns: &[AgentTurn]) -> String {
    turns
        .iter()
        .filter_map(|turn| {
            turn.observation
                .as_ref()
                .map(|obs| format!("{}\nObservation: {}\nThought: ", turn.thought, obs))
        })
        .collect()
}
