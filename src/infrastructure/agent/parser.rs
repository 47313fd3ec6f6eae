//! Parser for the model's thought/action output grammar

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::agent::AgentStep;

/// Stop sequence that ends a model turn before it invents an observation
pub const OBSERVATION_STOP: &str = "\nObservation:";

const FINAL_ANSWER_MARKER: &str = "Final Answer:";

pub const MISSING_ACTION: &str = "Invalid Format: Missing 'Action:' after 'Thought:'";
pub const MISSING_ACTION_INPUT: &str = "Invalid Format: Missing 'Action Input:' after 'Action:'";
pub const INVALID_RESPONSE: &str = "Invalid or incomplete response";

static ACTION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)Action\s*\d*\s*:[\s]*(.*?)[\s]*Action\s*\d*\s*Input\s*\d*\s*:[\s]*(.*)")
        .expect("valid action regex")
});

static ACTION_ONLY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)Action\s*\d*\s*:[\s]*(.*?)").expect("valid action regex"));

static ACTION_INPUT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)[\s]*Action\s*\d*\s*Input\s*\d*\s*:[\s]*(.*)").expect("valid action input regex")
});

/// Cut model output at the first observation stop sequence
pub fn truncate_at_stop(output: &str, stop: &str) -> String {
    match output.find(stop) {
        Some(position) => output[..position].to_string(),
        None => output.to_string(),
    }
}

/// Interpret one model output
pub fn parse_step(text: &str) -> AgentStep {
    let includes_answer = text.contains(FINAL_ANSWER_MARKER);

    if let Some(captures) = ACTION_RE.captures(text) {
        if includes_answer {
            return AgentStep::ParseError {
                message: INVALID_RESPONSE.to_string(),
            };
        }

        let tool = captures.get(1).map(|m| m.as_str().trim()).unwrap_or_default();
        let input = captures
            .get(2)
            .map(|m| m.as_str().trim_matches(' ').trim_matches('"'))
            .unwrap_or_default();

        return AgentStep::Action {
            tool: tool.to_string(),
            input: input.to_string(),
        };
    }

    if includes_answer {
        let answer = text
            .rsplit(FINAL_ANSWER_MARKER)
            .next()
            .unwrap_or_default()
            .trim();
        return AgentStep::FinalAnswer(answer.to_string());
    }

    let message = if !ACTION_ONLY_RE.is_match(text) {
        MISSING_ACTION
    } else if !ACTION_INPUT_RE.is_match(text) {
        MISSING_ACTION_INPUT
    } else {
        INVALID_RESPONSE
    };

    AgentStep::ParseError {
        message: message.to_string(),
    }
}
