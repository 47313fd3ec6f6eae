//! Thought/action/observation answering loop

mod parser;
mod prompt;
mod react;
mod retrieve_tool;

pub use parser::{parse_step, truncate_at_stop, OBSERVATION_STOP};
pub use prompt::{build_react_prompt, format_scratchpad};
pub use react::{AgentLimits, ReactAgent};
pub use retrieve_tool::{RetrieveDocumentsTool, NO_DOCUMENTS_FOUND};
