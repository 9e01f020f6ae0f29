// ABOUTME: AgentOutput - what a structuring pass hands to the parser stage.
// ABOUTME: Either raw prose still to be parsed, or records the agent already built.

use serde_json::{Map, Value};

use crate::parser::Record;

/// The final answer of an agent pass.
#[derive(Debug, Clone, PartialEq)]
pub enum AgentOutput {
    /// Free text that still needs parsing.
    RawText(String),
    /// Records the agent emitted as a JSON array of objects.
    Records(Vec<Record>),
}

impl AgentOutput {
    /// Classify an agent's final text.
    ///
    /// A JSON array of objects, bare or inside a ```json fence, becomes
    /// `Records`; anything else is kept verbatim as `RawText`.
    pub fn from_text(text: impl Into<String>) -> Self {
        let text = text.into();
        match serde_json::from_str::<Vec<Map<String, Value>>>(strip_fence(&text)) {
            Ok(objects) => AgentOutput::Records(objects.into_iter().map(Record::from).collect()),
            Err(_) => AgentOutput::RawText(text),
        }
    }
}

fn strip_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(body) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let body = body.strip_prefix("json").unwrap_or(body);
    body.strip_suffix("```").unwrap_or(body).trim()
}
