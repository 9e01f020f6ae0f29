// ABOUTME: Defines the Tool trait - a capability an agent may invoke mid-run.
// ABOUTME: Tools have a name, description, input schema, and async execute method.

use async_trait::async_trait;

use super::ToolResult;
use crate::llm::ToolDefinition;

/// A tool that can be called by an agent.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Returns the unique name the model uses to call this tool.
    fn name(&self) -> &str;

    /// Returns a description telling the model when to use the tool.
    fn description(&self) -> &str;

    /// Returns the JSON Schema for the tool's input parameters.
    fn schema(&self) -> serde_json::Value;

    /// Execute the tool with the given parameters.
    ///
    /// Failures the model should see and react to belong in
    /// [`ToolResult::error`]; `Err` is reserved for malformed calls.
    async fn execute(&self, params: serde_json::Value) -> Result<ToolResult, anyhow::Error>;

    /// The definition advertised to the LLM.
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.name().to_string(),
            description: self.description().to_string(),
            input_schema: self.schema(),
        }
    }
}
