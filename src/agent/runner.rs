// ABOUTME: Agent runner - executes the think-act loop for one agent pass.
// ABOUTME: Dispatches tool calls through the registry until the model answers in text.

use std::sync::Arc;

use uuid::Uuid;

use super::definition::AgentDefinition;
use crate::error::{LlmError, ToolError};
use crate::llm::{ContentBlock, LlmClient, Message, Request, Role, Usage};
use crate::tool::Registry;

/// Result from running an agent.
#[derive(Debug, Clone)]
pub struct AgentRun {
    /// Unique identifier for this agent run.
    pub agent_id: String,

    /// Final text content from the agent.
    pub content: String,

    /// Number of tool calls made during execution.
    pub tool_use_count: usize,

    /// Total token usage across all LLM calls.
    pub usage: Usage,

    /// Number of iterations in the think-act loop.
    pub iterations: usize,
}

/// One agent pass: a definition, a client, and the tools it may call.
pub struct Agent {
    agent_id: String,
    definition: AgentDefinition,
    client: Arc<dyn LlmClient>,
    tools: Registry,
    messages: Vec<Message>,
    tool_use_count: usize,
    usage: Usage,
}

impl Agent {
    pub fn new(definition: AgentDefinition, client: Arc<dyn LlmClient>, tools: Registry) -> Self {
        Self {
            agent_id: format!("{}-{}", definition.name, Uuid::new_v4()),
            definition,
            client,
            tools,
            messages: Vec::new(),
            tool_use_count: 0,
            usage: Usage::default(),
        }
    }

    pub fn agent_id(&self) -> &str {
        &self.agent_id
    }

    /// Conversation so far.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Run the agent on a task and return its final answer.
    pub async fn run(&mut self, task: &str) -> Result<AgentRun, LlmError> {
        self.messages.push(Message::user(task));
        let tool_defs = self.tools.to_definitions().await;
        tracing::debug!(agent = %self.agent_id, tools = ?self.tools.list().await, "starting run");

        let mut iterations = 0;

        loop {
            iterations += 1;

            if iterations > self.definition.max_iterations {
                return Err(LlmError::MaxIterations {
                    agent: self.definition.name.clone(),
                    max: self.definition.max_iterations,
                });
            }

            let request = Request::new(self.definition.model_name())
                .system(&self.definition.system_prompt)
                .messages(self.messages.clone())
                .tools(tool_defs.clone())
                .max_tokens(self.definition.max_tokens);

            let response = self.client.create_message(&request).await?;
            self.usage.add(&response.usage);

            if !response.has_tool_use() {
                let content = response.text();
                tracing::info!(
                    agent = %self.agent_id,
                    iterations,
                    tool_calls = self.tool_use_count,
                    "agent finished"
                );
                self.messages.push(Message::assistant(content.clone()));

                return Ok(AgentRun {
                    agent_id: self.agent_id.clone(),
                    content,
                    tool_use_count: self.tool_use_count,
                    usage: self.usage.clone(),
                    iterations,
                });
            }

            self.messages.push(Message {
                role: Role::Assistant,
                content: response.content.clone(),
            });

            let mut tool_results = Vec::new();
            for block in &response.content {
                if let ContentBlock::ToolUse { id, name, input } = block {
                    self.tool_use_count += 1;
                    tool_results.push(self.call_tool(id, name, input.clone()).await);
                }
            }

            self.messages.push(Message::tool_results(tool_results));
        }
    }

    async fn call_tool(&self, id: &str, name: &str, input: serde_json::Value) -> ContentBlock {
        tracing::debug!(agent = %self.agent_id, tool = name, "calling tool");

        let Some(tool) = self.tools.get(name).await else {
            let err = ToolError::NotFound(name.to_string());
            return ContentBlock::tool_error(id, err.to_string());
        };

        match tool.execute(input).await {
            Ok(r) if r.is_error => ContentBlock::tool_error(id, r.content),
            Ok(r) => ContentBlock::tool_result(id, r.content),
            Err(e) => ContentBlock::tool_error(id, e.to_string()),
        }
    }
}
