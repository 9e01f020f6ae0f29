// ABOUTME: Agent definition - the configuration one agent pass runs with.
// ABOUTME: Name, model, system prompt, and loop limits.

/// Default model when a definition does not name one.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Definition of one agent pass (researcher, historian, ...).
#[derive(Debug, Clone)]
pub struct AgentDefinition {
    /// Name used in logs and agent ids.
    pub name: String,

    /// Model to use. If None, [`DEFAULT_MODEL`].
    pub model: Option<String>,

    /// System prompt for this agent.
    pub system_prompt: String,

    /// Maximum iterations for the think-act loop.
    pub max_iterations: usize,

    /// Output token cap per LLM call.
    pub max_tokens: u32,
}

impl AgentDefinition {
    /// Create a new agent definition with required fields.
    pub fn new(name: impl Into<String>, system_prompt: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            model: None,
            system_prompt: system_prompt.into(),
            max_iterations: 10,
            max_tokens: 4096,
        }
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn max_iterations(mut self, max: usize) -> Self {
        self.max_iterations = max;
        self
    }

    pub fn max_tokens(mut self, max: u32) -> Self {
        self.max_tokens = max;
        self
    }

    /// The model this agent will call.
    pub fn model_name(&self) -> &str {
        self.model.as_deref().unwrap_or(DEFAULT_MODEL)
    }
}
