// ABOUTME: Defines all error types for artctx using thiserror.
// ABOUTME: Each concern has its own error enum, unified under ArtctxError.

/// Top-level error type for artctx.
#[derive(Debug, thiserror::Error)]
pub enum ArtctxError {
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Tool error: {0}")]
    Tool(#[from] ToolError),

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Image lookup error: {0}")]
    Image(#[from] ImageError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors from LLM client operations.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Deserialization error: {0}")]
    Deserialize(#[from] serde_json::Error),

    #[error("Agent '{agent}' exceeded max iterations ({max})")]
    MaxIterations { agent: String, max: usize },
}

/// Errors from tool operations.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("Tool not found: {0}")]
    NotFound(String),

    #[error("Invalid parameters: {0}")]
    InvalidParams(String),

    #[error("Execution failed: {0}")]
    Execution(#[source] anyhow::Error),
}

/// A batch of parsed records that failed validation.
///
/// Validation is all-or-nothing, so the variant describes the first
/// offending record; the whole batch must be discarded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("record {index}: unrecognized key '{key}'")]
    UnrecognizedKey { index: usize, key: String },

    #[error("record {index}: default value still present for required field '{field}'")]
    DefaultValue { index: usize, field: String },
}

impl ValidationError {
    /// The short, field-independent reason for the failure.
    pub fn reason(&self) -> &'static str {
        match self {
            ValidationError::UnrecognizedKey { .. } => "unrecognized key",
            ValidationError::DefaultValue { .. } => {
                "default value still present for required field"
            }
        }
    }
}

/// Errors from artwork image lookup.
#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Image search returned status {0}")]
    Status(u16),
}

/// Errors from loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required setting {0}")]
    Missing(&'static str),

    #[error("invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}
