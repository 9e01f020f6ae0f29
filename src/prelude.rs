// ABOUTME: Prelude module - convenient imports for common use cases.
// ABOUTME: Use `use artctx::prelude::*;` to get started quickly.

pub use crate::agent::{Agent, AgentDefinition, AgentOutput, AgentRun};
pub use crate::config::{Config, ImageSearchConfig};
pub use crate::enrich::{GoogleImageSearch, ImageLookup, attach_artwork_images};
pub use crate::error::{
    ArtctxError, ConfigError, ImageError, LlmError, ToolError, ValidationError,
};
pub use crate::llm::{
    ContentBlock, LlmClient, Message, OpenAIClient, Request, Response, Role, StopReason,
    ToolDefinition, Usage,
};
pub use crate::parser::{Record, Schema, parse, validate};
pub use crate::pipeline::{
    ContextRequest, ContextResponse, EventSnippet, Orchestrator, Scope, summarize_influence,
};
pub use crate::tool::{Registry, Tool, ToolResult};
pub use crate::tools::{DuckDuckGoSearch, RateLimitedSearchTool, SearchProvider};
