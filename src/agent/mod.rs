// ABOUTME: Agent module - definitions, presets, and the think-act runner.
// ABOUTME: Provides the researcher and historian passes the pipeline chains together.

mod definition;
mod output;
pub mod presets;
mod runner;

pub use definition::{AgentDefinition, DEFAULT_MODEL};
pub use output::AgentOutput;
pub use presets::Preset;
pub use runner::{Agent, AgentRun};
