// ABOUTME: Root module for artctx - agent-driven artist context research.
// ABOUTME: Re-exports the parser, search limiter, agents, and request pipeline.

pub mod agent;
pub mod config;
pub mod coordinator;
pub mod enrich;
pub mod error;
pub mod llm;
pub mod parser;
pub mod pipeline;
pub mod prelude;
pub mod tool;
pub mod tools;

pub use error::ArtctxError;
