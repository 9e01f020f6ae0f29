// ABOUTME: Pipeline module - scopes, requests, the research orchestrator, and summaries.
// ABOUTME: Ties agents, parser, validator, and enrichment into one request flow.

mod orchestrator;
mod request;
mod scope;
mod summarize;

pub use orchestrator::{Orchestrator, structure_answer};
pub use request::{ContextRequest, ContextResponse};
pub use scope::{Scope, Structuring, UnknownScope};
pub use summarize::{EventSnippet, SUMMARY_FALLBACK, summarize_influence};

#[cfg(test)]
mod orchestrator_test;
