// ABOUTME: LLM module - client abstraction for language model providers.
// ABOUTME: Defines types, the client trait, and the OpenAI implementation.

mod client;
mod openai;
mod types;

pub use client::*;
pub use openai::*;
pub use types::*;
