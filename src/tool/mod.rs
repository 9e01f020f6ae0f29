// ABOUTME: Tool module - defines tools, results, and the per-agent registry.
// ABOUTME: Core abstraction for what an agent can do besides talk.

mod registry;
mod result;
mod traits;

pub use registry::*;
pub use result::*;
pub use traits::*;
