// ABOUTME: Built-in tools for the research agents.
// ABOUTME: Web search behind a provider trait, and its per-request rate limiter.

mod rate_limited_search;
mod web_search;

pub use rate_limited_search::{
    DEFAULT_SEARCH_LIMIT, RATE_LIMITED_MESSAGE, RateLimitedSearchTool, SEARCH_FAILED_MESSAGE,
};
pub use web_search::{DuckDuckGoSearch, SearchProvider, SearchResult};
