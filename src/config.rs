// ABOUTME: Runtime configuration loaded from environment variables.
// ABOUTME: Covers the LLM key and model, search limits, and optional image search credentials.

use crate::agent::DEFAULT_MODEL;
use crate::error::ConfigError;
use crate::tools::DEFAULT_SEARCH_LIMIT;

/// Credentials for the Google Custom Search image backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSearchConfig {
    pub api_key: String,
    pub cse_id: String,
}

/// Settings for one artctx process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub openai_api_key: String,
    /// Alternative OpenAI-compatible base URL.
    pub openai_api_base: Option<String>,
    pub model: String,
    /// Web searches allowed per request.
    pub search_call_limit: usize,
    /// Think-act iterations allowed per agent pass.
    pub max_iterations: usize,
    /// Results kept from each web search.
    pub search_max_results: usize,
    /// Image enrichment is skipped when `None`.
    pub image_search: Option<ImageSearchConfig>,
}

impl Config {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from any key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let openai_api_key = get("OPENAI_API_KEY").ok_or(ConfigError::Missing("OPENAI_API_KEY"))?;

        let image_search = match (get("GOOGLE_API_KEY"), get("GOOGLE_CSE_ID")) {
            (Some(api_key), Some(cse_id)) => Some(ImageSearchConfig { api_key, cse_id }),
            _ => None,
        };

        Ok(Self {
            openai_api_key,
            openai_api_base: get("OPENAI_API_BASE"),
            model: get("ARTCTX_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            search_call_limit: parse_count(
                "SEARCH_CALL_LIMIT",
                get("SEARCH_CALL_LIMIT"),
                DEFAULT_SEARCH_LIMIT,
            )?,
            max_iterations: parse_count("ARTCTX_MAX_ITERATIONS", get("ARTCTX_MAX_ITERATIONS"), 10)?,
            search_max_results: parse_count("SEARCH_MAX_RESULTS", get("SEARCH_MAX_RESULTS"), 5)?,
            image_search,
        })
    }
}

fn parse_count(
    key: &'static str,
    value: Option<String>,
    default: usize,
) -> Result<usize, ConfigError> {
    match value {
        None => Ok(default),
        Some(value) => value
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
    }
}
