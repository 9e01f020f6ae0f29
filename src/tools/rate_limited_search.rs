// ABOUTME: RateLimitedSearchTool - caps how many web searches an agent may run per request.
// ABOUTME: Refusals and search failures come back as text so the agent loop keeps going.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use super::SearchProvider;
use crate::coordinator::CallBudget;
use crate::error::ToolError;
use crate::tool::{Tool, ToolResult};

/// Returned once the search budget for the current request is spent.
pub const RATE_LIMITED_MESSAGE: &str = "No additional searches allowed due to rate limits. Continue to next step and DO NOT ATTEMPT TO SEARCH AGAIN.";

/// Returned when the underlying search fails.
pub const SEARCH_FAILED_MESSAGE: &str =
    "Could not search. Continue to the next step and DO NOT ATTEMPT TO SEARCH AGAIN.";

/// Default number of searches allowed per request.
pub const DEFAULT_SEARCH_LIMIT: usize = 4;

/// Web search with a hard per-request call limit.
///
/// The budget is request-scoped: call [`RateLimitedSearchTool::reset`] before
/// reusing an instance for a new top-level request, or build a fresh one.
pub struct RateLimitedSearchTool {
    provider: Arc<dyn SearchProvider>,
    budget: CallBudget,
    description: String,
}

impl RateLimitedSearchTool {
    pub fn new(provider: Arc<dyn SearchProvider>, limit: usize) -> Self {
        Self {
            provider,
            budget: CallBudget::new(limit),
            description: format!(
                "Searches the web for the information given in the query, and returns several \
                 links as well as a brief summary of the information found at those links. \
                 Limited to {} searches.",
                limit
            ),
        }
    }

    /// Run one search, or explain why no search was run.
    ///
    /// Never fails: an exhausted budget or a provider error both produce a
    /// sentinel message telling the agent to stop searching.
    pub async fn call(&self, query: &str) -> String {
        if !self.budget.try_acquire() {
            tracing::warn!(query, limit = self.budget.limit(), "search limit hit, skipping query");
            return RATE_LIMITED_MESSAGE.to_string();
        }

        match self.provider.search(query).await {
            Ok(results) => results,
            Err(e) => {
                tracing::warn!(query, error = %e, "search failed");
                SEARCH_FAILED_MESSAGE.to_string()
            }
        }
    }

    /// Restore the full budget for a new request.
    pub fn reset(&self) {
        self.budget.reset();
    }

    /// Searches issued in the current cycle.
    pub fn call_count(&self) -> usize {
        self.budget.used()
    }

    pub fn limit(&self) -> usize {
        self.budget.limit()
    }
}

#[async_trait]
impl Tool for RateLimitedSearchTool {
    fn name(&self) -> &str {
        "rate_limited_search_tool"
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "The search query you will perform on the search engine"
                }
            },
            "required": ["query"]
        })
    }

    async fn execute(&self, params: serde_json::Value) -> Result<ToolResult, anyhow::Error> {
        #[derive(Deserialize)]
        struct Params {
            query: String,
        }

        let params: Params = serde_json::from_value(params)
            .map_err(|e| ToolError::InvalidParams(e.to_string()))?;
        let content = self.call(&params.query).await;

        Ok(ToolResult::text(content).with_metadata("searches_used", self.call_count()))
    }
}
