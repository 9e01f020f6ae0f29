// ABOUTME: Orchestrator - runs one research request from query to validated records.
// ABOUTME: Researcher, optional historian, parse, validate, then image enrichment.

use std::sync::Arc;

use crate::agent::{Agent, AgentOutput, presets};
use crate::config::Config;
use crate::enrich::{GoogleImageSearch, ImageLookup, RELATED_ARTWORK_FIELD, attach_artwork_images};
use crate::error::{ArtctxError, ToolError, ValidationError};
use crate::llm::{LlmClient, OpenAIClient};
use crate::parser::{Record, parse, validate};
use crate::tool::Registry;
use crate::tools::{DuckDuckGoSearch, RateLimitedSearchTool, SearchProvider};

use super::{ContextRequest, Scope, Structuring};

/// Turn an agent's final answer into validated records for `scope`.
///
/// Prose goes through the parser; a JSON array of records is completed with
/// schema defaults and run through the schema's URL extraction and
/// transforms. Either way the whole batch is validated.
pub fn structure_answer(
    answer: impl Into<String>,
    scope: Scope,
) -> Result<Vec<Record>, ValidationError> {
    let schema = scope.schema();
    let records: Vec<Record> = match AgentOutput::from_text(answer) {
        AgentOutput::RawText(text) => parse(&text, &schema),
        AgentOutput::Records(records) => records
            .into_iter()
            .map(|record| schema.normalize(schema.complete(record)))
            .collect(),
    };
    validate(&records, &schema)?;
    Ok(records)
}

/// Runs research requests against shared, immutable collaborators.
///
/// Every call to [`Orchestrator::run`] builds its own search tool and agents,
/// so the search budget never leaks between requests.
pub struct Orchestrator {
    client: Arc<dyn LlmClient>,
    search: Arc<dyn SearchProvider>,
    images: Option<Arc<dyn ImageLookup>>,
    model: String,
    search_call_limit: usize,
    max_iterations: usize,
}

impl Orchestrator {
    pub fn new(config: &Config, client: Arc<dyn LlmClient>, search: Arc<dyn SearchProvider>) -> Self {
        Self {
            client,
            search,
            images: None,
            model: config.model.clone(),
            search_call_limit: config.search_call_limit,
            max_iterations: config.max_iterations,
        }
    }

    /// Wire up the production collaborators named by `config`.
    pub fn from_config(config: &Config) -> Result<Self, ArtctxError> {
        let mut client = OpenAIClient::new(&config.openai_api_key);
        if let Some(base) = &config.openai_api_base {
            client = client.with_api_base(base);
        }

        let search = DuckDuckGoSearch::new(config.search_max_results)
            .map_err(|e| ToolError::Execution(e.into()))?;

        let mut orchestrator = Self::new(config, Arc::new(client), Arc::new(search));
        if let Some(images) = &config.image_search {
            let lookup = GoogleImageSearch::new(&images.api_key, &images.cse_id)?;
            orchestrator = orchestrator.with_image_lookup(Arc::new(lookup));
        }
        Ok(orchestrator)
    }

    pub fn with_image_lookup(mut self, images: Arc<dyn ImageLookup>) -> Self {
        self.images = Some(images);
        self
    }

    /// Research one request and return its validated records.
    ///
    /// Validation is all-or-nothing: one bad record fails the request.
    pub async fn run(&self, request: &ContextRequest) -> Result<Vec<Record>, ArtctxError> {
        let scope = request.scope;
        let schema = scope.schema();
        let query = request.research_query();

        let search = Arc::new(RateLimitedSearchTool::new(
            self.search.clone(),
            self.search_call_limit,
        ));
        let tools = Registry::new();
        tools.register_arc(search.clone()).await;

        let researcher_def = presets::researcher(scope, self.search_call_limit)
            .model(&self.model)
            .max_iterations(self.max_iterations);
        let mut researcher = Agent::new(researcher_def, self.client.clone(), tools);
        let research = researcher.run(&query).await?;
        tracing::info!(
            %scope,
            searches = search.call_count(),
            iterations = research.iterations,
            "research finished"
        );

        let answer = match scope.structuring() {
            Structuring::Historian => {
                let historian_def = presets::historian(scope).model(&self.model);
                let mut historian = Agent::new(historian_def, self.client.clone(), Registry::new());
                let notes = format!("Research notes for {}:\n\n{}", query, research.content);
                historian.run(&notes).await?.content
            }
            Structuring::Parser => research.content,
        };

        let mut records = match structure_answer(answer, scope) {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!(%scope, error = %e, "discarding batch");
                return Err(e.into());
            }
        };
        tracing::info!(%scope, records = records.len(), "structured agent output");

        if records.is_empty() {
            tracing::warn!(%scope, artist = %request.artist_name, "no records found");
        }

        if let Some(images) = self.images.as_ref().filter(|_| schema.has_field(RELATED_ARTWORK_FIELD)) {
            attach_artwork_images(&mut records, &request.artist_name, images.as_ref()).await;
        }

        Ok(records)
    }
}
