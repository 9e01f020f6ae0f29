// ABOUTME: Tests for the Orchestrator - stage routing, validation, enrichment, per-request budget.
// ABOUTME: Uses a scripted LLM, a counting search provider, and canned image lookups.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{Value, json};

use super::*;
use crate::config::Config;
use crate::enrich::ImageLookup;
use crate::error::{ArtctxError, ImageError, LlmError, ValidationError};
use crate::llm::{ContentBlock, LlmClient, Request, Response, StopReason, Usage};
use crate::tools::{RATE_LIMITED_MESSAGE, SearchProvider};

struct ScriptedLlm {
    responses: Mutex<VecDeque<Response>>,
    requests: Mutex<Vec<Request>>,
}

impl ScriptedLlm {
    fn new(responses: Vec<Response>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        })
    }

    fn systems(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.system.clone().unwrap_or_default())
            .collect()
    }
}

#[async_trait]
impl LlmClient for ScriptedLlm {
    async fn create_message(&self, req: &Request) -> Result<Response, LlmError> {
        self.requests.lock().unwrap().push(req.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| LlmError::Api {
                status: 500,
                message: "script exhausted".into(),
            })
    }
}

struct CountingSearch {
    calls: AtomicUsize,
}

impl CountingSearch {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl SearchProvider for CountingSearch {
    async fn search(&self, query: &str) -> Result<String, anyhow::Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(format!("Found 1 results for \"{}\":", query))
    }
}

struct OneImage;

#[async_trait]
impl ImageLookup for OneImage {
    async fn find_image(&self, title: &str, _artist: &str) -> Result<Option<String>, ImageError> {
        match title {
            "Detroit Industry Murals" => Ok(Some("https://example.org/detroit.jpg".into())),
            _ => Err(ImageError::Status(500)),
        }
    }
}

fn config(search_call_limit: usize) -> Config {
    Config {
        openai_api_key: "sk-test".into(),
        openai_api_base: None,
        model: "gpt-4o-mini".into(),
        search_call_limit,
        max_iterations: 10,
        search_max_results: 5,
        image_search: None,
    }
}

fn search_call(id: &str, query: &str) -> Response {
    Response {
        id: format!("resp-{}", id),
        content: vec![ContentBlock::ToolUse {
            id: id.into(),
            name: "rate_limited_search_tool".into(),
            input: json!({ "query": query }),
        }],
        stop_reason: StopReason::ToolUse,
        model: "gpt-4o-mini".into(),
        usage: Usage::default(),
    }
}

fn answer(text: &str) -> Response {
    Response {
        id: "resp-final".into(),
        content: vec![ContentBlock::text(text)],
        stop_reason: StopReason::EndTurn,
        model: "gpt-4o-mini".into(),
        usage: Usage::default(),
    }
}

const POLITICAL_EVENTS: &str = "\
1. **Year:** 1910
**Title:** Mexican Revolution
**Description:** A decade of armed struggle that shaped Kahlo's identity.
**Location:** Mexico
**Source:** [Wikipedia](https://en.wikipedia.org/wiki/Mexican_Revolution)

2. **Year:** 1937
**Title:** Trotsky arrives in Coyoacán
**Description:** Kahlo hosts the exiled revolutionary at La Casa Azul.
**Location:** Coyoacán, Mexico City
**Source:** https://www.britannica.com/biography/Leon-Trotsky";

const NETWORK: &str = "\
1. **Connected Entity Name:** Diego Rivera
**Relationship Summary:** Husband and fellow muralist.
**Relationship Duration:** 1929-1954
**Connection Score:** 15
**Related Artwork:** Detroit Industry Murals
**Source:** https://en.wikipedia.org/wiki/Diego_Rivera

2. **Connected Entity Name:** André Breton
**Relationship Summary:** Promoted her work in Paris.
**Relationship Duration:** 1938-1939
**Connection Score:** 6
**Related Artwork:** What the Water Gave Me
**Source:** https://en.wikipedia.org/wiki/Andr%C3%A9_Breton";

#[tokio::test]
async fn test_parser_scope_skips_historian() {
    let llm = ScriptedLlm::new(vec![
        search_call("t1", "Frida Kahlo political context"),
        answer(POLITICAL_EVENTS),
    ]);
    let search = CountingSearch::new();
    let orchestrator = Orchestrator::new(&config(4), llm.clone(), search.clone());

    let request = ContextRequest::new("Frida Kahlo", Scope::PoliticalEvents);
    let records = orchestrator.run(&request).await.unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].get_str("date"), Some("1910"));
    assert_eq!(
        records[0].get_str("source_url"),
        Some("https://en.wikipedia.org/wiki/Mexican_Revolution")
    );
    assert_eq!(records[1].get_str("location_name"), Some("Coyoacán, Mexico City"));
    assert_eq!(search.calls.load(Ordering::SeqCst), 1);

    let systems = llm.systems();
    assert_eq!(systems.len(), 2);
    assert!(systems.iter().all(|s| s.contains("art history researcher")));
}

#[tokio::test]
async fn test_historian_scope_with_enrichment() {
    let llm = ScriptedLlm::new(vec![
        answer("Rivera married Kahlo in 1929. Breton visited in 1938."),
        answer(NETWORK),
    ]);
    let orchestrator = Orchestrator::new(&config(4), llm.clone(), CountingSearch::new())
        .with_image_lookup(Arc::new(OneImage));

    let request = ContextRequest::new("Frida Kahlo", Scope::ArtistNetwork);
    let records = orchestrator.run(&request).await.unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].get("connection_score"), Some(&json!(10)));
    assert_eq!(
        records[0].get("artwork_image_url"),
        Some(&json!("https://example.org/detroit.jpg"))
    );
    assert_eq!(records[1].get("artwork_image_url"), Some(&Value::Null));
    assert!(records.iter().all(|r| !r.contains_key("related_artwork")));

    let requests = llm.requests.lock().unwrap().clone();
    assert!(requests[1].system.as_deref().unwrap().contains("art historian"));
    assert!(requests[1].tools.is_empty());
    let ContentBlock::Text { text } = &requests[1].messages[0].content[0] else {
        panic!("expected text task");
    };
    assert!(text.contains("Rivera married Kahlo in 1929."));
}

#[tokio::test]
async fn test_without_image_lookup_related_artwork_stays() {
    let llm = ScriptedLlm::new(vec![answer("notes"), answer(NETWORK)]);
    let orchestrator = Orchestrator::new(&config(4), llm, CountingSearch::new());

    let request = ContextRequest::new("Frida Kahlo", Scope::ArtistNetwork);
    let records = orchestrator.run(&request).await.unwrap();

    assert_eq!(
        records[0].get_str("related_artwork"),
        Some("Detroit Industry Murals")
    );
    assert!(!records[0].contains_key("artwork_image_url"));
}

#[tokio::test]
async fn test_validation_failure_discards_batch() {
    let incomplete = "\
1. **Year:** 1504
**Title:** David
**Description:** Michelangelo finishes the statue.
**Source:** https://en.wikipedia.org/wiki/David_(Michelangelo)";
    let llm = ScriptedLlm::new(vec![answer(incomplete)]);
    let orchestrator = Orchestrator::new(&config(4), llm, CountingSearch::new());

    let request = ContextRequest::new("Michelangelo", Scope::PersonalEvents);
    let err = orchestrator.run(&request).await.unwrap_err();

    match err {
        ArtctxError::Validation(ValidationError::DefaultValue { index, ref field }) => {
            assert_eq!(index, 0);
            assert_eq!(field, "location_name");
        }
        other => panic!("expected validation error, got {:?}", other),
    }

    let response = ContextResponse::from_result(Scope::PersonalEvents, Err(err));
    assert!(response.records.is_empty());
    assert!(response.error.unwrap().contains("location_name"));
}

#[tokio::test]
async fn test_historian_json_records_are_completed() {
    let json_answer = r#"```json
[{"event_title": "Salon d'Automne", "date": "1905", "detailed_summary": "Fauvism is named.",
  "location_name": "Paris", "source_url": "https://en.wikipedia.org/wiki/Fauvism"}]
```"#;
    let llm = ScriptedLlm::new(vec![answer("notes"), answer(json_answer)]);
    let orchestrator = Orchestrator::new(&config(4), llm, CountingSearch::new());

    let request = ContextRequest::new("Henri Matisse", Scope::ArtMovements);
    let records = orchestrator.run(&request).await.unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].get("latitude"), Some(&Value::Null));
    assert_eq!(records[0].get_str("location_name"), Some("Paris"));
}

#[tokio::test]
async fn test_historian_unknown_key_is_rejected() {
    let json_answer = r#"[{"event_title": "Salon d'Automne", "painter": "Matisse"}]"#;
    let llm = ScriptedLlm::new(vec![answer("notes"), answer(json_answer)]);
    let orchestrator = Orchestrator::new(&config(4), llm, CountingSearch::new());

    let request = ContextRequest::new("Henri Matisse", Scope::Genre);
    let err = orchestrator.run(&request).await.unwrap_err();

    let ArtctxError::Validation(e) = err else {
        panic!("expected validation error");
    };
    assert_eq!(e.reason(), "unrecognized key");
}

#[tokio::test]
async fn test_search_budget_is_per_request() {
    let llm = ScriptedLlm::new(vec![
        search_call("a1", "first"),
        search_call("a2", "second"),
        answer(POLITICAL_EVENTS),
        search_call("b1", "third"),
        answer(POLITICAL_EVENTS),
    ]);
    let search = CountingSearch::new();
    let orchestrator = Orchestrator::new(&config(1), llm.clone(), search.clone());
    let request = ContextRequest::new("Frida Kahlo", Scope::EconomicEvents);

    orchestrator.run(&request).await.unwrap();
    assert_eq!(search.calls.load(Ordering::SeqCst), 1);

    orchestrator.run(&request).await.unwrap();
    assert_eq!(search.calls.load(Ordering::SeqCst), 2);

    let requests = llm.requests.lock().unwrap().clone();
    let refused = requests[2].messages.last().unwrap();
    assert!(matches!(
        &refused.content[0],
        ContentBlock::ToolResult { content, .. } if content == RATE_LIMITED_MESSAGE
    ));
}

#[tokio::test]
async fn test_llm_failure_is_an_error() {
    let llm = ScriptedLlm::new(vec![]);
    let orchestrator = Orchestrator::new(&config(4), llm, CountingSearch::new());

    let request = ContextRequest::new("Frida Kahlo", Scope::Medium);
    let err = orchestrator.run(&request).await.unwrap_err();
    assert!(matches!(err, ArtctxError::Llm(LlmError::Api { status: 500, .. })));
}

#[tokio::test]
async fn test_query_and_model_reach_researcher() {
    let llm = ScriptedLlm::new(vec![answer(POLITICAL_EVENTS)]);
    let mut cfg = config(4);
    cfg.model = "gpt-4o".into();
    let orchestrator = Orchestrator::new(&cfg, llm.clone(), CountingSearch::new());

    let request =
        ContextRequest::new("Frida Kahlo", Scope::PoliticalEvents).artwork("The Two Fridas");
    orchestrator.run(&request).await.unwrap();

    let requests = llm.requests.lock().unwrap().clone();
    assert_eq!(requests[0].model, "gpt-4o");
    assert_eq!(requests[0].tools.len(), 1);
    assert_eq!(requests[0].tools[0].name, "rate_limited_search_tool");
    assert_eq!(
        requests[0].messages[0].content[0],
        ContentBlock::text(
            "Frida Kahlo: [political background] with a focus on the artwork \"The Two Fridas\""
        )
    );
}

#[test]
fn test_structure_answer_offline() {
    let records = structure_answer(NETWORK, Scope::ArtistNetwork).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[1].get("connection_score"), Some(&json!(6)));

    let err = structure_answer("1. **Title:** Untitled", Scope::Genre).unwrap_err();
    assert_eq!(err.reason(), "default value still present for required field");
}

#[test]
fn test_json_records_get_schema_transforms() {
    let json_answer = r#"[
        {"connected_entity_name": "Diego Rivera", "relationship_summary": "Husband.",
         "relationship_duration": "1929-1954", "connection_score": 15,
         "source_url": "see (https://example.com/page)"},
        {"connected_entity_name": "Tina Modotti", "relationship_summary": "Friend.",
         "relationship_duration": "1928-1930", "connection_score": "7",
         "source_url": "https://en.wikipedia.org/wiki/Tina_Modotti"}
    ]"#;

    let records = structure_answer(json_answer, Scope::ArtistNetwork).unwrap();

    assert_eq!(records[0].get("connection_score"), Some(&json!(10)));
    assert_eq!(
        records[0].get_str("source_url"),
        Some("https://example.com/page")
    );
    assert_eq!(records[1].get("connection_score"), Some(&json!(7)));
    assert_eq!(records[1].get("related_artwork"), Some(&json!("")));
}
