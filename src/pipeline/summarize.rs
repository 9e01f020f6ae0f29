// ABOUTME: Influence summary - one paragraph on how a set of events shaped an artist's work.
// ABOUTME: Any LLM failure degrades to a fixed fallback sentence.

use serde::{Deserialize, Serialize};

use crate::llm::{LlmClient, Message, Request};

/// Returned when the summary cannot be generated.
pub const SUMMARY_FALLBACK: &str = "Error generating summary.";

/// An event as shown to the user: its title and a short snippet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventSnippet {
    pub title: String,
    #[serde(default)]
    pub snippet: String,
}

impl EventSnippet {
    pub fn new(title: impl Into<String>, snippet: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            snippet: snippet.into(),
        }
    }
}

fn system_prompt(artist: &str) -> String {
    format!(
        "Summarize how the historical events influenced {}'s work in a single concise paragraph. \
         Avoid listing events separately. Maintain historical accuracy and neutrality.",
        artist
    )
}

fn events_text(events: &[EventSnippet]) -> String {
    events
        .iter()
        .map(|e| format!("{}: {}", e.title, e.snippet))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Summarize how `events` influenced `artist`. Never fails.
pub async fn summarize_influence(
    client: &dyn LlmClient,
    model: &str,
    artist: &str,
    events: &[EventSnippet],
) -> String {
    let request = Request::new(model)
        .system(system_prompt(artist))
        .message(Message::user(events_text(events)));

    match client.create_message(&request).await {
        Ok(response) => {
            let summary = response.text();
            if summary.trim().is_empty() {
                tracing::warn!(artist, "summary came back empty");
                SUMMARY_FALLBACK.to_string()
            } else {
                summary
            }
        }
        Err(e) => {
            tracing::warn!(artist, error = %e, "summary generation failed");
            SUMMARY_FALLBACK.to_string()
        }
    }
}
