// ABOUTME: Preset agent configurations for the research pipeline.
// ABOUTME: Researcher gathers findings with search; historian restructures them into entries.

use super::AgentDefinition;
use crate::pipeline::Scope;

/// Pre-configured agent template.
///
/// `system_prompt` may contain `{topic}`, `{format}`, and `{limit}`
/// placeholders, filled per scope by [`Preset::definition`].
#[derive(Debug, Clone)]
pub struct Preset {
    /// Name used for agents built from this preset.
    pub name: &'static str,

    /// System prompt template.
    pub system_prompt: &'static str,

    /// Iteration limit for the think-act loop.
    pub max_iterations: usize,
}

impl Preset {
    /// Build a definition for one scope.
    pub fn definition(&self, scope: Scope, search_limit: usize) -> AgentDefinition {
        let prompt = self
            .system_prompt
            .replace("{topic}", scope.topic())
            .replace("{format}", entry_format(scope))
            .replace("{limit}", &search_limit.to_string());

        AgentDefinition::new(self.name, prompt).max_iterations(self.max_iterations)
    }
}

const TIMELINE_FORMAT: &str = r#"1. **Year:** <year or full date>
**Title:** <short event title>
**Description:** <two or three sentences on the event and how it shaped the artist>
**Location:** <city, country>
**Source:** <full URL of the page the facts came from, such as https://en.wikipedia.org/wiki/Frida_Kahlo>"#;

const NETWORK_FORMAT: &str = r#"1. **Connected Entity Name:** <person, group, or institution>
**Relationship Summary:** <two or three sentences on the relationship>
**Relationship Duration:** <years the relationship spanned>
**Connection Score:** <integer from 1 to 10, how strongly they shaped the artist>
**Related Artwork:** <title of an artwork tied to the relationship, if any>
**Source:** <full URL of the page the facts came from, such as https://en.wikipedia.org/wiki/Frida_Kahlo>"#;

/// The numbered entry layout the parser reads for a scope.
pub fn entry_format(scope: Scope) -> &'static str {
    match scope {
        Scope::ArtistNetwork => NETWORK_FORMAT,
        _ => TIMELINE_FORMAT,
    }
}

/// Researcher preset - gathers facts about an artist with a capped web search.
pub static RESEARCHER: Preset = Preset {
    name: "researcher",
    system_prompt: r#"You are an art history researcher. You are given an artist and an aspect of their life to research: their {topic}.

Guidelines:
- Use rate_limited_search_tool to find facts; you may search at most {limit} times
- If the tool says no more searches are allowed, stop searching and answer with what you have
- Prefer encyclopedic and museum sources and keep their URLs
- Report each finding as a numbered entry in exactly this layout:

{format}

- Start every entry with its number, one field per line, and leave a blank line between entries
- Do not add commentary before or after the entries"#,
    max_iterations: 10,
};

/// Historian preset - turns raw research notes into clean, numbered entries.
pub static HISTORIAN: Preset = Preset {
    name: "historian",
    system_prompt: r#"You are an art historian. You receive research notes about an artist's {topic}.

Guidelines:
- Keep only facts that are supported by the notes and carry a source URL
- Merge duplicates and order entries chronologically
- Rewrite the notes as numbered entries in exactly this layout:

{format}

- Fill every field; never leave a placeholder
- Start every entry with its number, one field per line, and leave a blank line between entries
- Do not add commentary before or after the entries"#,
    max_iterations: 3,
};

/// Researcher definition for a scope.
pub fn researcher(scope: Scope, search_limit: usize) -> AgentDefinition {
    RESEARCHER.definition(scope, search_limit)
}

/// Historian definition for a scope. The historian never searches.
pub fn historian(scope: Scope) -> AgentDefinition {
    HISTORIAN.definition(scope, 0)
}
