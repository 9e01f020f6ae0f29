// ABOUTME: ContextRequest and ContextResponse - the pipeline's input and display output.
// ABOUTME: The response publishes records under the scope's key alongside an error slot.

use serde::ser::{Serialize, SerializeMap, Serializer};

use super::Scope;
use crate::error::ArtctxError;
use crate::parser::Record;

/// One research request: an artist, a scope, and optionally an artwork to focus on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextRequest {
    pub artist_name: String,
    pub scope: Scope,
    pub artwork_title: Option<String>,
}

impl ContextRequest {
    pub fn new(artist_name: impl Into<String>, scope: Scope) -> Self {
        Self {
            artist_name: artist_name.into(),
            scope,
            artwork_title: None,
        }
    }

    pub fn artwork(mut self, title: impl Into<String>) -> Self {
        let title = title.into();
        self.artwork_title = Some(title).filter(|t| !t.trim().is_empty());
        self
    }

    /// The task handed to the researcher, e.g. `Frida Kahlo: [political background]`.
    pub fn research_query(&self) -> String {
        let mut query = format!("{}: [{}]", self.artist_name.trim(), self.scope.topic());
        if let Some(title) = &self.artwork_title {
            query.push_str(&format!(" with a focus on the artwork \"{}\"", title.trim()));
        }
        query
    }
}

/// Records for display, or the reason there are none.
///
/// Serializes as `{"<responseKey>": [...], "error": null | "..."}`.
#[derive(Debug, Clone, PartialEq)]
pub struct ContextResponse {
    pub response_key: &'static str,
    pub records: Vec<Record>,
    pub error: Option<String>,
}

impl ContextResponse {
    pub fn from_result(scope: Scope, result: Result<Vec<Record>, ArtctxError>) -> Self {
        match result {
            Ok(records) => Self {
                response_key: scope.response_key(),
                records,
                error: None,
            },
            Err(e) => Self {
                response_key: scope.response_key(),
                records: Vec::new(),
                error: Some(e.to_string()),
            },
        }
    }
}

impl Serialize for ContextResponse {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry(self.response_key, &self.records)?;
        map.serialize_entry("error", &self.error)?;
        map.end()
    }
}
