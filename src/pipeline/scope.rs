// ABOUTME: Research scopes - which aspect of an artist's context a request covers.
// ABOUTME: Each scope picks its schema, response key, query topic, and structuring pass.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::parser::Schema;

/// Which pass turns researcher findings into parseable output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Structuring {
    /// A historian agent rewrites the findings first.
    Historian,
    /// The researcher's own output goes straight to the parser.
    Parser,
}

/// The aspect of an artist's context being researched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Scope {
    PoliticalEvents,
    ArtMovements,
    ArtistNetwork,
    PersonalEvents,
    EconomicEvents,
    Genre,
    Medium,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown scope '{0}' (expected one of: {names})", names = Scope::names())]
pub struct UnknownScope(pub String);

impl Scope {
    pub const ALL: [Scope; 7] = [
        Scope::PoliticalEvents,
        Scope::ArtMovements,
        Scope::ArtistNetwork,
        Scope::PersonalEvents,
        Scope::EconomicEvents,
        Scope::Genre,
        Scope::Medium,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::PoliticalEvents => "political-events",
            Scope::ArtMovements => "art-movements",
            Scope::ArtistNetwork => "artist-network",
            Scope::PersonalEvents => "personal-events",
            Scope::EconomicEvents => "economic-events",
            Scope::Genre => "genre",
            Scope::Medium => "medium",
        }
    }

    fn names() -> String {
        Self::ALL
            .iter()
            .map(Scope::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Schema the scope's records follow.
    pub fn schema(&self) -> Schema {
        match self {
            Scope::ArtistNetwork => Schema::artist_network(),
            _ => Schema::timeline_event(),
        }
    }

    /// Key the records are published under in a response.
    pub fn response_key(&self) -> &'static str {
        match self {
            Scope::ArtistNetwork => "networkData",
            _ => "timelineEvents",
        }
    }

    /// Phrase used in the researcher's query.
    pub fn topic(&self) -> &'static str {
        match self {
            Scope::PoliticalEvents => "political background",
            Scope::ArtMovements => "art movements",
            Scope::ArtistNetwork => "artistic network and relationships",
            Scope::PersonalEvents => "personal life events",
            Scope::EconomicEvents => "economic background",
            Scope::Genre => "genre",
            Scope::Medium => "medium and materials",
        }
    }

    pub fn structuring(&self) -> Structuring {
        match self {
            Scope::PoliticalEvents | Scope::PersonalEvents | Scope::EconomicEvents => {
                Structuring::Parser
            }
            Scope::ArtMovements | Scope::ArtistNetwork | Scope::Genre | Scope::Medium => {
                Structuring::Historian
            }
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scope {
    type Err = UnknownScope;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|scope| scope.as_str() == wanted)
            .ok_or_else(|| UnknownScope(s.to_string()))
    }
}
