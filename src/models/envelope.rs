//! Legacy response envelope
//!
//! The nested shape the existing client expects from a search. Field names
//! carry leading underscores on the wire, so every one is renamed explicitly.

use serde::{Deserialize, Serialize};

use super::document::CardDocument;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shards {
    pub total: u32,
    pub successful: u32,
    pub skipped: u32,
    pub failed: u32,
}

impl Default for Shards {
    fn default() -> Self {
        Self {
            total: 1,
            successful: 1,
            skipped: 0,
            failed: 0,
        }
    }
}

/// One wrapped match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegacyHit {
    #[serde(rename = "_index")]
    pub index: String,
    #[serde(rename = "_type")]
    pub doc_type: String,
    /// `cardid=<id>.0`
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_score")]
    pub score: Option<f64>,
    #[serde(rename = "_source")]
    pub source: CardDocument,
    /// One-element echo of the display title
    pub sort: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegacyHits {
    pub total: u64,
    pub max_score: Option<f64>,
    pub hits: Vec<LegacyHit>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegacyEnvelope {
    pub took: u64,
    pub timed_out: bool,
    #[serde(rename = "_shards")]
    pub shards: Shards,
    pub hits: LegacyHits,
}

impl LegacyEnvelope {
    /// Envelope for a search that matched nothing
    pub fn empty() -> Self {
        Self {
            took: 0,
            timed_out: false,
            shards: Shards::default(),
            hits: LegacyHits {
                total: 0,
                max_score: None,
                hits: Vec::new(),
            },
        }
    }

    pub fn total(&self) -> u64 {
        self.hits.total
    }

    pub fn is_empty(&self) -> bool {
        self.hits.hits.is_empty()
    }
}

/// Legacy update-log response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateLog {
    pub logs: Vec<serde_json::Value>,
    pub cardids: Vec<u32>,
    pub cards: LegacyEnvelope,
}

impl Default for UpdateLog {
    fn default() -> Self {
        Self {
            logs: Vec::new(),
            cardids: Vec::new(),
            cards: LegacyEnvelope::empty(),
        }
    }
}
