//! Legacy response shaping

use crate::config::LegacyConfig;
use crate::models::{LegacyEnvelope, LegacyHit, LegacyHits, SearchResults, Shards};

/// Synthetic hit identifier the legacy client keys rows on
pub fn synthetic_id(cardid: u32) -> String {
    format!("cardid={}.0", cardid)
}

/// Wraps engine results in the legacy envelope
#[derive(Debug, Clone)]
pub struct ResultShaper {
    index_label: String,
    document_type: String,
}

impl ResultShaper {
    pub fn new(legacy: &LegacyConfig) -> Self {
        Self {
            index_label: legacy.index_label.clone(),
            document_type: legacy.document_type.clone(),
        }
    }

    /// Shape one page of results
    ///
    /// `total` is the engine-reported match count, not the page length.
    pub fn shape(&self, results: SearchResults) -> LegacyEnvelope {
        let hits = results
            .hits
            .into_iter()
            .map(|document| LegacyHit {
                index: self.index_label.clone(),
                doc_type: self.document_type.clone(),
                id: synthetic_id(document.cardid),
                score: None,
                sort: vec![document.title.clone()],
                source: document,
            })
            .collect();

        LegacyEnvelope {
            took: results.search_time_ms,
            timed_out: false,
            shards: Shards::default(),
            hits: LegacyHits {
                total: results.found,
                max_score: None,
                hits,
            },
        }
    }
}

impl Default for ResultShaper {
    fn default() -> Self {
        Self::new(&LegacyConfig::default())
    }
}
