//! Catalog ingestion
//!
//! One-shot batch: read the catalog, make sure the collection exists, then
//! normalize and insert every record in catalog order. Not safe to run
//! concurrently against the same collection when overwriting.

use std::collections::HashMap;
use std::path::Path;
use std::time::{Duration, Instant};

use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};

use super::catalog::CatalogReader;
use super::error::{ImportError, IngestError};
use super::normalizer::CardNormalizer;
use crate::config::OracleConfig;
use crate::images::{DeriveOutcome, ImageDeriver, ImageRequest};
use crate::models::{Card, CardDocument};
use crate::schema::{CollectionOutcome, CollectionSchema, InsertOutcome, SchemaManager};
use crate::storage::SearchEngine;

/// Statistics from an ingestion run
#[derive(Debug, Clone, Default, Serialize)]
pub struct IngestStats {
    /// Card records read from the catalog
    pub records_read: usize,
    /// Documents inserted
    pub cards_indexed: usize,
    /// Records out of export scope
    pub cards_excluded: usize,
    /// Documents whose id was already in the collection
    pub already_present: usize,
    /// Number of record errors encountered
    pub errors_count: usize,
    /// List of record errors (limited to first 100)
    pub errors: Vec<String>,
    pub images_derived: usize,
    pub images_skipped: usize,
    pub images_failed: usize,
    /// Whether the collection was created, recreated or reused
    #[serde(skip)]
    pub collection: Option<CollectionOutcome>,
    /// Duration of the ingestion
    #[serde(skip)]
    pub duration: Duration,
}

impl IngestStats {
    /// Create new empty stats
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an error (limited to 100)
    pub fn add_error(&mut self, error: String) {
        self.errors_count += 1;
        if self.errors.len() < 100 {
            self.errors.push(error);
        }
    }

    /// Get records per second throughput
    pub fn throughput(&self) -> f64 {
        let secs = self.duration.as_secs_f64();
        if secs == 0.0 {
            0.0
        } else {
            self.records_read as f64 / secs
        }
    }

    /// Format duration as human-readable string
    pub fn duration_string(&self) -> String {
        let secs = self.duration.as_secs();
        if secs < 60 {
            format!("{}s", secs)
        } else if secs < 3600 {
            format!("{}m {}s", secs / 60, secs % 60)
        } else {
            format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
        }
    }
}

/// Reserve a card's number for this run
///
/// Re-listing the same catalog id is fine; a different id hashing to a taken
/// number is rejected so `_id`s stay unique.
fn claim_card_number(numbers: &mut HashMap<u32, String>, card: Card) -> Result<Card, ImportError> {
    match numbers.get(&card.card_number) {
        Some(other) if *other != card.card_id => Err(ImportError::CardNumberCollision {
            card_id: card.card_id.clone(),
            other_id: other.clone(),
            card_number: card.card_number,
        }),
        Some(_) => Ok(card),
        None => {
            numbers.insert(card.card_number, card.card_id.clone());
            Ok(card)
        }
    }
}

/// Ingestion driver over one engine and collection
pub struct CatalogIngestor<'a, E: SearchEngine + ?Sized> {
    engine: &'a E,
    schema: CollectionSchema,
    normalizer: CardNormalizer,
    overwrite: bool,
    strict: bool,
    deriver: Option<&'a dyn ImageDeriver>,
}

impl<'a, E: SearchEngine + ?Sized> CatalogIngestor<'a, E> {
    pub fn new(engine: &'a E, config: &OracleConfig) -> Self {
        Self {
            engine,
            schema: CollectionSchema::cards(config.collection.clone()),
            normalizer: CardNormalizer::new(config.ingest.clone()),
            overwrite: config.ingest.overwrite,
            strict: config.ingest.strict,
            deriver: None,
        }
    }

    /// Derive artwork for every printing of an accepted card
    pub fn with_image_deriver(mut self, deriver: &'a dyn ImageDeriver) -> Self {
        self.deriver = Some(deriver);
        self
    }

    /// Ingest a catalog file
    pub async fn ingest_file(&self, path: impl AsRef<Path>) -> Result<IngestStats, IngestError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(IngestError::FileNotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        info!(path = %path.display(), "Ingesting catalog");
        self.ingest_str(&content).await
    }

    /// Ingest catalog XML
    ///
    /// Malformed XML fails before anything is written. Record errors are
    /// collected in the stats unless the policy is strict; engine errors
    /// always abort.
    pub async fn ingest_str(&self, xml_content: &str) -> Result<IngestStats, IngestError> {
        let started = Instant::now();
        let mut stats = IngestStats::new();

        let catalog = CatalogReader::new().parse_str(xml_content)?;
        if let Some(version) = &catalog.version {
            info!(version = %version, cards = catalog.cards.len(), "Read catalog");
        }

        let manager = SchemaManager::new(self.engine, self.schema.clone());
        stats.collection = Some(manager.ensure_collection(self.overwrite).await?);

        let timestamp = Utc::now();
        let mut numbers: HashMap<u32, String> = HashMap::new();

        for raw in &catalog.cards {
            stats.records_read += 1;

            let normalized = self
                .normalizer
                .normalize(raw)
                .and_then(|card| match card {
                    Some(card) => claim_card_number(&mut numbers, card).map(Some),
                    None => Ok(None),
                });
            let card = match normalized {
                Ok(Some(card)) => card,
                Ok(None) => {
                    stats.cards_excluded += 1;
                    continue;
                }
                Err(e) => {
                    if self.strict {
                        return Err(e.into());
                    }
                    warn!(card_id = %raw.label(), error = %e, "Skipping invalid record");
                    stats.add_error(e.to_string());
                    continue;
                }
            };

            self.derive_images(&card, &mut stats);

            let document = CardDocument::from(&card).with_timestamp(timestamp);
            match manager.insert_document(&document).await? {
                InsertOutcome::Inserted => stats.cards_indexed += 1,
                InsertOutcome::AlreadyPresent => stats.already_present += 1,
            }
        }

        stats.duration = started.elapsed();
        info!(
            read = stats.records_read,
            indexed = stats.cards_indexed,
            excluded = stats.cards_excluded,
            already_present = stats.already_present,
            errors = stats.errors_count,
            "Ingestion complete"
        );
        Ok(stats)
    }

    fn derive_images(&self, card: &Card, stats: &mut IngestStats) {
        let Some(deriver) = self.deriver else {
            return;
        };

        for printing in &card.printings {
            let request = ImageRequest {
                card_id: &card.card_id,
                image_name: &printing.image_name,
                edition: &printing.edition_code,
                collector_number: &printing.number,
                index: printing.printing_id,
            };
            match deriver.derive(&request) {
                Ok(DeriveOutcome::Derived) => stats.images_derived += 1,
                Ok(DeriveOutcome::Skipped) => stats.images_skipped += 1,
                Err(e) => {
                    warn!(card_id = %card.card_id, printing = printing.printing_id, error = %e, "Artwork derivation failed");
                    stats.images_failed += 1;
                }
            }
        }
    }
}
