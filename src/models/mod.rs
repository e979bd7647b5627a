//! Models module for the SDK
//!
//! Typed records that flow through ingestion and query handling. Cards are
//! serialized into `CardDocument` only at the engine boundary.

pub mod card;
pub mod document;
pub mod enums;
pub mod envelope;
pub mod printing;
pub mod query;

pub use card::{Card, CardKind, card_number_for};
pub use document::{CardDocument, DocumentError, PrintingDocument};
pub use enums::{CardType, Deck};
pub use envelope::{LegacyEnvelope, LegacyHit, LegacyHits, Shards, UpdateLog};
pub use printing::Printing;
pub use query::{
    FieldFilter, FilterField, MATCH_ALL, SearchRequest, SearchResults, SortKey, SortOrder,
};
