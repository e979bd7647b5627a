//! Canonical card model

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::enums::{CardType, Deck};
use super::printing::Printing;

/// Type-specific attributes of an eligible card
///
/// One variant per exported card type, each carrying exactly the fields that
/// type requires. Values are kept as catalog text since the legacy client
/// displays them verbatim (`*`, `+2` and `-` all occur).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum CardKind {
    Holding {
        cost: String,
        /// Empty when the catalog omits it
        gold_production: String,
    },
    Personality {
        force: String,
        chi: String,
        personal_honor: String,
        cost: String,
        honor_requirement: String,
    },
    Sensei {
        gold_production: String,
        starting_honor: String,
        province_strength: String,
    },
}

impl CardKind {
    pub fn card_type(&self) -> CardType {
        match self {
            CardKind::Holding { .. } => CardType::Holding,
            CardKind::Personality { .. } => CardType::Personality,
            CardKind::Sensei { .. } => CardType::Sensei,
        }
    }
}

/// Numeric card identity for the engine's integer `cardid` field
///
/// Derived from the catalog id alone so it does not move when the catalog is
/// reordered or extended. Always in `1..=i32::MAX`.
pub fn card_number_for(card_id: &str) -> u32 {
    let digest = Sha256::digest(card_id.as_bytes());
    let head = u32::from_be_bytes([digest[0], digest[1], digest[2], digest[3]]);
    head % (i32::MAX as u32) + 1
}

/// One logical card with all of its printings merged under one identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Stable identifier from the source catalog
    pub card_id: String,
    /// Numeric identity derived from `card_id`, see [`card_number_for`]
    pub card_number: u32,
    pub deck: Deck,
    pub title: String,
    pub formatted_title: String,
    pub pure_text_title: String,
    pub text: String,
    pub keywords: Vec<String>,
    pub legality: Vec<String>,
    pub clan: Vec<String>,
    pub printings: Vec<Printing>,
    pub primary_printing_id: u32,
    pub kind: CardKind,
}

impl Card {
    pub fn card_type(&self) -> CardType {
        self.kind.card_type()
    }

    /// The printing `primary_printing_id` points at
    pub fn primary_printing(&self) -> Option<&Printing> {
        self.printings
            .iter()
            .find(|p| p.printing_id == self.primary_printing_id)
    }
}
