//! Engine wire shape of a card
//!
//! `CardDocument` is what gets stored in and read back from the search engine.
//! Field names follow the legacy client, which reads these documents verbatim
//! out of the `_source` of each hit.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::card::{Card, CardKind};
use super::enums::{CardType, Deck};
use super::printing::Printing;

/// Error converting a stored document back into a typed card
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum DocumentError {
    #[error("Document {id} is missing field '{field}'")]
    MissingField { id: String, field: &'static str },
    #[error("Document {id} has invalid {field}: {value}")]
    InvalidField {
        id: String,
        field: &'static str,
        value: String,
    },
    #[error("Document {id} has unsupported card type {card_type}")]
    UnsupportedType { id: String, card_type: String },
}

/// One printing as stored in the `printing` array
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrintingDocument {
    pub printingid: String,
    pub set: String,
    pub edition: String,
    pub number: String,
    pub rarity: String,
    pub image: String,
    pub printimagehash: String,
}

/// One card as stored in the engine
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CardDocument {
    pub id: String,
    pub cardid: u32,
    #[serde(rename = "type")]
    pub card_type: Vec<String>,
    pub deck: Vec<String>,
    pub title: String,
    pub formattedtitle: String,
    pub puretexttitle: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub legality: Vec<String>,
    #[serde(default)]
    pub clan: Vec<String>,
    #[serde(default)]
    pub printing: Vec<PrintingDocument>,
    pub printingprimary: String,
    #[serde(default)]
    pub imagehash: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goldproduction: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub force: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chi: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ph: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub honor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub startinghonor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provincestrength: Option<String>,
    #[serde(
        rename = "@timestamp",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub timestamp: Option<DateTime<Utc>>,
}

impl CardDocument {
    /// Stamp the document with its ingestion time
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
}

impl From<&Printing> for PrintingDocument {
    fn from(printing: &Printing) -> Self {
        Self {
            printingid: printing.printing_id.to_string(),
            set: printing.set.clone(),
            edition: printing.edition_code.clone(),
            number: printing.number.clone(),
            rarity: printing.rarity.clone(),
            image: printing.image_name.clone(),
            printimagehash: printing.image_reference.clone(),
        }
    }
}

impl From<&Card> for CardDocument {
    fn from(card: &Card) -> Self {
        let mut doc = CardDocument {
            id: card.card_id.clone(),
            cardid: card.card_number,
            card_type: vec![card.card_type().to_string()],
            deck: vec![card.deck.to_string()],
            title: card.title.clone(),
            formattedtitle: card.formatted_title.clone(),
            puretexttitle: card.pure_text_title.clone(),
            text: card.text.clone(),
            keywords: card.keywords.clone(),
            legality: card.legality.clone(),
            clan: card.clan.clone(),
            printing: card.printings.iter().map(PrintingDocument::from).collect(),
            printingprimary: card.primary_printing_id.to_string(),
            imagehash: card
                .primary_printing()
                .map(|p| p.image_reference.clone())
                .unwrap_or_default(),
            cost: None,
            goldproduction: None,
            force: None,
            chi: None,
            ph: None,
            honor: None,
            startinghonor: None,
            provincestrength: None,
            timestamp: None,
        };

        match &card.kind {
            CardKind::Holding {
                cost,
                gold_production,
            } => {
                doc.cost = Some(cost.clone());
                doc.goldproduction = Some(gold_production.clone());
            }
            CardKind::Personality {
                force,
                chi,
                personal_honor,
                cost,
                honor_requirement,
            } => {
                doc.force = Some(force.clone());
                doc.chi = Some(chi.clone());
                doc.ph = Some(personal_honor.clone());
                doc.cost = Some(cost.clone());
                doc.honor = Some(honor_requirement.clone());
            }
            CardKind::Sensei {
                gold_production,
                starting_honor,
                province_strength,
            } => {
                doc.goldproduction = Some(gold_production.clone());
                doc.startinghonor = Some(starting_honor.clone());
                doc.provincestrength = Some(province_strength.clone());
            }
        }

        doc
    }
}

fn required(id: &str, field: &'static str, value: Option<String>) -> Result<String, DocumentError> {
    value.ok_or_else(|| DocumentError::MissingField {
        id: id.to_string(),
        field,
    })
}

fn parse_id(id: &str, field: &'static str, value: &str) -> Result<u32, DocumentError> {
    value.parse().map_err(|_| DocumentError::InvalidField {
        id: id.to_string(),
        field,
        value: value.to_string(),
    })
}

impl TryFrom<CardDocument> for Card {
    type Error = DocumentError;

    fn try_from(doc: CardDocument) -> Result<Self, Self::Error> {
        let id = doc.id.clone();

        let raw_type = doc.card_type.first().ok_or(DocumentError::MissingField {
            id: id.clone(),
            field: "type",
        })?;
        let card_type: CardType = raw_type.parse().map_err(|_| DocumentError::InvalidField {
            id: id.clone(),
            field: "type",
            value: raw_type.clone(),
        })?;

        let raw_deck = doc.deck.first().ok_or(DocumentError::MissingField {
            id: id.clone(),
            field: "deck",
        })?;
        let deck: Deck = raw_deck.parse().map_err(|_| DocumentError::InvalidField {
            id: id.clone(),
            field: "deck",
            value: raw_deck.clone(),
        })?;

        let kind = match card_type {
            CardType::Holding => CardKind::Holding {
                cost: required(&id, "cost", doc.cost)?,
                gold_production: doc.goldproduction.unwrap_or_default(),
            },
            CardType::Personality => CardKind::Personality {
                force: required(&id, "force", doc.force)?,
                chi: required(&id, "chi", doc.chi)?,
                personal_honor: required(&id, "ph", doc.ph)?,
                cost: required(&id, "cost", doc.cost)?,
                honor_requirement: required(&id, "honor", doc.honor)?,
            },
            CardType::Sensei => CardKind::Sensei {
                gold_production: required(&id, "goldproduction", doc.goldproduction)?,
                starting_honor: required(&id, "startinghonor", doc.startinghonor)?,
                province_strength: required(&id, "provincestrength", doc.provincestrength)?,
            },
            other => {
                return Err(DocumentError::UnsupportedType {
                    id,
                    card_type: other.to_string(),
                });
            }
        };

        let printings = doc
            .printing
            .into_iter()
            .map(|p| {
                Ok(Printing {
                    printing_id: parse_id(&id, "printingid", &p.printingid)?,
                    set: p.set,
                    edition_code: p.edition,
                    number: p.number,
                    rarity: p.rarity,
                    image_name: p.image,
                    image_reference: p.printimagehash,
                })
            })
            .collect::<Result<Vec<_>, DocumentError>>()?;

        Ok(Card {
            primary_printing_id: parse_id(&id, "printingprimary", &doc.printingprimary)?,
            card_id: doc.id,
            card_number: doc.cardid,
            deck,
            title: doc.title,
            formatted_title: doc.formattedtitle,
            pure_text_title: doc.puretexttitle,
            text: doc.text,
            keywords: doc.keywords,
            legality: doc.legality,
            clan: doc.clan,
            printings,
            kind,
        })
    }
}
