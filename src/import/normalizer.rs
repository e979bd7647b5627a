//! Card normalization
//!
//! Turns one `RawCard` into a canonical `Card`, or into nothing when the card
//! is out of export scope. The checks run in a fixed order:
//!
//! 1. The raw type must be eligible
//! 2. At least one legality code must be a required format
//! 3. The raw type must belong to a deck bucket (an error otherwise)
//! 4. At least one printing must have a mapped edition
//!
//! Type-specific attributes are then read into the matching `CardKind`.

use tracing::{info, warn};

use super::catalog::RawCard;
use super::error::ImportError;
use super::printings::extract_printings;
use super::text::{split_text, titles};
use crate::config::IngestPolicy;
use crate::mappings;
use crate::models::{Card, CardKind, CardType, card_number_for};

/// Card normalizer bound to an ingest policy
#[derive(Debug, Clone)]
pub struct CardNormalizer {
    policy: IngestPolicy,
}

impl Default for CardNormalizer {
    fn default() -> Self {
        Self::new(IngestPolicy::default())
    }
}

fn required<'a>(raw: &'a RawCard, card_id: &str, field: &'static str) -> Result<&'a str, ImportError> {
    raw.text(field)
        .map(str::trim)
        .ok_or_else(|| ImportError::MissingField {
            card_id: card_id.to_string(),
            field,
        })
}

fn optional(raw: &RawCard, field: &str) -> String {
    raw.text(field).map(str::trim).unwrap_or_default().to_string()
}

impl CardNormalizer {
    pub fn new(policy: IngestPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &IngestPolicy {
        &self.policy
    }

    /// Normalize one record
    ///
    /// `Ok(None)` means the card is excluded. Errors are configuration errors
    /// for this record only.
    pub fn normalize(&self, raw: &RawCard) -> Result<Option<Card>, ImportError> {
        let card_id = raw.id.clone().ok_or_else(|| ImportError::MissingAttribute {
            card_id: raw.label(),
            attribute: "id",
        })?;
        let raw_type = raw
            .card_type
            .as_deref()
            .map(str::trim)
            .ok_or_else(|| ImportError::MissingAttribute {
                card_id: card_id.clone(),
                attribute: "type",
            })?;

        if !self.policy.is_eligible_type(raw_type) {
            info!(card_id = %card_id, raw_type, "Excluding card: type not eligible");
            return Ok(None);
        }

        let legal_codes: Vec<&str> = raw.texts("legal").into_iter().map(str::trim).collect();
        if !self.policy.meets_required_format(&legal_codes) {
            info!(card_id = %card_id, "Excluding card: not legal in a required format");
            return Ok(None);
        }

        let deck = mappings::deck_for(raw_type).ok_or_else(|| ImportError::UnmappedDeck {
            card_id: card_id.clone(),
            card_type: raw_type.to_string(),
        })?;
        let card_type =
            mappings::card_type(raw_type).ok_or_else(|| ImportError::UnsupportedType {
                card_id: card_id.clone(),
                card_type: raw_type.to_string(),
            })?;

        let printings = extract_printings(raw, &card_id)?;
        if printings.is_empty() {
            info!(card_id = %card_id, "Excluding card: no printing in a mapped edition");
            return Ok(None);
        }

        let name = required(raw, &card_id, "name")?;
        let names = titles(name);
        let split = split_text(raw.text("text").unwrap_or_default(), card_type);

        let (kind, clan) = self.extract_kind(raw, &card_id, card_type, &split.keywords)?;

        let legality = legal_codes
            .iter()
            .filter_map(|code| mappings::legality(code))
            .map(str::to_string)
            .collect();

        info!(card_id = %card_id, title = %names.title, card_type = %card_type, "Normalized card");

        let card_number = card_number_for(&card_id);
        Ok(Some(Card {
            card_id,
            card_number,
            deck,
            title: names.title,
            formatted_title: names.formatted,
            pure_text_title: names.pure,
            text: split.text,
            keywords: split.keywords,
            legality,
            clan,
            primary_printing_id: 1,
            printings,
            kind,
        }))
    }

    fn extract_kind(
        &self,
        raw: &RawCard,
        card_id: &str,
        card_type: CardType,
        keywords: &[String],
    ) -> Result<(CardKind, Vec<String>), ImportError> {
        match card_type {
            CardType::Holding => Ok((
                CardKind::Holding {
                    cost: required(raw, card_id, "cost")?.to_string(),
                    gold_production: optional(raw, "gold_production"),
                },
                Vec::new(),
            )),
            CardType::Personality => {
                let codes = raw.texts("clan");
                if codes.is_empty() {
                    return Err(ImportError::MissingField {
                        card_id: card_id.to_string(),
                        field: "clan",
                    });
                }
                let clan = codes
                    .into_iter()
                    .map(|code| {
                        let code = code.trim();
                        mappings::clan(code).map(str::to_string).unwrap_or_else(|| {
                            warn!(card_id, clan = code, "Unmapped clan code");
                            code.to_string()
                        })
                    })
                    .collect();
                let kind = CardKind::Personality {
                    force: required(raw, card_id, "force")?.to_string(),
                    chi: required(raw, card_id, "chi")?.to_string(),
                    personal_honor: required(raw, card_id, "personal_honor")?.to_string(),
                    cost: required(raw, card_id, "cost")?.to_string(),
                    honor_requirement: required(raw, card_id, "honor_req")?.to_string(),
                };
                Ok((kind, clan))
            }
            CardType::Sensei => {
                let kind = CardKind::Sensei {
                    gold_production: required(raw, card_id, "gold_production")?.to_string(),
                    starting_honor: required(raw, card_id, "starting_honor")?.to_string(),
                    province_strength: required(raw, card_id, "province_strength")?.to_string(),
                };
                Ok((kind, sensei_clans(keywords)))
            }
            other => Err(ImportError::UnsupportedType {
                card_id: card_id.to_string(),
                card_type: other.to_string(),
            }),
        }
    }
}

/// Clans a Sensei belongs to, derived from its keywords
///
/// An "All Clans" keyword grants every clan. Otherwise a keyword names a clan
/// either whole or with a trailing qualifier word, so "Dragon Clan" gives
/// "Dragon". Keywords naming no known clan, such as "Unique", are dropped.
pub fn sensei_clans(keywords: &[String]) -> Vec<String> {
    if keywords
        .iter()
        .any(|k| k.eq_ignore_ascii_case(mappings::ALL_CLANS_MARKER))
    {
        return mappings::all_clans();
    }

    let mut clans: Vec<String> = Vec::new();
    for keyword in keywords {
        let keyword = keyword.trim();
        let found = mappings::clan_by_name(keyword).or_else(|| {
            keyword
                .rsplit_once(' ')
                .and_then(|(head, _)| mappings::clan_by_name(head.trim()))
        });
        if let Some(clan) = found {
            if !clans.iter().any(|c| c == clan) {
                clans.push(clan.to_string());
            }
        }
    }
    clans
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::import::catalog::CatalogReader;
    use crate::models::Deck;

    fn normalize_one(xml: &str) -> Result<Option<Card>, ImportError> {
        let catalog = CatalogReader::new()
            .parse_str(&format!("<cards>{}</cards>", xml))
            .unwrap();
        CardNormalizer::default().normalize(&catalog.cards[0])
    }

    #[test]
    fn test_holding() {
        let card = normalize_one(
            r#"<card id="Onyx050" type="holding">
                <name>Gold Mine</name>
                <rarity>f</rarity>
                <image edition="Onyx">images/cards/Onyx/Onyx050.jpg</image>
                <legal>onyx</legal>
                <text><![CDATA[<b>Limited:</b> [BOW] this card.]]></text>
                <cost>4</cost>
            </card>"#,
        )
        .unwrap()
        .unwrap();

        assert_eq!(card.deck, Deck::Dynasty);
        assert_eq!(card.card_type(), CardType::Holding);
        assert_eq!(card.text, "<b>Limited:</b> {bow} this card.");
        assert!(card.keywords.is_empty());
        assert!(card.clan.is_empty());
        assert_eq!(card.legality, vec!["Onyx"]);
        assert_eq!(
            card.kind,
            CardKind::Holding {
                cost: "4".to_string(),
                gold_production: String::new()
            }
        );
    }

    #[test]
    fn test_personality() {
        let card = normalize_one(
            r#"<card id="RoJ070" type="personality">
                <name>Mirumoto Hitomi</name>
                <image edition="RoJ">images/cards/RoJ/RoJ070.jpg</image>
                <legal>open</legal>
                <legal>shattered_empire</legal>
                <clan>dragon</clan>
                <clan>monk</clan>
                <text><![CDATA[<b>Unique</b> &#8226; Samurai<br>[PAY 2]: Gain honor.]]></text>
                <force>4</force><chi>3</chi><personal_honor>2</personal_honor>
                <cost>8</cost><honor_req>5</honor_req>
            </card>"#,
        )
        .unwrap()
        .unwrap();

        assert_eq!(card.clan, vec!["Dragon", "Brotherhood of Shinsei"]);
        assert_eq!(card.keywords, vec!["Unique", "Samurai"]);
        assert_eq!(card.text, "{pay:2}: Gain honor.");
        assert_eq!(card.legality, vec!["Open", "Shattered Empire"]);
        assert_eq!(card.primary_printing_id, 1);
    }

    #[test]
    fn test_personality_missing_chi_is_fatal() {
        let result = normalize_one(
            r#"<card id="RoJ071" type="personality">
                <name>Kitsu Motso</name>
                <image edition="RoJ">RoJ071.jpg</image>
                <legal>onyx</legal>
                <clan>lion</clan>
                <force>2</force><personal_honor>2</personal_honor>
                <cost>5</cost><honor_req>3</honor_req>
            </card>"#,
        );
        assert_eq!(
            result,
            Err(ImportError::MissingField {
                card_id: "RoJ071".to_string(),
                field: "chi"
            })
        );
    }

    #[test]
    fn test_sensei_all_clans() {
        let card = normalize_one(
            r#"<card id="GS010" type="sensei">
                <name>Void Sensei</name>
                <image edition="GS">GS010.jpg</image>
                <legal>shattered_empire</legal>
                <text><![CDATA[All Clans<br>Your Personalities gain +1F.]]></text>
                <gold_production>+0</gold_production>
                <starting_honor>+2</starting_honor>
                <province_strength>-1</province_strength>
            </card>"#,
        )
        .unwrap()
        .unwrap();

        assert_eq!(card.deck, Deck::PreGame);
        assert_eq!(card.clan.len(), 18);
    }

    #[test]
    fn test_sensei_clans_from_keywords() {
        let keywords = vec!["Crab Clan".to_string(), "Crane Clan".to_string()];
        assert_eq!(sensei_clans(&keywords), vec!["Crab", "Crane"]);
    }

    #[test]
    fn test_sensei_clans_skip_non_clan_keywords() {
        let keywords = vec![
            "Unique".to_string(),
            "Crab Clan".to_string(),
            "Toturi's Army".to_string(),
            "Experienced Sensei".to_string(),
        ];
        assert_eq!(sensei_clans(&keywords), vec!["Crab", "Toturi's Army"]);
    }

    #[test]
    fn test_unique_sensei_keeps_only_its_clan() {
        let card = normalize_one(
            r#"<card id="GS011" type="sensei">
                <name>Kuni Sensei</name>
                <image edition="GS">GS011.jpg</image>
                <legal>shattered_empire</legal>
                <text><![CDATA[<b>Unique</b> &#8226; Crab Clan<br>Your Shugenja gain +1C.]]></text>
                <gold_production>+0</gold_production>
                <starting_honor>+1</starting_honor>
                <province_strength>+0</province_strength>
            </card>"#,
        )
        .unwrap()
        .unwrap();

        assert_eq!(card.clan, vec!["Crab"]);
    }

    #[test]
    fn test_region_excluded() {
        let result = normalize_one(
            r#"<card id="AD081" type="region">
                <name>Akodo Fields</name>
                <image edition="Onyx">Onyx081.jpg</image>
                <legal>onyx</legal>
            </card>"#,
        );
        assert_eq!(result, Ok(None));
    }

    #[test]
    fn test_not_legal_in_required_format() {
        let result = normalize_one(
            r#"<card id="AD100" type="holding">
                <name>Old Farm</name>
                <image edition="Onyx">Onyx100.jpg</image>
                <legal>open</legal>
                <legal>jade</legal>
                <cost>1</cost>
            </card>"#,
        );
        assert_eq!(result, Ok(None));
    }

    #[test]
    fn test_no_mapped_printing_excluded() {
        let result = normalize_one(
            r#"<card id="AD101" type="holding">
                <name>Old Farm</name>
                <image edition="AD">AD101.jpg</image>
                <legal>onyx</legal>
                <cost>1</cost>
            </card>"#,
        );
        assert_eq!(result, Ok(None));
    }

    #[test]
    fn test_eligible_type_without_deck_is_fatal() {
        let normalizer = CardNormalizer::new(
            IngestPolicy::default().with_eligible_types(vec!["widget".to_string()]),
        );
        let catalog = CatalogReader::new()
            .parse_str(r#"<cards><card id="W1" type="widget"><legal>onyx</legal></card></cards>"#)
            .unwrap();
        assert!(matches!(
            normalizer.normalize(&catalog.cards[0]),
            Err(ImportError::UnmappedDeck { .. })
        ));
    }

    #[test]
    fn test_eligible_type_without_layout_is_fatal() {
        let normalizer = CardNormalizer::new(
            IngestPolicy::default().with_eligible_types(vec!["strategy".to_string()]),
        );
        let catalog = CatalogReader::new()
            .parse_str(
                r#"<cards><card id="S1" type="strategy"><name>Ambush</name><image edition="Onyx">Onyx1.jpg</image><legal>onyx</legal></card></cards>"#,
            )
            .unwrap();
        assert!(matches!(
            normalizer.normalize(&catalog.cards[0]),
            Err(ImportError::UnsupportedType { .. })
        ));
    }

    #[test]
    fn test_missing_type_attribute() {
        let result = normalize_one(r#"<card id="X1"><name>Nameless</name></card>"#);
        assert!(matches!(
            result,
            Err(ImportError::MissingAttribute {
                attribute: "type",
                ..
            })
        ));
    }
}
