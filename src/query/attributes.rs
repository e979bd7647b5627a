//! Facet value lists for the legacy filter widgets
//!
//! The legacy client asks for one list at a time with a body such as
//! `table=l5r&lookup=deck&optgroup=1`. Grouped lookups come back as a list
//! of single-key objects, one per option group, so group order survives
//! serialization.

use serde_json::{Map, Value};

use super::QueryError;
use super::translator::decode_body;
use crate::mappings::{
    CLAN_MAPPING, EDITION_ERAS, EDITION_MAPPING, LEGALITY_GROUPS, RARITY_MAPPING, edition,
    legality,
};
use crate::models::{CardType, Deck};

/// Lookups the legacy client may request
pub const LOOKUPS: &[&str] = &[
    "type",
    "deck",
    "clan",
    "printing.rarity",
    "printing.set",
    "printing.set:printing.rarity",
    "legality",
];

/// Group order of the legality lookup
const LEGALITY_GROUP_ORDER: &[&str] = &["Arc", "Format"];

/// Spaces as the legacy client renders them inside option groups
fn non_breaking(value: &str) -> String {
    value.replace(' ', "&nbsp;")
}

fn single_key(key: &str, value: Value) -> Value {
    let mut entry = Map::new();
    entry.insert(key.to_string(), value);
    Value::Object(entry)
}

fn values<'a>(items: impl IntoIterator<Item = &'a str>) -> Value {
    Value::Array(items.into_iter().map(|v| Value::String(v.to_string())).collect())
}

fn legality_groups() -> Value {
    let groups = LEGALITY_GROUP_ORDER
        .iter()
        .map(|group| {
            let members: Vec<String> = LEGALITY_GROUPS
                .iter()
                .filter(|(_, g)| g == group)
                .filter_map(|(code, _)| legality(code))
                .map(non_breaking)
                .collect();
            single_key(group, values(members.iter().map(String::as_str)))
        })
        .collect();
    Value::Array(groups)
}

fn sets_by_era() -> Value {
    let eras = EDITION_ERAS
        .iter()
        .map(|(era, sets)| {
            let by_set = sets
                .iter()
                .map(|(acronym, rarities)| {
                    let set = edition(acronym).unwrap_or(*acronym);
                    single_key(set, values(rarities.iter().copied()))
                })
                .collect();
            single_key(era, Value::Array(by_set))
        })
        .collect();
    Value::Array(eras)
}

/// Values for one named lookup
pub fn lookup_attributes(lookup: &str) -> Result<Value, QueryError> {
    let result = match lookup {
        "type" => values(CardType::ALL.iter().map(CardType::as_str)),
        "deck" => values(Deck::ALL.iter().map(Deck::as_str)),
        "clan" => values(CLAN_MAPPING.iter().map(|(_, name)| *name)),
        "printing.rarity" => values(RARITY_MAPPING.iter().map(|(_, name)| *name)),
        "printing.set" => values(EDITION_MAPPING.iter().map(|(_, name)| *name)),
        "printing.set:printing.rarity" => sets_by_era(),
        "legality" => legality_groups(),
        other => return Err(QueryError::UnknownLookup(other.to_string())),
    };
    Ok(result)
}

/// Decode an attributes request body and run its lookup
pub fn attributes_for_body(body: &str) -> Result<Value, QueryError> {
    let lookup = decode_body(body)?
        .into_iter()
        .rev()
        .find(|(key, _)| key == "lookup")
        .map(|(_, value)| value)
        .ok_or(QueryError::MissingParameter("lookup"))?;
    lookup_attributes(&lookup)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deck_lookup() {
        let value = attributes_for_body("table=l5r&lookup=deck&optgroup=1").unwrap();
        assert_eq!(value, json!(["Dynasty", "Fate", "Other", "Pre-Game"]));
    }

    #[test]
    fn test_legality_groups_use_nbsp() {
        let value = lookup_attributes("legality").unwrap();
        assert_eq!(
            value,
            json!([
                { "Arc": ["Onyx", "Shattered&nbsp;Empire"] },
                { "Format": ["Open"] }
            ])
        );
    }

    #[test]
    fn test_sets_by_era_use_display_names() {
        let value = lookup_attributes("printing.set:printing.rarity").unwrap();
        let eras = value.as_array().unwrap();
        assert_eq!(eras.len(), EDITION_ERAS.len());
        assert_eq!(
            eras[2],
            json!({
                "Shattered Empire": [
                    { "Gathering Storm": ["Fixed"] },
                    { "Cubic Zirconia Edition": ["Fixed"] },
                    { "Chaos Reigns I": ["Fixed"] }
                ]
            })
        );
    }

    #[test]
    fn test_sets_keep_release_order_within_era() {
        let value = lookup_attributes("printing.set:printing.rarity").unwrap();
        let sets: Vec<String> = value[1]["Onyx Edition"]
            .as_array()
            .unwrap()
            .iter()
            .flat_map(|entry| entry.as_object().unwrap().keys().cloned())
            .collect();
        assert_eq!(
            sets,
            vec![
                "Hidden Forest War",
                "Onyx Edition",
                "Rise of Jigoku",
                "Road to Ruin",
                "Rise of Otosan Uchi"
            ]
        );
    }

    #[test]
    fn test_every_lookup_resolves() {
        for lookup in LOOKUPS {
            assert!(lookup_attributes(lookup).is_ok(), "{}", lookup);
        }
    }

    #[test]
    fn test_unknown_lookup() {
        assert_eq!(
            attributes_for_body("lookup=artist"),
            Err(QueryError::UnknownLookup("artist".to_string()))
        );
        assert_eq!(
            attributes_for_body("table=l5r"),
            Err(QueryError::MissingParameter("lookup"))
        );
    }
}
