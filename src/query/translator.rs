//! Legacy request translation
//!
//! The legacy client posts an url-encoded body such as
//!
//! ```text
//! querystring=hitomi&table=l5r&sort=%5B%7B%22title.keyword%22%3A%7B%22order%22%3A%22asc%22%7D%7D%5D&size=50&from=0
//! ```
//!
//! and expects results sorted by title. The `sort` value is decoded and
//! checked but never changes the order.

use tracing::debug;

use super::QueryError;
use crate::models::{FieldFilter, FilterField, MATCH_ALL, SearchRequest, SortKey};

/// Attribute the free-text query runs against
const QUERY_BY: &str = "title";

/// Split an url-encoded body into decoded key/value pairs
///
/// Pairs are split on the first `=`; a pair without one has an empty value.
/// `+` decodes to a space.
pub fn decode_body(body: &str) -> Result<Vec<(String, String)>, QueryError> {
    body.split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            Ok((decode_component(key)?, decode_component(value)?))
        })
        .collect()
}

fn decode_component(raw: &str) -> Result<String, QueryError> {
    urlencoding::decode(&raw.replace('+', " "))
        .map(|decoded| decoded.into_owned())
        .map_err(|e| QueryError::InvalidEncoding(format!("{}: {}", raw, e)))
}

/// Turn the legacy non-breaking-space encoding back into spaces
pub fn normalize_legality(value: &str) -> String {
    value.replace("&nbsp;", " ").replace('\u{a0}', " ")
}

fn filter_field(key: &str) -> Option<FilterField> {
    match key {
        "field_keywords" => Some(FilterField::Keywords),
        "field_clan" => Some(FilterField::Clan),
        "field_legality" => Some(FilterField::Legality),
        "field_type" => Some(FilterField::Type),
        _ => None,
    }
}

fn parse_window(name: &'static str, value: Option<String>) -> Result<usize, QueryError> {
    let value = value.ok_or(QueryError::MissingParameter(name))?;
    value
        .trim()
        .parse()
        .map_err(|_| QueryError::InvalidParameter { name, value })
}

/// Translator from legacy bodies to canonical requests
#[derive(Debug, Clone, Default)]
pub struct QueryTranslator;

impl QueryTranslator {
    pub fn new() -> Self {
        Self
    }

    /// Translate a raw legacy body
    pub fn translate(&self, body: &str) -> Result<SearchRequest, QueryError> {
        let mut q: Option<String> = None;
        let mut filters: Vec<FieldFilter> = Vec::new();
        let mut size = None;
        let mut from = None;

        for (key, value) in decode_body(body)? {
            match key.as_str() {
                "field_title" | "querystring" => {
                    let text = value.trim();
                    if !text.is_empty() {
                        q = Some(text.to_string());
                    }
                }
                "sort" => {
                    let requested: Vec<serde_json::Map<String, serde_json::Value>> =
                        serde_json::from_str(&value)
                            .map_err(|e| QueryError::InvalidSort(e.to_string()))?;
                    debug!(?requested, "Ignoring requested sort, sorting by title");
                }
                "size" => size = Some(value),
                "from" => from = Some(value),
                other => {
                    let Some(field) = filter_field(other) else {
                        continue;
                    };
                    let value = if field == FilterField::Legality {
                        normalize_legality(&value)
                    } else {
                        value
                    };
                    let value = value.trim().to_string();
                    if value.is_empty() {
                        continue;
                    }
                    match filters.iter_mut().find(|f| f.field == field) {
                        Some(existing) => {
                            if !existing.values.contains(&value) {
                                existing.values.push(value);
                            }
                        }
                        None => filters.push(FieldFilter::new(field, vec![value])),
                    }
                }
            }
        }

        Ok(SearchRequest {
            q: q.unwrap_or_else(|| MATCH_ALL.to_string()),
            query_by: vec![QUERY_BY.to_string()],
            filters,
            sort: SortKey::title_ascending(),
            offset: parse_window("from", from)?,
            limit: parse_window("size", size)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_body() {
        let pairs = decode_body("table=l5r&lookup=deck&&optgroup").unwrap();
        assert_eq!(
            pairs,
            vec![
                ("table".to_string(), "l5r".to_string()),
                ("lookup".to_string(), "deck".to_string()),
                ("optgroup".to_string(), String::new()),
            ]
        );
    }

    #[test]
    fn test_value_keeps_later_equals_signs() {
        let pairs = decode_body("field_keywords=a%3Db=c").unwrap();
        assert_eq!(pairs[0].1, "a=b=c");
    }

    #[test]
    fn test_legacy_search_body() {
        let request = QueryTranslator::new()
            .translate(
                "querystring=hitomi&table=l5r&sort=%5B%7B%22title.keyword%22%3A%7B%22order%22%3A%22asc%22%7D%7D%5D&size=50&from=0",
            )
            .unwrap();
        assert_eq!(request.q, "hitomi");
        assert_eq!(request.limit, 50);
        assert_eq!(request.offset, 0);
        assert_eq!(request.sort, SortKey::title_ascending());
        assert!(request.filters.is_empty());
    }

    #[test]
    fn test_sort_request_never_changes_order() {
        let request = QueryTranslator::new()
            .translate("sort=%5B%7B%22cardid%22%3A%7B%22order%22%3A%22desc%22%7D%7D%5D&size=5&from=0")
            .unwrap();
        assert_eq!(request.sort.to_sort_by(), "title:asc");
    }

    #[test]
    fn test_invalid_sort() {
        let result = QueryTranslator::new().translate("sort=notjson&size=5&from=0");
        assert!(matches!(result, Err(QueryError::InvalidSort(_))));
    }

    #[test]
    fn test_match_all_default() {
        let request = QueryTranslator::new()
            .translate("field_title=&size=10&from=20")
            .unwrap();
        assert_eq!(request.q, "*");
        assert_eq!(request.offset, 20);
    }

    #[test]
    fn test_legality_nbsp() {
        let request = QueryTranslator::new()
            .translate("field_legality=Shattered%26nbsp%3BEmpire&size=10&from=0")
            .unwrap();
        assert_eq!(
            request.filter_values(FilterField::Legality),
            Some(&["Shattered Empire".to_string()][..])
        );
    }

    #[test]
    fn test_repeated_filter_values_accumulate() {
        let request = QueryTranslator::new()
            .translate("field_clan=Crab&field_clan=Crane&field_clan=Crab&size=10&from=0")
            .unwrap();
        assert_eq!(
            request.filter_by(),
            "clan:=[`Crab`,`Crane`]"
        );
    }

    #[test]
    fn test_missing_window() {
        let translator = QueryTranslator::new();
        assert_eq!(
            translator.translate("field_title=x&from=0"),
            Err(QueryError::MissingParameter("size"))
        );
        assert_eq!(
            translator.translate("field_title=x&size=ten&from=0"),
            Err(QueryError::InvalidParameter {
                name: "size",
                value: "ten".to_string()
            })
        );
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let request = QueryTranslator::new()
            .translate("type_title=x&table=l5r&field_artist=Someone&size=1&from=0")
            .unwrap();
        assert!(request.filters.is_empty());
        assert_eq!(request.q, "*");
    }
}
