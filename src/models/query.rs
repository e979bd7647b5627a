//! Canonical search request and engine results

use serde::{Deserialize, Serialize};
use std::fmt;

use super::document::CardDocument;

/// Match-all text query
pub const MATCH_ALL: &str = "*";

/// Multi-value document attribute a filter can target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterField {
    Keywords,
    Clan,
    Legality,
    Type,
}

impl FilterField {
    /// Document attribute name
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterField::Keywords => "keywords",
            FilterField::Clan => "clan",
            FilterField::Legality => "legality",
            FilterField::Type => "type",
        }
    }
}

impl fmt::Display for FilterField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Membership test: the document attribute contains any of `values`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldFilter {
    pub field: FilterField,
    pub values: Vec<String>,
}

impl FieldFilter {
    pub fn new(field: FilterField, values: Vec<String>) -> Self {
        Self { field, values }
    }

    /// Engine filter clause, e.g. ``clan:=[`Dragon`,`Crab`]``
    ///
    /// Backticks inside values are dropped since the engine uses them as quotes.
    pub fn to_filter_clause(&self) -> String {
        let values: Vec<String> = self
            .values
            .iter()
            .map(|v| format!("`{}`", v.replace('`', "")))
            .collect();
        format!("{}:=[{}]", self.field, values.join(","))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortKey {
    pub field: String,
    pub order: SortOrder,
}

impl SortKey {
    /// Display title ascending
    pub fn title_ascending() -> Self {
        Self {
            field: "title".to_string(),
            order: SortOrder::Asc,
        }
    }

    /// Engine sort expression, e.g. `title:asc`
    pub fn to_sort_by(&self) -> String {
        let order = match self.order {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        };
        format!("{}:{}", self.field, order)
    }
}

/// Canonical search request handed to the engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Free-text query, `*` matches everything
    pub q: String,
    /// Attributes the free-text query runs against
    pub query_by: Vec<String>,
    /// Conjunction of membership filters
    pub filters: Vec<FieldFilter>,
    pub sort: SortKey,
    pub offset: usize,
    pub limit: usize,
}

impl SearchRequest {
    pub fn is_match_all(&self) -> bool {
        self.q.trim().is_empty() || self.q == MATCH_ALL
    }

    /// Engine filter expression, empty when there are no filters
    pub fn filter_by(&self) -> String {
        self.filters
            .iter()
            .map(FieldFilter::to_filter_clause)
            .collect::<Vec<_>>()
            .join(" && ")
    }

    /// Values accepted for one attribute, if it is filtered
    pub fn filter_values(&self, field: FilterField) -> Option<&[String]> {
        self.filters
            .iter()
            .find(|f| f.field == field)
            .map(|f| f.values.as_slice())
    }
}

/// Engine-native result of a search
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchResults {
    /// Total number of matching documents, not just this page
    pub found: u64,
    pub search_time_ms: u64,
    pub hits: Vec<CardDocument>,
}
