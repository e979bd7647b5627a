//! Typesense search engine client
//!
//! Implements SearchEngine over the Typesense HTTP API. Every request carries
//! the `X-TYPESENSE-API-KEY` header. No retries are attempted; failures are
//! returned to the caller as they happen.
//!
//! ## Security
//!
//! Collection names are validated before they are placed in a request path.
//! Only alphanumeric characters, hyphens, and underscores are allowed.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::debug;

use super::{EngineError, SearchEngine};
use crate::config::EngineConfig;
use crate::models::{CardDocument, SearchRequest, SearchResults};
use crate::schema::CollectionSchema;

/// Maximum allowed length for collection names
const MAX_COLLECTION_LENGTH: usize = 100;

const API_KEY_HEADER: &str = "X-TYPESENSE-API-KEY";

/// Validate a collection name for safe use in API paths.
fn validate_collection_name(name: &str) -> Result<(), EngineError> {
    if name.is_empty() {
        return Err(EngineError::BackendError(
            "Collection name cannot be empty".to_string(),
        ));
    }

    if name.len() > MAX_COLLECTION_LENGTH {
        return Err(EngineError::BackendError(format!(
            "Collection name too long (max {} characters)",
            MAX_COLLECTION_LENGTH
        )));
    }

    if !name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(EngineError::BackendError(
            "Collection name contains invalid characters. Only alphanumeric, hyphens, and underscores are allowed.".to_string()
        ));
    }

    Ok(())
}

/// Map an unsuccessful status to an engine error
fn error_for_status(status: StatusCode, target: &str, operation: &str, body: &str) -> EngineError {
    match status {
        StatusCode::CONFLICT => EngineError::AlreadyExists(target.to_string()),
        StatusCode::NOT_FOUND => EngineError::NotFound(target.to_string()),
        _ => EngineError::BackendError(format!("{} failed: {} {}", operation, status, body)),
    }
}

/// Path and query string of a search request
fn search_path(collection: &str, request: &SearchRequest) -> String {
    let mut params = vec![
        ("q", request.q.clone()),
        ("query_by", request.query_by.join(",")),
        ("sort_by", request.sort.to_sort_by()),
        ("offset", request.offset.to_string()),
        ("limit", request.limit.to_string()),
    ];
    let filter_by = request.filter_by();
    if !filter_by.is_empty() {
        params.push(("filter_by", filter_by));
    }

    let query: Vec<String> = params
        .iter()
        .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
        .collect();
    format!(
        "/collections/{}/documents/search?{}",
        collection,
        query.join("&")
    )
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    document: CardDocument,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    found: u64,
    #[serde(default)]
    search_time_ms: u64,
    #[serde(default)]
    hits: Vec<SearchHit>,
}

/// Typesense client for one node
pub struct TypesenseClient {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl TypesenseClient {
    /// Create a new client
    ///
    /// # Example
    ///
    /// ```rust
    /// use card_oracle_sdk::config::EngineConfig;
    /// use card_oracle_sdk::storage::typesense::TypesenseClient;
    ///
    /// let client = TypesenseClient::new(&EngineConfig::default()).unwrap();
    /// assert_eq!(client.base_url(), "http://localhost:8108");
    /// ```
    pub fn new(config: &EngineConfig) -> Result<Self, EngineError> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(config.connection_timeout_seconds))
            .build()
            .map_err(|e| EngineError::NetworkError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            base_url: config.base_url(),
            api_key: config.api_key.clone(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build a request with the API key header
    fn build_request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        debug!(method = method.as_str(), url = %url, "Search engine request");
        self.client
            .request(method, &url)
            .header(API_KEY_HEADER, &self.api_key)
    }

    async fn send(
        &self,
        request: reqwest::RequestBuilder,
        target: &str,
        operation: &str,
    ) -> Result<reqwest::Response, EngineError> {
        let response = request
            .send()
            .await
            .map_err(|e| EngineError::NetworkError(format!("{} failed: {}", operation, e)))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(error_for_status(status, target, operation, &body))
    }
}

#[async_trait]
impl SearchEngine for TypesenseClient {
    async fn create_collection(&self, schema: &CollectionSchema) -> Result<(), EngineError> {
        validate_collection_name(&schema.name)?;
        let request = self
            .build_request(reqwest::Method::POST, "/collections")
            .json(schema);
        self.send(request, &schema.name, "Create collection").await?;
        Ok(())
    }

    async fn delete_collection(&self, name: &str) -> Result<(), EngineError> {
        validate_collection_name(name)?;
        let request = self.build_request(reqwest::Method::DELETE, &format!("/collections/{}", name));
        self.send(request, name, "Delete collection").await?;
        Ok(())
    }

    async fn create_document(
        &self,
        collection: &str,
        document: &CardDocument,
    ) -> Result<(), EngineError> {
        validate_collection_name(collection)?;
        let request = self
            .build_request(
                reqwest::Method::POST,
                &format!("/collections/{}/documents", collection),
            )
            .json(document);
        self.send(request, &document.id, "Create document").await?;
        Ok(())
    }

    async fn get_document(&self, collection: &str, id: &str) -> Result<CardDocument, EngineError> {
        validate_collection_name(collection)?;
        let request = self.build_request(
            reqwest::Method::GET,
            &format!(
                "/collections/{}/documents/{}",
                collection,
                urlencoding::encode(id)
            ),
        );
        let response = self.send(request, id, "Get document").await?;
        response.json().await.map_err(|e| {
            EngineError::SerializationError(format!("Failed to parse document {}: {}", id, e))
        })
    }

    async fn search(
        &self,
        collection: &str,
        request: &SearchRequest,
    ) -> Result<SearchResults, EngineError> {
        validate_collection_name(collection)?;
        let http_request =
            self.build_request(reqwest::Method::GET, &search_path(collection, request));
        let response = self.send(http_request, collection, "Search").await?;

        let parsed: SearchResponse = response.json().await.map_err(|e| {
            EngineError::SerializationError(format!("Failed to parse search response: {}", e))
        })?;

        Ok(SearchResults {
            found: parsed.found,
            search_time_ms: parsed.search_time_ms,
            hits: parsed.hits.into_iter().map(|h| h.document).collect(),
        })
    }
}
