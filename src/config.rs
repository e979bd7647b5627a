//! Oracle configuration types
//!
//! Everything is optional in a config file; missing sections fall back to the
//! defaults of a local single-node engine holding the `l5r` collection.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::mappings;

/// Errors loading or validating configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {reason}")]
    Io { path: PathBuf, reason: String },
    #[error("Failed to parse config: {0}")]
    Parse(String),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Search engine connection settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub host: String,
    pub port: u16,
    pub protocol: String,
    pub api_key: String,
    pub connection_timeout_seconds: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 8108,
            protocol: "http".to_string(),
            api_key: "xyz".to_string(),
            connection_timeout_seconds: 2,
        }
    }
}

impl EngineConfig {
    /// Base URL of the engine, e.g. `http://localhost:8108`
    pub fn base_url(&self) -> String {
        format!("{}://{}:{}", self.protocol, self.host, self.port)
    }
}

/// Which catalog records become documents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestPolicy {
    /// Raw type codes eligible for export
    pub eligible_types: Vec<String>,
    /// Raw legality codes; a card needs at least one of them
    pub required_formats: Vec<String>,
    /// Drop and recreate an existing collection before ingesting
    pub overwrite: bool,
    /// Abort on the first record error instead of skipping the record
    pub strict: bool,
}

impl Default for IngestPolicy {
    fn default() -> Self {
        Self {
            eligible_types: vec![
                "holding".to_string(),
                "personality".to_string(),
                "sensei".to_string(),
            ],
            required_formats: vec!["onyx".to_string(), "shattered_empire".to_string()],
            overwrite: false,
            strict: false,
        }
    }
}

impl IngestPolicy {
    pub fn is_eligible_type(&self, raw_type: &str) -> bool {
        self.eligible_types.iter().any(|t| t == raw_type)
    }

    /// Whether any of the raw legality codes is a required format
    ///
    /// This is the only place the required-format rule lives.
    pub fn meets_required_format<S: AsRef<str>>(&self, legal_codes: &[S]) -> bool {
        legal_codes
            .iter()
            .any(|code| self.required_formats.iter().any(|f| f == code.as_ref()))
    }

    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn with_eligible_types(mut self, types: Vec<String>) -> Self {
        self.eligible_types = types;
        self
    }

    pub fn with_required_formats(mut self, formats: Vec<String>) -> Self {
        self.required_formats = formats;
        self
    }
}

/// Artwork derivation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageConfig {
    /// Root the catalog's image names are relative to
    pub source_dir: PathBuf,
    /// Root derived artwork is written under
    pub output_dir: PathBuf,
    #[serde(default = "default_thumbnail_width")]
    pub thumbnail_width: u32,
    #[serde(default = "default_thumbnail_height")]
    pub thumbnail_height: u32,
}

fn default_thumbnail_width() -> u32 {
    150
}

fn default_thumbnail_height() -> u32 {
    210
}

impl ImageConfig {
    pub fn new(source_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
            output_dir: output_dir.into(),
            thumbnail_width: default_thumbnail_width(),
            thumbnail_height: default_thumbnail_height(),
        }
    }
}

/// Labels echoed in every legacy hit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LegacyConfig {
    pub index_label: String,
    pub document_type: String,
}

impl Default for LegacyConfig {
    fn default() -> Self {
        Self {
            index_label: "l5r-addlogupdate2".to_string(),
            document_type: "oracle-l5r_type".to_string(),
        }
    }
}

/// Main oracle configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OracleConfig {
    /// Target collection name
    pub collection: String,
    pub engine: EngineConfig,
    pub ingest: IngestPolicy,
    /// Artwork derivation, disabled when absent
    pub images: Option<ImageConfig>,
    pub legacy: LegacyConfig,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            collection: "l5r".to_string(),
            engine: EngineConfig::default(),
            ingest: IngestPolicy::default(),
            images: None,
            legacy: LegacyConfig::default(),
        }
    }
}

impl OracleConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the collection name
    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = collection.into();
        self
    }

    /// Set the engine connection
    pub fn with_engine(mut self, engine: EngineConfig) -> Self {
        self.engine = engine;
        self
    }

    /// Set the ingest policy
    pub fn with_ingest(mut self, ingest: IngestPolicy) -> Self {
        self.ingest = ingest;
        self
    }

    /// Enable artwork derivation
    pub fn with_images(mut self, images: ImageConfig) -> Self {
        self.images = Some(images);
        self
    }

    /// Set the legacy labels
    pub fn with_legacy(mut self, legacy: LegacyConfig) -> Self {
        self.legacy = legacy;
        self
    }

    /// Check the configuration for values that cannot work
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.collection.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "collection name cannot be empty".to_string(),
            ));
        }
        if self.engine.port == 0 {
            return Err(ConfigError::Invalid("engine port cannot be 0".to_string()));
        }
        if self.ingest.required_formats.is_empty() {
            return Err(ConfigError::Invalid(
                "at least one required format must be configured".to_string(),
            ));
        }
        for raw_type in &self.ingest.eligible_types {
            if mappings::card_type(raw_type).is_none() {
                return Err(ConfigError::Invalid(format!(
                    "unknown eligible type '{}'",
                    raw_type
                )));
            }
        }
        Ok(())
    }

    /// Parse a TOML configuration
    #[cfg(feature = "config-file")]
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: OracleConfig =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a TOML configuration file
    #[cfg(feature = "config-file")]
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::from_toml_str(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = OracleConfig::default();
        assert_eq!(config.collection, "l5r");
        assert_eq!(config.engine.base_url(), "http://localhost:8108");
        assert_eq!(config.engine.api_key, "xyz");
        assert_eq!(config.engine.connection_timeout_seconds, 2);
        assert_eq!(config.legacy.document_type, "oracle-l5r_type");
        assert!(config.images.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_required_format_predicate() {
        let policy = IngestPolicy::default();
        assert!(policy.meets_required_format(&["open", "onyx"]));
        assert!(policy.meets_required_format(&["shattered_empire".to_string()]));
        assert!(!policy.meets_required_format(&["open", "jade"]));
        assert!(!policy.meets_required_format::<&str>(&[]));
    }

    #[test]
    fn test_eligibility() {
        let policy = IngestPolicy::default();
        assert!(policy.is_eligible_type("sensei"));
        assert!(!policy.is_eligible_type("region"));
    }

    #[test]
    fn test_validate_rejects_unknown_type() {
        let config = OracleConfig::new().with_ingest(
            IngestPolicy::default().with_eligible_types(vec!["widget".to_string()]),
        );
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[cfg(feature = "config-file")]
    #[test]
    fn test_from_toml() {
        let config = OracleConfig::from_toml_str(
            r#"
collection = "l5r-test"

[engine]
host = "search.internal"
api_key = "secret"

[ingest]
overwrite = true

[images]
source_dir = "catalog"
output_dir = "public/images"
"#,
        )
        .unwrap();
        assert_eq!(config.collection, "l5r-test");
        assert_eq!(config.engine.host, "search.internal");
        assert_eq!(config.engine.port, 8108);
        assert!(config.ingest.overwrite);
        assert_eq!(config.ingest.eligible_types.len(), 3);
        let images = config.images.unwrap();
        assert_eq!(images.thumbnail_width, 150);
    }

    #[cfg(feature = "config-file")]
    #[test]
    fn test_load_missing_file() {
        let result = OracleConfig::load("/nonexistent/oracle.toml");
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
