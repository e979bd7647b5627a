//! Search command implementation
//!
//! Flags are encoded into a legacy request body so the command exercises the
//! same translation path as the legacy client.

use crate::cli::error::CliError;
use crate::cli::output::{format_envelope_compact, to_json};
use crate::config::OracleConfig;
use crate::query::OracleService;
use crate::storage::SearchEngine;

/// Arguments for the `search` command
#[derive(Debug, Clone, Default)]
pub struct SearchArgs {
    /// Free-text title query
    pub title: Option<String>,
    pub clans: Vec<String>,
    pub keywords: Vec<String>,
    pub legalities: Vec<String>,
    pub types: Vec<String>,
    pub size: usize,
    pub from: usize,
    /// Raw legacy body, used verbatim instead of the flags above
    pub raw_body: Option<String>,
    /// Print the legacy envelope as JSON
    pub json: bool,
}

impl SearchArgs {
    /// Encode the flags as a legacy request body
    pub fn legacy_body(&self) -> String {
        if let Some(raw) = &self.raw_body {
            return raw.clone();
        }

        let mut pairs = Vec::new();
        if let Some(title) = &self.title {
            pairs.push(format!("field_title={}", urlencoding::encode(title)));
        }
        let repeated = [
            ("field_clan", &self.clans),
            ("field_keywords", &self.keywords),
            ("field_legality", &self.legalities),
            ("field_type", &self.types),
        ];
        for (key, values) in repeated {
            for value in values {
                pairs.push(format!("{}={}", key, urlencoding::encode(value)));
            }
        }
        pairs.push(format!("size={}", self.size));
        pairs.push(format!("from={}", self.from));
        pairs.join("&")
    }
}

/// Handle the `search` command
pub async fn handle_search(
    engine: &dyn SearchEngine,
    config: &OracleConfig,
    args: &SearchArgs,
) -> Result<(), CliError> {
    let service = OracleService::new(engine, config);
    let envelope = service.translate_and_search(&args.legacy_body()).await?;

    if args.json {
        println!("{}", to_json(&envelope)?);
    } else {
        print!("{}", format_envelope_compact(&envelope));
    }
    Ok(())
}
