//! Attributes command implementation

use crate::cli::error::CliError;
use crate::cli::output::to_json;
use crate::config::OracleConfig;
use crate::query::OracleService;
use crate::storage::SearchEngine;

/// Handle the `attributes` command
pub fn handle_attributes(
    engine: &dyn SearchEngine,
    config: &OracleConfig,
    lookup: &str,
) -> Result<(), CliError> {
    let service = OracleService::new(engine, config);
    let body = format!("table={}&lookup={}", config.collection, urlencoding::encode(lookup));
    let values = service.attributes(&body)?;
    println!("{}", to_json(&values)?);
    Ok(())
}
