//! Fetch command implementation

use crate::cli::error::CliError;
use crate::cli::output::{format_document, to_json};
use crate::config::OracleConfig;
use crate::query::OracleService;
use crate::storage::SearchEngine;

/// Arguments for the `fetch` command
pub struct FetchArgs {
    /// Catalog id of the card, e.g. `Onyx050`
    pub id: String,
    pub json: bool,
}

/// Handle the `fetch` command
pub async fn handle_fetch(
    engine: &dyn SearchEngine,
    config: &OracleConfig,
    args: &FetchArgs,
) -> Result<(), CliError> {
    let service = OracleService::new(engine, config);
    let Some(document) = service.fetch_by_id(&args.id).await? else {
        println!("No card with id '{}' in '{}'", args.id, service.collection());
        return Ok(());
    };

    if args.json {
        println!("{}", to_json(&document)?);
    } else {
        print!("{}", format_document(&document));
    }
    Ok(())
}
