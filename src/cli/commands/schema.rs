//! Schema command implementation

use crate::cli::error::CliError;
use crate::cli::output::to_json;
use crate::config::OracleConfig;
use crate::schema::{CollectionOutcome, CollectionSchema, SchemaManager};
use crate::storage::SearchEngine;

/// Arguments for the `schema` command
pub struct SchemaArgs {
    /// Create the collection if it is missing
    pub create: bool,
    /// Drop and recreate an existing collection (implies create)
    pub overwrite: bool,
}

/// Handle the `schema` command
///
/// Without flags only prints the collection definition.
pub async fn handle_schema(
    engine: &dyn SearchEngine,
    config: &OracleConfig,
    args: &SchemaArgs,
) -> Result<(), CliError> {
    let schema = CollectionSchema::cards(config.collection.clone());
    println!("{}", to_json(&schema)?);

    if !args.create && !args.overwrite {
        return Ok(());
    }

    let outcome = SchemaManager::new(engine, schema)
        .ensure_collection(args.overwrite)
        .await?;
    let message = match outcome {
        CollectionOutcome::Created => "created",
        CollectionOutcome::Recreated => "dropped and recreated",
        CollectionOutcome::Existing => "already exists, left unchanged",
    };
    println!("Collection '{}' {}", config.collection, message);
    Ok(())
}
