//! Ingest command implementation

use std::path::PathBuf;

use crate::cli::error::CliError;
use crate::cli::output::{format_ingest_stats, to_json};
use crate::config::OracleConfig;
use crate::images::FileSystemImageDeriver;
use crate::import::CatalogIngestor;
use crate::storage::SearchEngine;

/// Arguments for the `ingest` command
pub struct IngestArgs {
    /// Path to the catalog XML
    pub catalog: PathBuf,
    /// Drop and recreate the collection first
    pub overwrite: bool,
    /// Abort on the first invalid record
    pub strict: bool,
    /// Derive printing artwork using the configured image directories
    pub images: bool,
    /// Print stats as JSON
    pub json: bool,
}

/// Handle the `ingest` command
pub async fn handle_ingest(
    engine: &dyn SearchEngine,
    config: &OracleConfig,
    args: &IngestArgs,
) -> Result<(), CliError> {
    let mut config = config.clone();
    config.ingest.overwrite |= args.overwrite;
    config.ingest.strict |= args.strict;

    let deriver = match (&config.images, args.images) {
        (Some(images), true) => Some(FileSystemImageDeriver::new(images)),
        (None, true) => {
            return Err(CliError::InvalidArgument(
                "--images requires an [images] section in the configuration".to_string(),
            ));
        }
        (_, false) => None,
    };

    let mut ingestor = CatalogIngestor::new(engine, &config);
    if let Some(deriver) = &deriver {
        ingestor = ingestor.with_image_deriver(deriver);
    }

    if !args.json {
        println!("Ingesting {} into '{}'", args.catalog.display(), config.collection);
        if config.ingest.overwrite {
            println!("Overwrite: the collection will be dropped and recreated");
        }
        println!();
    }

    let stats = ingestor.ingest_file(&args.catalog).await?;

    if args.json {
        println!("{}", to_json(&stats)?);
    } else {
        print!("{}", format_ingest_stats(&stats));
    }
    Ok(())
}
