//! oracle - card catalog ingestion and search against a Typesense collection

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::Level;

use card_oracle_sdk::cli::CliError;
use card_oracle_sdk::cli::commands::attributes::handle_attributes;
use card_oracle_sdk::cli::commands::fetch::{FetchArgs, handle_fetch};
use card_oracle_sdk::cli::commands::ingest::{IngestArgs, handle_ingest};
use card_oracle_sdk::cli::commands::schema::{SchemaArgs, handle_schema};
use card_oracle_sdk::cli::commands::search::{SearchArgs, handle_search};
use card_oracle_sdk::{OracleConfig, TypesenseClient};

#[derive(Parser)]
#[command(name = "oracle", version, about = "Card catalog ingestion and legacy-compatible search")]
struct Cli {
    /// Configuration file (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Collection name, overriding the configuration
    #[arg(long, global = true)]
    collection: Option<String>,

    /// Engine host, overriding the configuration
    #[arg(long, global = true)]
    host: Option<String>,

    /// Engine port, overriding the configuration
    #[arg(long, global = true)]
    port: Option<u16>,

    /// Engine API key, overriding the configuration
    #[arg(long, global = true, env = "TYPESENSE_API_KEY")]
    api_key: Option<String>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Ingest a card catalog into the collection
    Ingest {
        /// Catalog XML file
        catalog: PathBuf,
        /// Drop and recreate the collection first
        #[arg(long)]
        overwrite: bool,
        /// Abort on the first invalid record
        #[arg(long)]
        strict: bool,
        /// Derive printing artwork into the configured output directory
        #[arg(long)]
        images: bool,
        #[arg(long)]
        json: bool,
    },
    /// Search the collection
    Search {
        /// Title text; omit to match everything
        title: Option<String>,
        #[arg(long = "clan")]
        clans: Vec<String>,
        #[arg(long = "keyword")]
        keywords: Vec<String>,
        #[arg(long = "legality")]
        legalities: Vec<String>,
        #[arg(long = "type")]
        types: Vec<String>,
        #[arg(long, default_value_t = 50)]
        size: usize,
        #[arg(long, default_value_t = 0)]
        from: usize,
        /// Legacy url-encoded request body, used instead of the flags
        #[arg(long, conflicts_with = "title")]
        raw: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Show one card
    Fetch {
        /// Catalog id, e.g. Onyx050
        id: String,
        #[arg(long)]
        json: bool,
    },
    /// Print the collection schema, optionally creating the collection
    Schema {
        #[arg(long)]
        create: bool,
        #[arg(long)]
        overwrite: bool,
    },
    /// Print a facet value list (type, deck, clan, legality, ...)
    Attributes {
        lookup: String,
    },
}

fn load_config(cli: &Cli) -> Result<OracleConfig, CliError> {
    let mut config = match &cli.config {
        Some(path) => OracleConfig::load(path)?,
        None => OracleConfig::default(),
    };
    if let Some(collection) = &cli.collection {
        config.collection = collection.clone();
    }
    if let Some(host) = &cli.host {
        config.engine.host = host.clone();
    }
    if let Some(port) = cli.port {
        config.engine.port = port;
    }
    if let Some(api_key) = &cli.api_key {
        config.engine.api_key = api_key.clone();
    }
    config.validate()?;
    Ok(config)
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = load_config(&cli)?;
    let engine = TypesenseClient::new(&config.engine)?;

    match cli.command {
        Command::Ingest {
            catalog,
            overwrite,
            strict,
            images,
            json,
        } => {
            let args = IngestArgs {
                catalog,
                overwrite,
                strict,
                images,
                json,
            };
            handle_ingest(&engine, &config, &args).await
        }
        Command::Search {
            title,
            clans,
            keywords,
            legalities,
            types,
            size,
            from,
            raw,
            json,
        } => {
            let args = SearchArgs {
                title,
                clans,
                keywords,
                legalities,
                types,
                size,
                from,
                raw_body: raw,
                json,
            };
            handle_search(&engine, &config, &args).await
        }
        Command::Fetch { id, json } => handle_fetch(&engine, &config, &FetchArgs { id, json }).await,
        Command::Schema { create, overwrite } => {
            handle_schema(&engine, &config, &SchemaArgs { create, overwrite }).await
        }
        Command::Attributes { lookup } => handle_attributes(&engine, &config, &lookup),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    run(cli)
        .await
        .map_err(|e| anyhow::anyhow!(e.user_message()))
}
