//! Command-line client for the LotOps API.
//!
//! Remote commands talk to the server at LOTOPS_API_URL (or API_URL);
//! `detect` and `validate` are local dry-runs over a feed file.

use std::collections::HashSet;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use uuid::Uuid;

use lotops_api_client::ApiClient;
use lotops_cli::{init_tracing, read_feed, separator_label};
use lotops_ingest::{detect, map_table, preview_rows, validate_rows};

#[derive(Parser)]
#[command(name = "lotops", about = "LotOps API CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect separator, filename timestamp and column mapping of a local feed
    Detect {
        /// Path to the feed file
        file: std::path::PathBuf,
    },
    /// Validate a local feed without uploading: full dry-run row report
    Validate {
        /// Path to the feed file
        file: std::path::PathBuf,
    },
    /// Register a feed file with the server, optionally processing it at once
    Upload {
        /// Dealer UUID
        dealer: Uuid,
        /// Path to the feed file
        file: std::path::PathBuf,
        /// Process the dealer's pending imports after registering
        #[arg(long)]
        process: bool,
    },
    /// List a dealer's import records
    Imports {
        /// Dealer UUID
        dealer: Uuid,
    },
    /// List a dealer's inventory
    Inventory {
        /// Dealer UUID
        dealer: Uuid,
        /// Maximum number of vehicles
        #[arg(long, default_value = "20")]
        limit: i64,
        /// Offset for pagination
        #[arg(long, default_value = "0")]
        offset: i64,
        /// Filter by status (e.g. new, used)
        #[arg(long)]
        status: Option<String>,
    },
    /// Analyze a VIN
    Vin {
        /// Vehicle identification number
        vin: String,
    },
    /// Dealer operations
    Dealer {
        #[command(subcommand)]
        sub: DealerCommands,
    },
}

#[derive(Subcommand)]
enum DealerCommands {
    /// Create a new dealer
    Create {
        /// Dealer name
        name: String,
    },
    /// Get a dealer by ID
    Get {
        /// Dealer UUID
        id: Uuid,
    },
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize response")?;
    println!("{}", out);
    Ok(())
}

fn detect_report(file: &std::path::Path) -> anyhow::Result<serde_json::Value> {
    let (filename, text) = read_feed(file)?;
    let detected = detect(&text, &filename);
    let table = map_table(&text, detected.separator);

    Ok(serde_json::json!({
        "filename": filename,
        "separator": separator_label(detected.separator),
        "timestamp": detected.timestamp,
        "columns": table.mapping.by_name(),
        "preview": preview_rows(&text, detected.separator, 5),
    }))
}

/// Dry-run report plus the invalid-row count, so the command can signal
/// a dirty feed through its exit code.
fn validate_report(file: &std::path::Path) -> anyhow::Result<(serde_json::Value, usize)> {
    let (filename, text) = read_feed(file)?;
    let detected = detect(&text, &filename);
    let table = map_table(&text, detected.separator);

    let mapped_indices: HashSet<usize> = table.mapping.by_name().into_values().collect();
    let unmapped: Vec<&String> = table
        .header
        .iter()
        .enumerate()
        .filter(|(index, _)| !mapped_indices.contains(index))
        .map(|(_, cell)| cell)
        .collect();

    let outcome = validate_rows(&table);
    let invalid_count = outcome.invalid.len();

    let report = serde_json::json!({
        "filename": filename,
        "separator": separator_label(detected.separator),
        "timestamp": detected.timestamp,
        "columns": table.mapping.by_name(),
        "unmapped_columns": unmapped,
        "processed": outcome.processed,
        "valid": outcome.records.len(),
        "invalid": outcome.invalid,
    });
    Ok((report, invalid_count))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    dotenvy::dotenv().ok();

    let client = ApiClient::from_env().context("Failed to create API client")?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Detect { file } => {
            print_json(&detect_report(&file)?)?;
        }
        Commands::Validate { file } => {
            let (report, invalid_count) = validate_report(&file)?;
            print_json(&report)?;
            if invalid_count > 0 {
                std::process::exit(1);
            }
        }
        Commands::Upload {
            dealer,
            file,
            process,
        } => {
            let path = file.to_string_lossy();
            let response = client.register_import_file(dealer, &path).await?;
            print_json(&response)?;
            if process {
                let processed = client.process_imports(dealer).await?;
                print_json(&processed)?;
            }
        }
        Commands::Imports { dealer } => {
            let response = client.list_imports(dealer).await?;
            print_json(&response)?;
        }
        Commands::Inventory {
            dealer,
            limit,
            offset,
            status,
        } => {
            let response = client
                .list_inventory(dealer, limit, offset, status.as_deref())
                .await?;
            print_json(&response)?;
        }
        Commands::Vin { vin } => {
            let response = client.check_vin(&vin).await?;
            print_json(&response)?;
        }
        Commands::Dealer { sub } => match sub {
            DealerCommands::Create { name } => {
                let response = client.create_dealer(&name).await?;
                print_json(&response)?;
            }
            DealerCommands::Get { id } => {
                let response = client.get_dealer(id).await?;
                print_json(&response)?;
            }
        },
    }

    Ok(())
}
