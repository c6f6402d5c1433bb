//! Summarize a dealer's import history and inventory from a running server.

use std::collections::BTreeMap;

use anyhow::Result;
use clap::Parser;
use rust_decimal::Decimal;
use uuid::Uuid;

use lotops_api_client::{ApiClient, ImportFile, ImportStatus, Vehicle};
use lotops_cli::{init_tracing, truncate_string};

/// Server-side page cap for inventory listings.
const PAGE_SIZE: i64 = 100;

#[derive(Parser, Debug)]
#[command(name = "import_stats")]
#[command(about = "Get statistics about a dealer's imports and inventory")]
struct Args {
    /// Dealer ID to report on
    #[arg(value_name = "UUID")]
    dealer: Uuid,

    /// Output format: json or table (default: table)
    #[arg(long, default_value = "table")]
    format: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let args = Args::parse();
    let client = ApiClient::from_env()?;

    let imports = client.list_imports(args.dealer).await?;
    let (vehicles, total) = fetch_all_inventory(&client, args.dealer).await?;

    let stats = compute_stats(args.dealer, &imports.files, &vehicles, total);

    match args.format.as_str() {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
        _ => {
            print_stats_table(&stats, &imports.files);
        }
    }

    Ok(())
}

/// Page through the inventory listing until everything is fetched.
async fn fetch_all_inventory(client: &ApiClient, dealer: Uuid) -> Result<(Vec<Vehicle>, i64)> {
    let mut vehicles = Vec::new();
    let mut offset = 0;

    loop {
        let page = client.list_inventory(dealer, PAGE_SIZE, offset, None).await?;
        let fetched = page.count;
        let total = page.total;
        vehicles.extend(page.vehicles);

        if fetched == 0 || (vehicles.len() as i64) >= total {
            return Ok((vehicles, total));
        }
        offset += PAGE_SIZE;
    }
}

#[derive(serde::Serialize)]
struct DealerStats {
    dealer_id: Uuid,
    imports: ImportCounts,
    rows: RowTotals,
    inventory: InventorySnapshot,
}

#[derive(serde::Serialize)]
struct ImportCounts {
    total: usize,
    pending: usize,
    uploading: usize,
    success: usize,
    error: usize,
}

#[derive(serde::Serialize)]
struct RowTotals {
    processed: usize,
    valid: usize,
    invalid: usize,
    inserted: u64,
    updated: u64,
}

#[derive(serde::Serialize)]
struct InventorySnapshot {
    total: i64,
    priced: usize,
    call_for_price: usize,
    total_value: Decimal,
    by_status: BTreeMap<String, usize>,
}

fn compute_stats(
    dealer_id: Uuid,
    imports: &[ImportFile],
    vehicles: &[Vehicle],
    total: i64,
) -> DealerStats {
    let mut counts = ImportCounts {
        total: imports.len(),
        pending: 0,
        uploading: 0,
        success: 0,
        error: 0,
    };
    let mut rows = RowTotals {
        processed: 0,
        valid: 0,
        invalid: 0,
        inserted: 0,
        updated: 0,
    };

    for record in imports {
        match record.status {
            ImportStatus::Pending => counts.pending += 1,
            ImportStatus::Uploading => counts.uploading += 1,
            ImportStatus::Success => counts.success += 1,
            ImportStatus::Error => counts.error += 1,
        }
        if let Some(summary) = &record.summary {
            rows.processed += summary.processed;
            rows.valid += summary.valid;
            rows.invalid += summary.invalid;
            rows.inserted += summary.inserted;
            rows.updated += summary.updated;
        }
    }

    let mut by_status: BTreeMap<String, usize> = BTreeMap::new();
    let mut priced = 0;
    let mut total_value = Decimal::ZERO;
    for vehicle in vehicles {
        let status = vehicle
            .status
            .clone()
            .unwrap_or_else(|| "unknown".to_string());
        *by_status.entry(status).or_insert(0) += 1;
        if let Some(price) = vehicle.price {
            priced += 1;
            total_value += price;
        }
    }

    DealerStats {
        dealer_id,
        imports: counts,
        rows,
        inventory: InventorySnapshot {
            total,
            priced,
            call_for_price: vehicles.len() - priced,
            total_value,
            by_status,
        },
    }
}

fn print_stats_table(stats: &DealerStats, imports: &[ImportFile]) {
    println!("\n=== Dealer Import Statistics ===\n");
    println!("Dealer ID: {}", stats.dealer_id);

    println!("\n--- Imports ---");
    println!("Total:     {}", stats.imports.total);
    println!("Pending:   {}", stats.imports.pending);
    println!("Uploading: {}", stats.imports.uploading);
    println!("Success:   {}", stats.imports.success);
    println!("Error:     {}", stats.imports.error);

    println!("\n--- Rows (processed imports) ---");
    println!("Processed: {}", stats.rows.processed);
    println!("Valid:     {}", stats.rows.valid);
    println!("Invalid:   {}", stats.rows.invalid);
    println!("Inserted:  {}", stats.rows.inserted);
    println!("Updated:   {}", stats.rows.updated);

    println!("\n--- Inventory ---");
    println!("Vehicles:       {}", stats.inventory.total);
    println!("Priced:         {}", stats.inventory.priced);
    println!("Call for price: {}", stats.inventory.call_for_price);
    println!("Total value:    ${}", stats.inventory.total_value);
    if !stats.inventory.by_status.is_empty() {
        println!("By status:");
        for (status, count) in &stats.inventory.by_status {
            println!("  {:<12} {:>6}", status, count);
        }
    }

    if !imports.is_empty() {
        println!("\n--- Recent Imports (newest first) ---");
        for record in imports.iter().rev().take(10) {
            let detail = match (&record.summary, &record.error) {
                (Some(summary), _) => {
                    format!("{} rows, {} valid", summary.processed, summary.valid)
                }
                (None, Some(error)) => truncate_string(error, 40),
                (None, None) => String::new(),
            };
            let status = record.status.to_string();
            println!(
                "{:<40} {:<10} {}",
                truncate_string(&record.filename, 38),
                status,
                detail
            );
        }
        if imports.len() > 10 {
            println!("... and {} more imports", imports.len() - 10);
        }
    }

    println!();
}
