//! CLI driver: harvest inbound transfers to an address and print the ranked
//! sender table.

use anyhow::{Context, Result};
use clap::Parser;
use solana_sdk::pubkey::Pubkey;
use std::path::PathBuf;
use std::str::FromStr;

use sol_inflow::config::{FileConfig, HarvestConfig};
use sol_inflow::harvest::run_harvest;
use sol_inflow::progress::{ProgressEvent, ProgressSink};
use sol_inflow::rpc::HttpRpcClient;

#[derive(Parser)]
#[command(
    name = "sol-inflow",
    about = "Harvest inbound SOL transfers to an address and rank senders by total amount"
)]
struct Cli {
    /// Target wallet address to analyze
    address: String,

    /// Path to the TOML config file
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// RPC endpoint URL; repeatable, overrides the config file endpoints
    #[arg(long = "rpc-url", env = "RPC_URLS", value_delimiter = ',')]
    rpc_urls: Vec<String>,

    /// Minimum qualifying transfer amount in SOL (inclusive)
    #[arg(long)]
    min_sol: Option<f64>,

    /// Only print the top N senders
    #[arg(long)]
    top: Option<usize>,
}

/// Sink that renders progress as indented console lines.
struct ConsoleSink;

impl ProgressSink for ConsoleSink {
    fn publish(&self, event: ProgressEvent) {
        match event {
            ProgressEvent::Pagination {
                pages_done,
                signatures,
            } => {
                println!("    Page {}: {} signatures collected", pages_done, signatures);
            }
            ProgressEvent::Resolution {
                batches_done,
                total_batches,
                items_processed,
            } => {
                let percent = batches_done as f64 / total_batches as f64 * 100.0;
                println!(
                    "    Batch {}/{} ({:.1}%): {} signatures processed",
                    batches_done, total_batches, percent, items_processed
                );
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let target = Pubkey::from_str(&cli.address)
        .with_context(|| format!("Invalid Solana address: {}", cli.address))?
        .to_string();

    // The config file is optional when endpoints come from flags or RPC_URLS
    let file_config = if cli.config.exists() {
        FileConfig::load(&cli.config)?
    } else {
        toml::from_str("").expect("empty config has defaults")
    };

    let endpoint_override = if cli.rpc_urls.is_empty() {
        None
    } else {
        Some(cli.rpc_urls.clone())
    };
    let config = HarvestConfig::from_file(&file_config, endpoint_override, cli.min_sol)?;

    println!("Analyzing inbound transfers");
    println!("  Target:     {}", target);
    println!(
        "  Minimum:    {} SOL",
        config.min_amount_lamports as f64 / 1e9
    );
    println!("  Endpoints:  {}", config.pool.len());
    println!();

    let rpc = HttpRpcClient::new(config.request_timeout).context("Failed to build RPC client")?;

    println!("  Collecting signatures...");
    let summary = run_harvest(&rpc, &config, &target, &ConsoleSink).await?;

    if summary.no_history() {
        println!("\nNo transactions found for this address.");
        return Ok(());
    }

    println!(
        "\n  {} signatures, {} transactions resolved",
        summary.signatures_found, summary.transactions_resolved
    );

    let result = &summary.result;
    if result.senders.is_empty() {
        println!(
            "\nNo qualifying transfers (>= {} SOL) found.",
            config.min_amount_lamports as f64 / 1e9
        );
        return Ok(());
    }

    println!(
        "\n{} qualifying transfers from {} senders:\n",
        result.total_qualifying_transfers,
        result.senders.len()
    );
    println!(
        "{:>4}  {:<44}  {:>9}  {:>14}  {}",
        "#", "Sender", "Transfers", "Total (SOL)", "Last transfer"
    );

    let shown = cli.top.unwrap_or(result.senders.len());
    for (rank, sender) in result.senders.iter().take(shown).enumerate() {
        let last_time = sender
            .transfers
            .iter()
            .filter_map(|t| t.block_time)
            .max()
            .and_then(|ts| chrono::DateTime::from_timestamp(ts, 0))
            .map(|dt| dt.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "unknown".to_string());

        println!(
            "{:>4}  {:<44}  {:>9}  {:>14.6}  {}",
            rank + 1,
            sender.address,
            sender.transfer_count(),
            sender.total_sol(),
            last_time
        );
    }

    if shown < result.senders.len() {
        println!("  ... and {} more senders", result.senders.len() - shown);
    }

    Ok(())
}
