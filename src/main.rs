//! qrz-sync CLI - refresh static-site logbook statistics from the QRZ Logbook API.

use anyhow::{Context, Result};
use clap::Parser;
use qrz_sync::{
    adif::parse_fetch_response,
    config::Config,
    error::SyncError,
    export::{build_logbook_csv, write_logbook_csv},
    fetch::QrzClient,
    html::update_stats_html,
    stats::LogStats,
};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Refresh website statistics and the searchable logbook from the QRZ Logbook API
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// QRZ Logbook API key (Settings > API Key on logbook.qrz.com)
    #[arg(short = 'k', long, env = "QRZ_API_KEY")]
    api_key: Option<String>,

    /// QRZ Logbook API endpoint
    #[arg(long)]
    api_url: Option<String>,

    /// HTML page whose stat counters get rewritten
    #[arg(long)]
    html: Option<PathBuf>,

    /// Output path for the searchable logbook CSV
    #[arg(long)]
    csv_out: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Compute and print statistics without writing any file
    #[arg(long)]
    dry_run: bool,

    /// Print the statistics summary as JSON
    #[arg(long)]
    json: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let config = Config::load()?;

    // CLI overrides config file, config file overrides defaults.
    let api_key = args
        .api_key
        .or(config.api_key)
        .context("No API key: pass --api-key, set QRZ_API_KEY, or add api_key to the config file")?;
    let api_url = args.api_url.unwrap_or(config.api_url);
    let html_path = args.html.unwrap_or(config.html_path);
    let csv_path = args.csv_out.unwrap_or(config.csv_path);
    let timeout = Duration::from_secs(args.timeout.unwrap_or(config.timeout_secs));

    info!("fetching logbook from {}", api_url);
    let client = QrzClient::new(api_url, timeout);
    let raw = client.fetch_logbook(&api_key)?;

    let records = parse_fetch_response(&raw)?;
    if records.is_empty() {
        return Err(SyncError::EmptyLog.into());
    }
    info!("parsed {} QSO records", records.len());

    let stats = LogStats::from_records(&records);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        println!("{stats}");
    }

    if args.dry_run {
        info!("dry run: skipping CSV and HTML updates");
        return Ok(());
    }

    let csv = build_logbook_csv(&records);
    write_logbook_csv(&csv_path, &csv)?;

    let outcomes = update_stats_html(&html_path, &stats)?;
    let applied = outcomes.iter().filter(|o| o.applied).count();
    info!(
        "updated {}/{} stat counters in {}",
        applied,
        outcomes.len(),
        html_path.display()
    );

    Ok(())
}
