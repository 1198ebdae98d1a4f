//! Pagewatch main entry point
//!
//! This is the command-line interface for the pagewatch SEO monitor.

use clap::Parser;
use pagewatch::config::load_config_with_hash;
use pagewatch::monitor::Monitor;
use pagewatch::report::{HtmlFileSink, ReportSink};
use pagewatch::scrape::HttpFetchService;
use pagewatch::storage::{SnapshotStore, SqliteStore};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Pagewatch: an SEO page-change monitor
///
/// Pagewatch fetches a configured set of pages, stores a structured
/// snapshot of each, compares against the previous version, and writes an
/// HTML report of SEO issues and detected changes.
#[derive(Parser, Debug)]
#[command(name = "pagewatch")]
#[command(version = "1.0.0")]
#[command(about = "An SEO page-change monitor", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Only process the first N configured URLs
    #[arg(long, value_name = "N")]
    limit: Option<usize>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be monitored without fetching
    #[arg(long, conflicts_with = "stats")]
    dry_run: bool,

    /// Show statistics from the snapshot database and exit
    #[arg(long, conflicts_with = "dry_run")]
    stats: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (mut config, config_hash) = load_config_with_hash(&cli.config)?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    if let Some(limit) = cli.limit {
        tracing::info!("Limiting run to first {} URLs as requested", limit);
        config.urls.truncate(limit);
    }

    if cli.dry_run {
        handle_dry_run(&config);
    } else if cli.stats {
        handle_stats(&config)?;
    } else {
        handle_run(config).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("pagewatch=info,warn"),
            1 => EnvFilter::new("pagewatch=debug,info"),
            2 => EnvFilter::new("pagewatch=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: validates config and shows what would run
fn handle_dry_run(config: &pagewatch::config::Config) {
    println!("=== Pagewatch Dry Run ===\n");

    println!("Monitor Configuration:");
    println!("  Max attempts: {}", config.monitor.max_attempts);
    println!("  Retry delay: {}ms", config.monitor.retry_delay_ms);
    println!("  Render JS: {}", config.monitor.render_js);
    println!("  Render wait: {}ms", config.monitor.render_wait_ms);
    println!("  Retention: {} days", config.monitor.retention_days);

    println!("\nOutput:");
    println!("  Database: {}", config.output.database_path);
    println!("  Report: {}", config.output.report_path);

    if !config.nav_locators.is_empty() {
        println!("\nNav Locators ({}):", config.nav_locators.len());
        for entry in &config.nav_locators {
            println!("  - {} -> {}", entry.host_pattern, entry.selector);
        }
    }

    println!("\nMonitored URLs ({}):", config.urls.len());
    for url in &config.urls {
        println!("  - {}", url);
    }

    println!("\n✓ Configuration is valid");
}

/// Handles the --stats mode: shows statistics from the snapshot database
fn handle_stats(config: &pagewatch::config::Config) -> anyhow::Result<()> {
    println!("Database: {}\n", config.output.database_path);

    let store = SqliteStore::new(std::path::Path::new(&config.output.database_path))?;

    println!("Snapshots: {}", store.count_snapshots()?);
    println!("Tracked URLs: {}", store.count_urls()?);

    let urls = store.tracked_urls()?;
    if !urls.is_empty() {
        println!("\nURLs:");
        for url in urls {
            println!("  - {}", url);
        }
    }

    Ok(())
}

/// Handles the main monitoring run
async fn handle_run(config: pagewatch::config::Config) -> anyhow::Result<()> {
    let store = SqliteStore::new(std::path::Path::new(&config.output.database_path))?;
    let fetcher = HttpFetchService::new()?;
    let sink = HtmlFileSink::new(&config.output.report_path);

    let mut monitor = Monitor::new(&config, store, fetcher);

    let report = monitor.run().await?;

    if !report.failures.is_empty() {
        tracing::warn!("Failed to scrape {} URL(s):", report.failures.len());
        for failure in &report.failures {
            tracing::warn!("  - {}: {}", failure.url, failure.reason);
        }
    }

    sink.deliver(&report)?;

    monitor.purge_expired()?;

    tracing::info!(
        "Monitoring run finished: {} scraped, {} failed",
        report.pages.len(),
        report.failures.len()
    );

    Ok(())
}
