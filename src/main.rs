//! Scope-Crawler main entry point
//!
//! This is the command-line interface for the Scope-Crawler domain crawler.

use anyhow::Context;
use clap::Parser;
use scope_crawler::config::{load_config_with_hash, parse_seed_url, validate, Config};
use scope_crawler::crawler::Crawler;
use scope_crawler::output::{print_statistics, JsonFileSink, ReportSink};
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing_subscriber::EnvFilter;

/// Scope-Crawler: a domain-scoped concurrent web crawler
///
/// Scope-Crawler starts from one seed URL and fetches every page on the
/// same host reachable within the depth limit, under a global request
/// rate. Titles and outbound links are written to a JSON report.
#[derive(Parser, Debug)]
#[command(name = "scope-crawler")]
#[command(version)]
#[command(about = "A domain-scoped concurrent web crawler", long_about = None)]
struct Cli {
    /// Seed URL to start from (prompted for when neither given nor configured)
    #[arg(value_name = "SEED")]
    seed: Option<String>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Maximum link depth from the seed
    #[arg(long, value_name = "N")]
    max_depth: Option<u32>,

    /// Global request rate ceiling (requests per second)
    #[arg(long, value_name = "R")]
    rps: Option<f64>,

    /// Path of the JSON results file
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without actually crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let mut config = load(&cli)?;
    apply_overrides(&mut config, &cli);

    if config.crawler.seed_url.is_none() {
        config.crawler.seed_url = Some(prompt_for_seed().await?);
    }

    // Overrides and the prompted seed have not been validated yet
    validate(&config).context("Invalid configuration")?;
    let seed = config
        .crawler
        .seed_url
        .as_deref()
        .map(parse_seed_url)
        .transpose()?
        .context("No seed URL was provided")?;

    if cli.dry_run {
        handle_dry_run(&config, seed.as_str());
        return Ok(());
    }

    handle_crawl(config).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("scope_crawler=info,warn"),
            1 => EnvFilter::new("scope_crawler=debug,info"),
            2 => EnvFilter::new("scope_crawler=trace,debug"),
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

/// Loads the configuration file, or the defaults when none was given
fn load(cli: &Cli) -> anyhow::Result<Config> {
    let Some(path) = &cli.config else {
        tracing::debug!("No configuration file given, using defaults");
        return Ok(Config::default());
    };

    tracing::info!("Loading configuration from: {}", path.display());
    match load_config_with_hash(path) {
        Ok((config, hash)) => {
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            Ok(config)
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            Err(e.into())
        }
    }
}

/// Applies command-line flags on top of the loaded configuration
fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(seed) = &cli.seed {
        config.crawler.seed_url = Some(seed.clone());
    }
    if let Some(max_depth) = cli.max_depth {
        config.crawler.max_depth = max_depth;
    }
    if let Some(rps) = cli.rps {
        config.crawler.requests_per_second = rps;
    }
    if let Some(output) = &cli.output {
        config.output.results_path = output.display().to_string();
    }
}

/// Asks for the seed URL on stdin
async fn prompt_for_seed() -> anyhow::Result<String> {
    let mut stdout = tokio::io::stdout();
    stdout.write_all(b"Enter the base URL: ").await?;
    stdout.flush().await?;

    let mut line = String::new();
    BufReader::new(tokio::io::stdin())
        .read_line(&mut line)
        .await
        .context("Failed to read the base URL from stdin")?;

    Ok(line.trim().to_string())
}

/// Handles the --dry-run mode: shows the effective configuration
fn handle_dry_run(config: &Config, seed: &str) {
    println!("=== Scope-Crawler Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Seed URL: {}", seed);
    println!("  Max depth: {}", config.crawler.max_depth);
    println!(
        "  Requests per second: {}",
        config.crawler.requests_per_second
    );
    println!("  Request timeout: {}s", config.crawler.request_timeout);

    println!("\nUser Agent:");
    println!("  {}", config.user_agent.header_value());

    println!("\nOutput:");
    println!("  Results: {}", config.output.results_path);

    println!("\n✓ Configuration is valid");
}

/// Handles the main crawl operation
async fn handle_crawl(config: Config) -> anyhow::Result<()> {
    let crawler = Crawler::from_config(&config)?;
    let completed = crawler.run().await;

    print_statistics(&completed.statistics);

    // The summary above is already out; only persistence can fail from here
    let sink = JsonFileSink::new(&config.output.results_path);
    match sink.write_report(&completed.report) {
        Ok(()) => {
            println!("  Results saved to: {}", sink.destination());
            Ok(())
        }
        Err(e) => {
            tracing::error!("Failed to write results: {}", e);
            Err(e.into())
        }
    }
}
