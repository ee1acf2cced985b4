//! Cellar-Crawl main entry point
//!
//! This is the command-line interface for the Cellar-Crawl catalog scraper.

use anyhow::Context;
use cellar_crawl::config::{load_config_with_hash, Config};
use cellar_crawl::crawler::{crawl, HttpPageFetcher};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Cellar-Crawl: a paginated catalog scraper
///
/// Cellar-Crawl pages through a storefront category, keeps the products
/// whose price and score are numeric, and writes them as CSV. Progress is
/// logged to stderr; CSV goes to stdout unless an output file is set.
#[derive(Parser, Debug)]
#[command(name = "cellar-crawl")]
#[command(version)]
#[command(about = "A paginated catalog scraper", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (built-in defaults when omitted)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Catalog category to crawl, overriding the configuration
    #[arg(long)]
    category: Option<String>,

    /// Write CSV to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Stop after this many page requests
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    max_pages: Option<u64>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show the first request without crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("failed to load {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => {
            tracing::info!("No configuration file given, using built-in defaults");
            Config::default()
        }
    };

    apply_overrides(&mut config, &cli);
    cellar_crawl::config::validate(&config).context("invalid settings")?;

    if cli.dry_run {
        return handle_dry_run(&config);
    }

    match crawl(&config).await {
        Ok(_) => {
            tracing::info!("Crawl completed successfully");
            Ok(())
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            Err(e.into())
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr so stdout carries only CSV.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("cellar_crawl=info,warn"),
            1 => EnvFilter::new("cellar_crawl=debug,info"),
            2 => EnvFilter::new("cellar_crawl=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Applies command-line values on top of the loaded configuration
fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(category) = &cli.category {
        config.catalog.category = category.clone();
    }
    if let Some(output) = &cli.output {
        config.output.path = Some(output.display().to_string());
    }
    if let Some(max_pages) = cli.max_pages {
        config.crawler.max_pages = Some(max_pages as usize);
    }
}

/// Handles the --dry-run mode: shows what would be requested
fn handle_dry_run(config: &Config) -> anyhow::Result<()> {
    let fetcher = HttpPageFetcher::from_config(config)?;
    let first_page = fetcher.page_url(&config.catalog.category, 0)?;

    println!("=== Cellar-Crawl Dry Run ===\n");

    println!("Catalog:");
    println!("  Base URL: {}", config.catalog.base_url);
    println!("  Category: {}", config.catalog.category);
    println!("  Offset parameter: {}", config.catalog.offset_param);
    for param in &config.catalog.query {
        println!("  Query: {} = {}", param.key, param.value);
    }

    println!("\nHTTP:");
    println!("  User agent: {}", config.http.user_agent);
    println!("  Timeout: {}s", config.http.timeout_secs);

    println!("\nLimits:");
    match config.crawler.max_pages {
        Some(limit) => println!("  Max pages: {}", limit),
        None => println!("  Max pages: unbounded"),
    }

    println!("\nOutput:");
    println!(
        "  {}",
        config.output.path.as_deref().unwrap_or("<stdout>")
    );

    println!("\n✓ Configuration is valid");
    println!("✓ First request: {}", first_page);

    Ok(())
}
