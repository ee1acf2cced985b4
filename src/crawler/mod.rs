//! Crawler module for catalog fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching of listing pages
//! - Listing extraction from page markup
//! - The pagination loop that validates and emits records

mod driver;
mod fetcher;
mod parser;

pub use driver::CrawlDriver;
pub use fetcher::{build_http_client, HttpPageFetcher, PageSource};
pub use parser::{parse_listing, ListingSelectors};

use crate::config::Config;
use crate::output::{log_summary, CrawlSummary, CsvSink};
use crate::CellarError;
use std::path::Path;

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Build the HTTP fetcher from the configuration
/// 2. Open the CSV sink (file or stdout)
/// 3. Page through the configured category until an empty page
/// 4. Log the run summary
///
/// # Arguments
///
/// * `config` - The crawler configuration
///
/// # Returns
///
/// * `Ok(CrawlSummary)` - Crawl completed successfully
/// * `Err(CellarError)` - The first fetch or output failure
pub async fn crawl(config: &Config) -> Result<CrawlSummary, CellarError> {
    let fetcher = HttpPageFetcher::from_config(config)?;
    let mut sink = CsvSink::open(config.output.path.as_deref().map(Path::new))?;

    let mut driver = CrawlDriver::new(fetcher, config.catalog.category.clone())
        .with_max_pages(config.crawler.max_pages);

    let summary = driver.run(&mut sink).await?;
    tracing::info!("Wrote {} CSV rows", sink.rows_written());
    log_summary(&summary);

    Ok(summary)
}
