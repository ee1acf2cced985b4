//! Cellar-Crawl: a paginated catalog scraper
//!
//! This crate walks a storefront's product listing one page at a time,
//! extracts a record per listed product, drops records whose price or score
//! is not numeric, and streams the rest as CSV.

pub mod config;
pub mod crawler;
pub mod output;
pub mod record;
pub mod state;

use thiserror::Error;

/// Main error type for Cellar-Crawl operations
#[derive(Debug, Error)]
pub enum CellarError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Bad status from {url}: {status}")]
    Status { url: String, status: String },

    #[error("Output error: {0}")]
    Output(#[from] OutputError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid selector '{selector}': {message}")]
    InvalidSelector { selector: String, message: String },
}

/// Errors raised by an output sink
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("CSV write failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for Cellar-Crawl operations
pub type Result<T> = std::result::Result<T, CellarError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for output operations
pub type OutputResult<T> = std::result::Result<T, OutputError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{CrawlDriver, HttpPageFetcher, PageSource};
pub use output::{CrawlSummary, CsvSink, RecordSink};
pub use record::{AcceptedRecord, CandidateRecord};
pub use state::CrawlState;
