//! Configuration module for Cellar-Crawl
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! A missing file is not an error at the call sites: `Config::default()` describes
//! the stock VINTAGES wine crawl.
//!
//! # Example
//!
//! ```no_run
//! use cellar_crawl::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("cellar.toml")).unwrap();
//! println!("Crawling category: {}", config.catalog.category);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    CatalogConfig, Config, CrawlerConfig, HttpConfig, OutputConfig, QueryParam, SelectorConfig,
    DEFAULT_BASE_URL, DEFAULT_CATEGORY,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;

pub(crate) use validation::compile_selector;
