//! Output module for crawl results
//!
//! This module handles:
//! - The sink interface accepted records are written through
//! - CSV encoding of those records
//! - Run statistics reported when the crawl ends

mod csv_sink;
pub mod stats;
mod traits;

pub use csv_sink::CsvSink;
pub use stats::{log_summary, CrawlSummary};
pub use traits::RecordSink;
