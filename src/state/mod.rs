//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `CrawlState`: Tracks the pagination cursor and whether the crawl has finished

mod crawl_state;

pub use crawl_state::CrawlState;
