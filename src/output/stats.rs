//! Crawl run statistics
//!
//! The driver fills in a [`CrawlSummary`] as it goes and returns it when the
//! crawl ends. Nothing here is persisted.

use chrono::{DateTime, Utc};

/// Counters and timestamps for one crawl run
#[derive(Debug, Clone)]
pub struct CrawlSummary {
    /// Catalog section that was crawled
    pub category: String,

    /// When the first page was requested
    pub started_at: DateTime<Utc>,

    /// When the crawl reached a terminal state
    pub finished_at: Option<DateTime<Utc>>,

    /// Number of page requests issued, including the final empty one
    pub pages_fetched: u64,

    /// Candidate records returned across all pages
    pub candidates_seen: u64,

    /// Records written to the sink
    pub records_accepted: u64,

    /// Records dropped because score or price was not numeric
    pub records_rejected: u64,

    /// Cursor value after the last page
    pub final_offset: usize,

    /// True when the crawl stopped at the configured page ceiling rather
    /// than on an empty page
    pub stopped_by_limit: bool,
}

impl CrawlSummary {
    /// Creates an empty summary stamped with the current time
    pub fn new(category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            started_at: Utc::now(),
            finished_at: None,
            pages_fetched: 0,
            candidates_seen: 0,
            records_accepted: 0,
            records_rejected: 0,
            final_offset: 0,
            stopped_by_limit: false,
        }
    }

    /// Marks the run as finished now
    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    /// Returns the acceptance rate as a percentage
    pub fn acceptance_rate(&self) -> f64 {
        if self.candidates_seen == 0 {
            return 0.0;
        }
        (self.records_accepted as f64 / self.candidates_seen as f64) * 100.0
    }

    /// Wall-clock duration of the run, once finished
    pub fn duration_seconds(&self) -> Option<i64> {
        self.finished_at
            .map(|finished| (finished - self.started_at).num_seconds())
    }
}

/// Logs the summary at info level
pub fn log_summary(summary: &CrawlSummary) {
    tracing::info!(
        "Crawl of '{}' finished: {} pages, {} candidates, {} accepted, {} rejected ({:.1}% accepted)",
        summary.category,
        summary.pages_fetched,
        summary.candidates_seen,
        summary.records_accepted,
        summary.records_rejected,
        summary.acceptance_rate()
    );

    if let Some(seconds) = summary.duration_seconds() {
        tracing::info!("Final offset {} after {}s", summary.final_offset, seconds);
    }

    if summary.stopped_by_limit {
        tracing::warn!("Stopped at the page limit; the catalog may have more entries");
    }
}
