//! Crawl driver - pagination loop
//!
//! The driver owns the pagination cursor. It requests one page at a time,
//! validates each candidate, writes the accepted ones and flushes the sink
//! before asking for the next page. The loop ends on the first empty page,
//! on the first error, or at an optional page ceiling.

use crate::crawler::fetcher::PageSource;
use crate::output::{CrawlSummary, RecordSink};
use crate::record::CandidateRecord;
use crate::state::CrawlState;
use crate::{CellarError, OutputResult};

/// Drives the crawl of one category
pub struct CrawlDriver<S: PageSource> {
    source: S,
    category: String,
    max_pages: Option<usize>,
    state: CrawlState,
}

impl<S: PageSource> CrawlDriver<S> {
    /// Creates a driver for `category` that starts at offset 0
    pub fn new(source: S, category: impl Into<String>) -> Self {
        Self {
            source,
            category: category.into(),
            max_pages: None,
            state: CrawlState::initial(),
        }
    }

    /// Caps the number of page requests; `None` leaves the crawl unbounded
    pub fn with_max_pages(mut self, max_pages: Option<usize>) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// Current state of the crawl
    ///
    /// After a run stopped by the page ceiling this is still `Running` with
    /// the offset the next request would have used.
    pub fn state(&self) -> CrawlState {
        self.state
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Runs the crawl to completion
    ///
    /// # Flow
    ///
    /// 1. Write and flush the header row
    /// 2. While running: fetch the page at the cursor
    ///    - empty page → `Done`
    ///    - otherwise validate and write each candidate, flush, and move the
    ///      cursor forward by the number of candidates returned
    /// 3. Any fetch or write error → `Failed`, error returned
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlSummary)` - The crawl reached `Done` or the page ceiling
    /// * `Err(CellarError)` - The first fetch or output failure
    pub async fn run<K: RecordSink>(&mut self, sink: &mut K) -> Result<CrawlSummary, CellarError> {
        self.state = CrawlState::initial();
        let mut summary = CrawlSummary::new(&self.category);

        tracing::info!("Starting crawl of category '{}'", self.category);

        if let Err(e) = write_header(sink) {
            tracing::error!("Failed to write header: {}", e);
            self.state = self.state.after_failure();
            return Err(e.into());
        }

        while let Some(offset) = self.state.offset() {
            if let Some(limit) = self.max_pages {
                if summary.pages_fetched >= limit as u64 {
                    tracing::warn!("Reached page limit of {} at offset {}", limit, offset);
                    summary.stopped_by_limit = true;
                    break;
                }
            }

            tracing::info!("Offset {}", offset);

            let candidates = match self.source.fetch(&self.category, offset).await {
                Ok(candidates) => candidates,
                Err(e) => {
                    tracing::error!("Fetch failed at offset {}: {}", offset, e);
                    self.state = self.state.after_failure();
                    return Err(e);
                }
            };
            summary.pages_fetched += 1;

            let returned = candidates.len();
            if let Err(e) = emit_page(candidates, sink, &mut summary) {
                tracing::error!("Output failed at offset {}: {}", offset, e);
                self.state = self.state.after_failure();
                return Err(e.into());
            }

            self.state = self.state.after_page(returned);
            summary.final_offset = offset + returned;
        }

        summary.finish();
        if self.state.is_terminal() {
            tracing::debug!("Crawl ended in state {}", self.state);
        } else {
            tracing::debug!("Crawl stopped early in state {}", self.state);
        }
        Ok(summary)
    }
}

fn write_header<K: RecordSink>(sink: &mut K) -> OutputResult<()> {
    sink.write_header()?;
    sink.flush()
}

/// Validates one page of candidates, writes the accepted ones in order and
/// flushes the sink
fn emit_page<K: RecordSink>(
    candidates: Vec<CandidateRecord>,
    sink: &mut K,
    summary: &mut CrawlSummary,
) -> OutputResult<()> {
    let returned = candidates.len() as u64;
    let mut accepted = 0u64;

    for candidate in candidates {
        match candidate.accept() {
            Ok(record) => {
                sink.write_record(&record)?;
                accepted += 1;
            }
            Err((record, reason)) => {
                tracing::debug!(
                    "Skipping '{}' ({:?}): price={:?} score={:?}",
                    record.name(),
                    reason,
                    record.price(),
                    record.score()
                );
            }
        }
    }

    sink.flush()?;

    summary.candidates_seen += returned;
    summary.records_accepted += accepted;
    summary.records_rejected += returned - accepted;

    if returned > 0 {
        tracing::info!("Page returned {} candidates, {} accepted", returned, accepted);
    }

    Ok(())
}
