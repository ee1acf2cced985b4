/// Crawl state definitions for the pagination loop
///
/// The driver starts in `Running { offset: 0 }` and ends in either `Done` or
/// `Failed`. Both end states are terminal.
use std::fmt;

/// Represents where a crawl is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrawlState {
    // ===== Active State =====
    /// The next page will be requested at `offset`
    Running { offset: usize },

    // ===== Terminal States =====
    /// A page came back empty; the catalog is exhausted
    Done,

    /// A fetch or write failed; the crawl was aborted
    Failed,
}

impl CrawlState {
    /// The state every crawl starts in
    pub fn initial() -> Self {
        Self::Running { offset: 0 }
    }

    /// Returns true if no further pages will be requested
    pub fn is_terminal(&self) -> bool {
        !self.is_running()
    }

    /// Returns true while pages are still being requested
    pub fn is_running(&self) -> bool {
        matches!(self, Self::Running { .. })
    }

    /// Returns the cursor for the next request, if the crawl is still running
    pub fn offset(&self) -> Option<usize> {
        match self {
            Self::Running { offset } => Some(*offset),
            _ => None,
        }
    }

    /// Applies a successful page of `returned` candidates
    ///
    /// An empty page ends the crawl. Otherwise the cursor moves forward by
    /// the number of candidates the server returned, whether or not they are
    /// later accepted. Terminal states are left unchanged.
    pub fn after_page(self, returned: usize) -> Self {
        match self {
            Self::Running { .. } if returned == 0 => Self::Done,
            Self::Running { offset } => Self::Running {
                offset: offset + returned,
            },
            terminal => terminal,
        }
    }

    /// Applies a failed fetch or write
    pub fn after_failure(self) -> Self {
        match self {
            Self::Running { .. } => Self::Failed,
            terminal => terminal,
        }
    }

    /// Short label used in log lines
    pub fn label(&self) -> &'static str {
        match self {
            Self::Running { .. } => "running",
            Self::Done => "done",
            Self::Failed => "failed",
        }
    }
}

impl Default for CrawlState {
    fn default() -> Self {
        Self::initial()
    }
}

impl fmt::Display for CrawlState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Running { offset } => write!(f, "running(offset={})", offset),
            other => write!(f, "{}", other.label()),
        }
    }
}
