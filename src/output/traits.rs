//! Output sink trait
//!
//! The crawl driver writes through this trait so the destination (stdout,
//! a file, an in-memory buffer) is chosen by the caller.

use crate::record::AcceptedRecord;
use crate::OutputResult;

/// Trait for record sinks
///
/// A sink receives the header once, then accepted records in crawl order.
/// The driver calls `flush` after every page so progress is visible at page
/// granularity.
pub trait RecordSink {
    /// Writes the header row
    fn write_header(&mut self) -> OutputResult<()>;

    /// Writes one accepted record
    ///
    /// # Arguments
    ///
    /// * `record` - The record to append
    fn write_record(&mut self, record: &AcceptedRecord) -> OutputResult<()>;

    /// Pushes everything written so far to the underlying destination
    fn flush(&mut self) -> OutputResult<()>;
}
