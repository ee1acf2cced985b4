//! CSV record sink
//!
//! Writes accepted records as comma-separated rows using the `csv` crate.
//! Columns are fixed: price, score, name, link.

use crate::output::traits::RecordSink;
use crate::record::{AcceptedRecord, CSV_HEADER};
use crate::{OutputError, OutputResult};
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

/// A [`RecordSink`] that writes CSV to any `io::Write`
pub struct CsvSink<W: Write> {
    writer: csv::Writer<W>,
    rows_written: u64,
}

impl<W: Write> CsvSink<W> {
    /// Wraps a writer
    pub fn new(inner: W) -> Self {
        Self {
            writer: csv::WriterBuilder::new().has_headers(false).from_writer(inner),
            rows_written: 0,
        }
    }

    /// Number of record rows written, not counting the header
    pub fn rows_written(&self) -> u64 {
        self.rows_written
    }

    /// Flushes and returns the underlying writer
    pub fn into_inner(self) -> OutputResult<W> {
        self.writer
            .into_inner()
            .map_err(|e| OutputError::Io(e.into_error()))
    }
}

impl CsvSink<Box<dyn Write>> {
    /// Opens the configured destination: a file when `path` is given,
    /// stdout otherwise
    pub fn open(path: Option<&Path>) -> OutputResult<Self> {
        let inner: Box<dyn Write> = match path {
            Some(path) => {
                tracing::info!("Writing CSV to {}", path.display());
                Box::new(File::create(path)?)
            }
            None => Box::new(io::stdout()),
        };
        Ok(Self::new(inner))
    }
}

impl<W: Write> RecordSink for CsvSink<W> {
    fn write_header(&mut self) -> OutputResult<()> {
        self.writer.write_record(CSV_HEADER)?;
        Ok(())
    }

    fn write_record(&mut self, record: &AcceptedRecord) -> OutputResult<()> {
        self.writer.write_record(record.columns())?;
        self.rows_written += 1;
        Ok(())
    }

    fn flush(&mut self) -> OutputResult<()> {
        self.writer.flush()?;
        Ok(())
    }
}
