//! CSV output for measured wakeup latencies
//!
//! Writes one `index,latency_ns` row per wakeup, the same layout
//! [`LatencySamples`](super::reader::LatencySamples) reads back.

use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use super::reader::SamplesError;
use crate::LATENCY_COLUMN;

/// A single output row
#[derive(Debug, Clone, Copy, Serialize)]
struct LatencyRow {
    index: usize,
    latency_ns: i64,
}

/// Writer for `index,latency_ns` CSV files
pub struct LatencyCsvWriter<W: Write> {
    writer: csv::Writer<W>,
    rows: usize,
}

impl LatencyCsvWriter<File> {
    /// Create (or truncate) a CSV file at `path`
    pub fn create(path: impl AsRef<Path>) -> Result<Self, SamplesError> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| SamplesError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(file))
    }
}

impl<W: Write> LatencyCsvWriter<W> {
    /// Wrap any writer
    pub fn new(inner: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(inner),
            rows: 0,
        }
    }

    /// Append one latency value; the index is the running row count
    pub fn write(&mut self, latency_ns: i64) -> Result<(), SamplesError> {
        self.writer.serialize(LatencyRow {
            index: self.rows,
            latency_ns,
        })?;
        self.rows += 1;
        Ok(())
    }

    /// Append every value in order
    pub fn write_all(&mut self, latencies: &[i64]) -> Result<(), SamplesError> {
        for &latency in latencies {
            self.write(latency)?;
        }
        Ok(())
    }

    /// Number of rows written so far
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Flush buffered rows and return the inner writer
    ///
    /// The header is always present, even when no rows were written.
    pub fn finish(mut self) -> Result<W, SamplesError> {
        if self.rows == 0 {
            self.writer.write_record(["index", LATENCY_COLUMN])?;
        }
        self.writer
            .into_inner()
            .map_err(|e| SamplesError::Csv(csv::Error::from(e.into_error())))
    }
}
