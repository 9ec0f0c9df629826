//! CSV loading of latency samples
//!
//! Reads a CSV file with a header row, picks out the latency column
//! (`latency_ns` unless configured otherwise), and keeps its values in
//! file order. Values are held as nanoseconds and converted to
//! milliseconds on demand.
//!
//! Empty cells and the usual missing-value markers (`NA`, `N/A`, `null`,
//! `NaN`, ...) are skipped and counted rather than treated as errors.

use crate::{LATENCY_COLUMN, NS_PER_MS};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Cell contents read as a missing value, as in common dataframe readers
const MISSING_MARKERS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

fn is_missing(raw: &str) -> bool {
    MISSING_MARKERS.contains(&raw)
}

/// Errors that can occur while loading latency samples
#[derive(Error, Debug)]
pub enum SamplesError {
    #[error("Failed to open {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Column `{column}` not found (columns: {})", .available.join(", "))]
    MissingColumn {
        column: String,
        available: Vec<String>,
    },

    #[error("Line {line}: `{value}` in column `{column}` is not a number")]
    InvalidValue {
        line: u64,
        column: String,
        value: String,
    },
}

impl SamplesError {
    /// Whether the error means the input file does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            SamplesError::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound
        )
    }
}

/// Latency values loaded from one column of a CSV file
#[derive(Debug, Clone, Default)]
pub struct LatencySamples {
    /// Column the values were read from
    column: String,
    /// Values in nanoseconds, in file order
    nanos: Vec<f64>,
    /// Rows whose cell was empty or a missing-value marker
    missing: usize,
}

impl LatencySamples {
    /// Wrap already-measured nanosecond values
    pub fn from_nanos(nanos: Vec<f64>) -> Self {
        Self {
            column: LATENCY_COLUMN.to_string(),
            nanos,
            missing: 0,
        }
    }

    /// Load the `latency_ns` column from a CSV file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SamplesError> {
        Self::from_path_with_column(path, LATENCY_COLUMN)
    }

    /// Load a named column from a CSV file
    ///
    /// # Arguments
    /// * `path` - CSV file with a header row
    /// * `column` - Header name of the nanosecond column
    pub fn from_path_with_column(
        path: impl AsRef<Path>,
        column: &str,
    ) -> Result<Self, SamplesError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| SamplesError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let samples = Self::from_reader(file, column)?;
        tracing::info!(
            path = %path.display(),
            column = column,
            rows = samples.len(),
            missing = samples.missing,
            "samples_loaded"
        );
        Ok(samples)
    }

    /// Load a named column from any CSV source
    pub fn from_reader<R: Read>(reader: R, column: &str) -> Result<Self, SamplesError> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = rdr.headers()?;
        let index = headers.iter().position(|h| h == column).ok_or_else(|| {
            SamplesError::MissingColumn {
                column: column.to_string(),
                available: headers.iter().map(str::to_string).collect(),
            }
        })?;

        let mut nanos = Vec::new();
        let mut missing = 0;

        for record in rdr.records() {
            let record = record?;
            let raw = record.get(index).unwrap_or("");

            if is_missing(raw) {
                missing += 1;
                continue;
            }

            match raw.parse::<f64>() {
                Ok(value) => nanos.push(value),
                Err(_) => {
                    return Err(SamplesError::InvalidValue {
                        line: record.position().map(|p| p.line()).unwrap_or(0),
                        column: column.to_string(),
                        value: raw.to_string(),
                    });
                }
            }
        }

        if missing > 0 {
            tracing::warn!(column = column, missing = missing, "missing cells skipped");
        }

        Ok(Self {
            column: column.to_string(),
            nanos,
            missing,
        })
    }

    /// Column the values were read from
    pub fn column(&self) -> &str {
        &self.column
    }

    /// Raw values in nanoseconds
    pub fn nanos(&self) -> &[f64] {
        &self.nanos
    }

    /// Number of rows skipped because the cell was empty or marked missing
    pub fn missing(&self) -> usize {
        self.missing
    }

    /// Number of loaded values
    pub fn len(&self) -> usize {
        self.nanos.len()
    }

    /// Check if no values were loaded
    pub fn is_empty(&self) -> bool {
        self.nanos.is_empty()
    }

    /// Values converted to milliseconds, one per loaded row
    pub fn to_millis(&self) -> Vec<f64> {
        self.nanos.iter().map(|ns| ns / NS_PER_MS).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load(csv: &str) -> Result<LatencySamples, SamplesError> {
        LatencySamples::from_reader(csv.as_bytes(), LATENCY_COLUMN)
    }

    #[test]
    fn test_converts_to_millis() {
        let samples = load("index,latency_ns\n0,1000000\n1,2000000\n2,5000000\n").unwrap();

        assert_eq!(samples.len(), 3);
        assert_eq!(samples.to_millis(), vec![1.0, 2.0, 5.0]);
    }

    #[test]
    fn test_one_value_per_row() {
        let mut csv = String::from("index,latency_ns\n");
        for i in 0..500i64 {
            csv.push_str(&format!("{},{}\n", i, i * 1234 - 40_000));
        }

        let samples = load(&csv).unwrap();
        let millis = samples.to_millis();

        assert_eq!(millis.len(), 500);
        for (i, ms) in millis.iter().enumerate() {
            let ns = (i as f64) * 1234.0 - 40_000.0;
            assert_eq!(*ms, ns / 1_000_000.0);
        }
    }

    #[test]
    fn test_column_order_does_not_matter() {
        let samples = load("latency_ns,index\n-250000,0\n750000,1\n").unwrap();
        assert_eq!(samples.to_millis(), vec![-0.25, 0.75]);
    }

    #[test]
    fn test_decimal_and_padded_values() {
        let samples = load("index, latency_ns\n0, 1500000.0 \n1,2.5e6\n").unwrap();
        assert_eq!(samples.to_millis(), vec![1.5, 2.5]);
    }

    #[test]
    fn test_custom_column() {
        let samples =
            LatencySamples::from_reader("wake_ns\n3000000\n".as_bytes(), "wake_ns").unwrap();
        assert_eq!(samples.column(), "wake_ns");
        assert_eq!(samples.to_millis(), vec![3.0]);
    }

    #[test]
    fn test_missing_column() {
        let err = load("index,period_us\n0,1000\n").unwrap_err();
        match err {
            SamplesError::MissingColumn { column, available } => {
                assert_eq!(column, "latency_ns");
                assert_eq!(available, vec!["index", "period_us"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_invalid_value_reports_line() {
        let err = load("index,latency_ns\n0,1000\n1,late\n").unwrap_err();
        match err {
            SamplesError::InvalidValue { line, value, .. } => {
                assert_eq!(line, 3);
                assert_eq!(value, "late");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_cells_are_skipped() {
        let samples = load("index,latency_ns\n0,1000000\n1,\n2,3000000\n").unwrap();
        assert_eq!(samples.len(), 2);
        assert_eq!(samples.missing(), 1);
        assert_eq!(samples.to_millis(), vec![1.0, 3.0]);
    }

    #[test]
    fn test_missing_markers_are_skipped() {
        let csv = "index,latency_ns\n0,1000000\n1,NA\n2,N/A\n3,#N/A\n4,null\n5,NULL\n\
                   6,None\n7,<NA>\n8,NaN\n9,2000000\n";
        let samples = load(csv).unwrap();

        assert_eq!(samples.missing(), 8);
        assert_eq!(samples.to_millis(), vec![1.0, 2.0]);
    }

    #[test]
    fn test_markers_are_case_sensitive() {
        // "na" is not a marker, so it is a bad value rather than a gap
        let err = load("index,latency_ns\n0,na\n").unwrap_err();
        assert!(matches!(err, SamplesError::InvalidValue { line: 2, .. }));
    }

    #[test]
    fn test_header_only() {
        let samples = load("index,latency_ns\n").unwrap();
        assert!(samples.is_empty());
        assert!(samples.to_millis().is_empty());
    }

    #[test]
    fn test_ragged_rows_are_malformed() {
        let err = load("index,latency_ns\n0,1000,extra\n").unwrap_err();
        assert!(matches!(err, SamplesError::Csv(_)));
    }

    #[test]
    fn test_nonexistent_file() {
        let err = LatencySamples::from_path("/nonexistent/latencies.csv").unwrap_err();
        assert!(err.is_not_found());
        assert!(err.to_string().contains("/nonexistent/latencies.csv"));
    }
}
