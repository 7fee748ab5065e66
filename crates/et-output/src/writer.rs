//! The `OutputWriter` trait implemented by all backend writers.

use crate::{IndividualLogRow, OutputResult, RunMetadata, StatusSummaryRow};

/// Trait implemented by CSV, SQLite, and Parquet writers.
///
/// Call order: `begin` once, then any number of row batches, then `finish`.
pub trait OutputWriter {
    /// Record the run metadata and set up the status-summary columns.
    fn begin(&mut self, metadata: &RunMetadata) -> OutputResult<()>;

    /// Write a batch of status-summary rows.
    fn write_status_rows(&mut self, rows: &[StatusSummaryRow]) -> OutputResult<()>;

    /// Write a batch of individual-log rows.
    fn write_individual_logs(&mut self, rows: &[IndividualLogRow]) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}
