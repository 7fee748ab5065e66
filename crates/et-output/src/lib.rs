//! `et-output`: what a finished run leaves on disk.
//!
//! Every run produces three things: run metadata, one status-summary row
//! per (timestep, event), and one individual-log row per (timestep, event,
//! folk).  Three backends are provided behind Cargo features:
//!
//! | Feature   | Backend  | Files created                                                       |
//! |-----------|----------|---------------------------------------------------------------------|
//! | *(none)*  | CSV      | `metadata.json`, `status_summary.csv`, `individual_logs.csv`        |
//! | `sqlite`  | SQLite   | `output.db` (`metadata`, `status_summary`, `individual_logs`)       |
//! | `parquet` | Parquet  | `metadata.json`, `status_summary.parquet`, `individual_logs.parquet`|
//!
//! All backends implement [`OutputWriter`].  The simulation drives a writer
//! through its observer bridge; this crate knows nothing about the engine.
//!
//! # Usage
//!
//! ```rust,ignore
//! use et_output::{CsvWriter, OutputWriter};
//!
//! let mut writer = CsvWriter::new(Path::new("./run-01"))?;
//! writer.begin(&metadata)?;
//! writer.write_status_rows(&rows)?;
//! writer.finish()?;
//! ```
//!
//! The status-summary table has one integer column per status, in the
//! model's vocabulary order (`RunMetadata::simulation.all_statuses`), so a
//! writer learns its columns in [`OutputWriter::begin`].

pub mod csv;
pub mod error;
pub mod metadata;
pub mod row;
pub mod writer;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(feature = "parquet")]
pub mod parquet;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use metadata::{RunMetadata, SimulationMetadata, StepEventMetadata, TownSection};
pub use row::{IndividualLogRow, StatusSummaryRow};
pub use writer::OutputWriter;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteWriter;

#[cfg(feature = "parquet")]
pub use parquet::ParquetWriter;
