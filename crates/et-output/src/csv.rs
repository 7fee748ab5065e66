//! CSV output backend.
//!
//! Creates three files in the output directory:
//! - `metadata.json`
//! - `status_summary.csv` (`timestep,current_event,<status>...`)
//! - `individual_logs.csv` (`timestep,event,agent_id,status,location_id`)

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{IndividualLogRow, OutputError, OutputResult, RunMetadata, StatusSummaryRow};

pub const METADATA_FILE:        &str = "metadata.json";
pub const STATUS_SUMMARY_FILE:  &str = "status_summary.csv";
pub const INDIVIDUAL_LOGS_FILE: &str = "individual_logs.csv";

/// Writes run output to a directory of CSV files plus JSON metadata.
pub struct CsvWriter {
    dir:      PathBuf,
    summary:  Writer<File>,
    logs:     Writer<File>,
    /// Status columns, known after `begin`.
    statuses: Option<usize>,
    finished: bool,
}

impl CsvWriter {
    /// Create `dir` if needed and open both CSV files.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        fs::create_dir_all(dir)?;

        let summary = Writer::from_path(dir.join(STATUS_SUMMARY_FILE))?;

        let mut logs = Writer::from_path(dir.join(INDIVIDUAL_LOGS_FILE))?;
        logs.write_record(["timestep", "event", "agent_id", "status", "location_id"])?;

        Ok(Self {
            dir: dir.to_path_buf(),
            summary,
            logs,
            statuses: None,
            finished: false,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl OutputWriter for CsvWriter {
    fn begin(&mut self, metadata: &RunMetadata) -> OutputResult<()> {
        metadata.write_json(&self.dir.join(METADATA_FILE))?;

        let mut header = vec!["timestep", "current_event"];
        header.extend(metadata.simulation.all_statuses.iter().map(String::as_str));
        self.summary.write_record(&header)?;
        self.statuses = Some(metadata.status_count());
        Ok(())
    }

    fn write_status_rows(&mut self, rows: &[StatusSummaryRow]) -> OutputResult<()> {
        let expected = self.statuses.ok_or(OutputError::NotStarted)?;
        for row in rows {
            if row.counts.len() != expected {
                return Err(OutputError::ColumnMismatch { expected, got: row.counts.len() });
            }
            let mut record = Vec::with_capacity(expected + 2);
            record.push(row.timestep.to_string());
            record.push(row.current_event.clone());
            record.extend(row.counts.iter().map(u32::to_string));
            self.summary.write_record(&record)?;
        }
        Ok(())
    }

    fn write_individual_logs(&mut self, rows: &[IndividualLogRow]) -> OutputResult<()> {
        if self.statuses.is_none() {
            return Err(OutputError::NotStarted);
        }
        for row in rows {
            self.logs.write_record(&[
                row.timestep.to_string(),
                row.event.clone(),
                row.agent_id.to_string(),
                row.status.clone(),
                row.location_id.to_string(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.summary.flush()?;
        self.logs.flush()?;
        Ok(())
    }
}
