//! Parquet output backend (feature `parquet`).
//!
//! Creates three files in the output directory:
//! - `metadata.json`
//! - `status_summary.parquet`
//! - `individual_logs.parquet`

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use arrow::array::{ArrayRef, StringBuilder, UInt32Builder};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;

use crate::csv::METADATA_FILE;
use crate::writer::OutputWriter;
use crate::{IndividualLogRow, OutputError, OutputResult, RunMetadata, StatusSummaryRow};

fn summary_schema(statuses: &[String]) -> Arc<Schema> {
    let mut fields = vec![
        Field::new("timestep",      DataType::UInt32, false),
        Field::new("current_event", DataType::Utf8,   false),
    ];
    fields.extend(statuses.iter().map(|s| Field::new(s.as_str(), DataType::UInt32, false)));
    Arc::new(Schema::new(fields))
}

fn log_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("timestep",    DataType::UInt32, false),
        Field::new("event",       DataType::Utf8,   false),
        Field::new("agent_id",    DataType::UInt32, false),
        Field::new("status",      DataType::Utf8,   false),
        Field::new("location_id", DataType::UInt32, false),
    ]))
}

fn snappy_props() -> WriterProperties {
    WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build()
}

/// Writes run output to two Parquet files plus JSON metadata.
///
/// `finish()` **must** be called to write the Parquet file footers; files
/// written without calling `finish()` cannot be opened by Parquet readers.
pub struct ParquetWriter {
    dir:         PathBuf,
    summary:     Option<ArrowWriter<File>>,
    logs:        Option<ArrowWriter<File>>,
    summ_schema: Option<Arc<Schema>>,
    log_schema:  Arc<Schema>,
}

impl ParquetWriter {
    /// Create `dir` if needed and open the individual-log file.  The summary
    /// file is created in `begin`, once its columns are known.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        fs::create_dir_all(dir)?;
        let log_schema = log_schema();
        let log_file = File::create(dir.join("individual_logs.parquet"))?;
        let logs = ArrowWriter::try_new(log_file, Arc::clone(&log_schema), Some(snappy_props()))?;

        Ok(Self {
            dir: dir.to_path_buf(),
            summary: None,
            logs: Some(logs),
            summ_schema: None,
            log_schema,
        })
    }
}

impl OutputWriter for ParquetWriter {
    fn begin(&mut self, metadata: &RunMetadata) -> OutputResult<()> {
        metadata.write_json(&self.dir.join(METADATA_FILE))?;

        let schema = summary_schema(&metadata.simulation.all_statuses);
        let file = File::create(self.dir.join("status_summary.parquet"))?;
        self.summary = Some(ArrowWriter::try_new(file, Arc::clone(&schema), Some(snappy_props()))?);
        self.summ_schema = Some(schema);
        Ok(())
    }

    fn write_status_rows(&mut self, rows: &[StatusSummaryRow]) -> OutputResult<()> {
        let (Some(writer), Some(schema)) = (self.summary.as_mut(), self.summ_schema.as_ref()) else {
            return Err(OutputError::NotStarted);
        };
        if rows.is_empty() {
            return Ok(());
        }
        let statuses = schema.fields().len() - 2;

        let mut timesteps = UInt32Builder::new();
        let mut events    = StringBuilder::new();
        let mut counts: Vec<UInt32Builder> = (0..statuses).map(|_| UInt32Builder::new()).collect();

        for row in rows {
            if row.counts.len() != statuses {
                return Err(OutputError::ColumnMismatch { expected: statuses, got: row.counts.len() });
            }
            timesteps.append_value(row.timestep);
            events.append_value(&row.current_event);
            for (col, &c) in counts.iter_mut().zip(&row.counts) {
                col.append_value(c);
            }
        }

        let mut columns: Vec<ArrayRef> = vec![Arc::new(timesteps.finish()), Arc::new(events.finish())];
        columns.extend(counts.iter_mut().map(|c| Arc::new(c.finish()) as ArrayRef));

        let batch = RecordBatch::try_new(Arc::clone(schema), columns)?;
        writer.write(&batch)?;
        Ok(())
    }

    fn write_individual_logs(&mut self, rows: &[IndividualLogRow]) -> OutputResult<()> {
        if self.summ_schema.is_none() {
            return Err(OutputError::NotStarted);
        }
        if rows.is_empty() {
            return Ok(());
        }
        let Some(writer) = self.logs.as_mut() else {
            return Ok(());
        };

        let mut timesteps = UInt32Builder::new();
        let mut events    = StringBuilder::new();
        let mut agents    = UInt32Builder::new();
        let mut statuses  = StringBuilder::new();
        let mut locations = UInt32Builder::new();

        for row in rows {
            timesteps.append_value(row.timestep);
            events.append_value(&row.event);
            agents.append_value(row.agent_id);
            statuses.append_value(&row.status);
            locations.append_value(row.location_id);
        }

        let batch = RecordBatch::try_new(
            Arc::clone(&self.log_schema),
            vec![
                Arc::new(timesteps.finish()),
                Arc::new(events.finish()),
                Arc::new(agents.finish()),
                Arc::new(statuses.finish()),
                Arc::new(locations.finish()),
            ],
        )?;
        writer.write(&batch)?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if let Some(w) = self.summary.take() {
            w.close()?;
        }
        if let Some(w) = self.logs.take() {
            w.close()?;
        }
        Ok(())
    }
}
