//! `SimOutputObserver<W>`: bridges `SimObserver` to an `OutputWriter`.

use et_agent::{Folk, Status, StatusTally};
use et_output::{IndividualLogRow, OutputError, OutputResult, OutputWriter, RunMetadata, StatusSummaryRow};

use crate::SimObserver;

/// A [`SimObserver`] that writes the status summary and individual logs to
/// any [`OutputWriter`] backend (CSV, SQLite, Parquet, …).
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After the run returns, check for errors with
/// [`take_error`][Self::take_error].  Once a write has failed, later rows are
/// dropped but `finish` is still attempted.
pub struct SimOutputObserver<W: OutputWriter> {
    writer:     W,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, last_error: None }
    }

    /// Take the stored write error (if any) after the run returns.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the run).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

/// Summary row for one tally.
pub fn status_row<S: Status>(tally: &StatusTally<S>) -> StatusSummaryRow {
    StatusSummaryRow {
        timestep:      tally.timestep,
        current_event: tally.event_label().to_owned(),
        counts:        tally.counts().to_vec(),
    }
}

/// One log row per folk, tagged with the tally's timestep and event.
pub fn log_rows<S: Status, T>(tally: &StatusTally<S>, folks: &[Folk<S, T>]) -> Vec<IndividualLogRow> {
    let event = tally.event_label();
    folks
        .iter()
        .map(|f| IndividualLogRow {
            timestep:    tally.timestep,
            event:       event.to_owned(),
            agent_id:    f.id.0,
            status:      f.status.name().to_owned(),
            location_id: f.location.0,
        })
        .collect()
}

impl<S: Status, T, W: OutputWriter> SimObserver<S, T> for SimOutputObserver<W> {
    fn on_run_start(&mut self, metadata: &RunMetadata) {
        let result = self.writer.begin(metadata);
        self.store_err(result);
    }

    fn on_event_end(&mut self, tally: &StatusTally<S>, folks: &[Folk<S, T>]) {
        if self.last_error.is_some() {
            return;
        }
        let result = self.writer.write_status_rows(&[status_row(tally)]);
        self.store_err(result);
        let result = self.writer.write_individual_logs(&log_rows(tally, folks));
        self.store_err(result);
    }

    fn on_run_end(&mut self, _last_day: u32, _early: bool) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
