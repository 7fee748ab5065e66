//! SQLite output backend (feature `sqlite`).
//!
//! Creates `output.db` in the output directory with three tables:
//! `metadata` (one JSON document per section), `status_summary` (one
//! integer column per status), and `individual_logs`.

use std::fs;
use std::path::Path;

use rusqlite::Connection;

use crate::writer::OutputWriter;
use crate::{IndividualLogRow, OutputError, OutputResult, RunMetadata, StatusSummaryRow};

/// Writes run output to an SQLite database.
pub struct SqliteWriter {
    conn:       Connection,
    insert_sql: Option<String>,
    statuses:   usize,
    finished:   bool,
}

/// Double-quote an SQL identifier.
fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

impl SqliteWriter {
    /// Open (or create) `output.db` in `dir` and initialise the fixed tables.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        fs::create_dir_all(dir)?;
        let conn = Connection::open(dir.join("output.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS metadata (
                 section TEXT PRIMARY KEY,
                 json    TEXT NOT NULL
             );
             CREATE TABLE IF NOT EXISTS individual_logs (
                 timestep    INTEGER NOT NULL,
                 event       TEXT    NOT NULL,
                 agent_id    INTEGER NOT NULL,
                 status      TEXT    NOT NULL,
                 location_id INTEGER NOT NULL
             );",
        )?;

        Ok(Self { conn, insert_sql: None, statuses: 0, finished: false })
    }
}

impl OutputWriter for SqliteWriter {
    fn begin(&mut self, metadata: &RunMetadata) -> OutputResult<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO metadata (section, json) VALUES ('simulation', ?1)",
            [serde_json::to_string(&metadata.simulation)?],
        )?;
        self.conn.execute(
            "INSERT OR REPLACE INTO metadata (section, json) VALUES ('town', ?1)",
            [serde_json::to_string(&metadata.town)?],
        )?;

        let columns: Vec<String> = metadata.simulation.all_statuses.iter().map(|s| quote_ident(s)).collect();
        let mut create = String::from(
            "DROP TABLE IF EXISTS status_summary;
             CREATE TABLE status_summary (
                 timestep      INTEGER NOT NULL,
                 current_event TEXT    NOT NULL",
        );
        for c in &columns {
            create.push_str(&format!(",\n                 {c} INTEGER NOT NULL"));
        }
        create.push_str("\n             );");
        self.conn.execute_batch(&create)?;

        let placeholders: Vec<String> = (1..=columns.len() + 2).map(|i| format!("?{i}")).collect();
        self.insert_sql = Some(format!(
            "INSERT INTO status_summary (timestep, current_event{}{}) VALUES ({})",
            if columns.is_empty() { "" } else { ", " },
            columns.join(", "),
            placeholders.join(", "),
        ));
        self.statuses = columns.len();
        Ok(())
    }

    fn write_status_rows(&mut self, rows: &[StatusSummaryRow]) -> OutputResult<()> {
        let sql = self.insert_sql.as_deref().ok_or(OutputError::NotStarted)?;
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(sql)?;
            for row in rows {
                if row.counts.len() != self.statuses {
                    return Err(OutputError::ColumnMismatch { expected: self.statuses, got: row.counts.len() });
                }
                let mut values: Vec<rusqlite::types::Value> = Vec::with_capacity(row.counts.len() + 2);
                values.push((row.timestep as i64).into());
                values.push(row.current_event.clone().into());
                values.extend(row.counts.iter().map(|&c| rusqlite::types::Value::from(c as i64)));
                stmt.execute(rusqlite::params_from_iter(values))?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_individual_logs(&mut self, rows: &[IndividualLogRow]) -> OutputResult<()> {
        if self.insert_sql.is_none() {
            return Err(OutputError::NotStarted);
        }
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO individual_logs \
                 (timestep, event, agent_id, status, location_id) \
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    row.timestep,
                    row.event,
                    row.agent_id,
                    row.status,
                    row.location_id,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn
            .execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
