//! CSV day-schedule loader.
//!
//! # CSV format
//!
//! One row per user step event, in day order.  `end_day` is appended
//! automatically and must not appear in the file.
//!
//! ```csv
//! name,event_type,max_distance,place_types,mobility,action
//! greet_neighbors,DISPERSE,1000,accommodation,,
//! chore,DISPERSE,19000,commercial;workplace;education;religious,log_normal,
//! family_time,SEND_HOME,0,,,interact
//! ```
//!
//! | Column         | Meaning                                                  |
//! |----------------|----------------------------------------------------------|
//! | `event_type`   | `DISPERSE` or `SEND_HOME` (case-insensitive)             |
//! | `max_distance` | metres                                                   |
//! | `place_types`  | `;`-separated place-type labels, may be empty            |
//! | `mobility`     | empty, `log_normal`, or `energy_exponential` (defaults)  |
//! | `action`       | optional; `interact` or `sleep`, defaults by event type  |

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use et_core::PlaceType;

use crate::event::{EventType, FolkAction, StepEvent};
use crate::mobility::{EnergyExponentialMobility, LogNormalMobility};
use crate::{DaySchedule, ScheduleError, ScheduleResult};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct StepEventRecord {
    name:         String,
    event_type:   String,
    max_distance: f64,
    #[serde(default)]
    place_types:  String,
    #[serde(default)]
    mobility:     String,
    #[serde(default)]
    action:       String,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a [`DaySchedule`] from a CSV file.
pub fn load_schedule_csv(path: &Path) -> ScheduleResult<DaySchedule> {
    let file = std::fs::File::open(path)
        .map_err(ScheduleError::Io)?;
    load_schedule_reader(file)
}

/// Like [`load_schedule_csv`] but accepts any `Read` source.
pub fn load_schedule_reader<R: Read>(reader: R) -> ScheduleResult<DaySchedule> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut events = Vec::new();

    for result in csv_reader.deserialize::<StepEventRecord>() {
        let row = result.map_err(|e| ScheduleError::Parse(e.to_string()))?;
        events.push(parse_event(row)?);
    }

    Ok(DaySchedule::new(events)?)
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn parse_event(row: StepEventRecord) -> ScheduleResult<StepEvent> {
    let event_type: EventType = row.event_type.parse().map_err(ScheduleError::Parse)?;

    let action = match row.action.trim() {
        "" => match event_type {
            EventType::Disperse => FolkAction::Interact,
            EventType::SendHome => FolkAction::Sleep,
        },
        a => a.parse().map_err(ScheduleError::Parse)?,
    };

    let place_types = row
        .place_types
        .split(';')
        .filter(|s| !s.trim().is_empty())
        .map(str::parse::<PlaceType>)
        .collect::<Result<Vec<_>, _>>()?;

    let event = StepEvent::new(row.name, event_type, action, row.max_distance, place_types, None)?;

    let event = match row.mobility.trim() {
        "" => event,
        "log_normal" => event.with_mobility(LogNormalMobility::default())?,
        "energy_exponential" => event.with_mobility(EnergyExponentialMobility::default())?,
        other => {
            return Err(ScheduleError::Parse(format!(
                "unknown mobility {other:?}: expected log_normal or energy_exponential"
            )));
        }
    };

    Ok(event)
}
