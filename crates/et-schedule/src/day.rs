//! The ordered event list of one simulated day.

use std::collections::HashSet;

use et_core::{ConfigError, ConfigResult};

use crate::{StepEvent, END_DAY};

/// User step events followed by the implicit `end_day`.
#[derive(Clone, Debug)]
pub struct DaySchedule {
    events: Vec<StepEvent>,
}

impl DaySchedule {
    /// Append `end_day` to `events`.
    ///
    /// Event names label output rows, so they must be unique, and `end_day`
    /// itself is reserved.  An empty list is valid: every day is just
    /// `end_day`.
    pub fn new(events: Vec<StepEvent>) -> ConfigResult<Self> {
        let mut seen = HashSet::new();
        for e in &events {
            if e.name() == END_DAY {
                return Err(ConfigError::ReservedEventName);
            }
            if !seen.insert(e.name()) {
                return Err(ConfigError::DuplicateEvent { name: e.name().to_owned() });
            }
        }
        let mut events = events;
        events.push(StepEvent::end_day());
        Ok(Self { events })
    }

    /// Every event of the day, `end_day` last.
    pub fn events(&self) -> &[StepEvent] {
        &self.events
    }

    /// The events the user configured.
    pub fn user_events(&self) -> &[StepEvent] {
        &self.events[..self.events.len() - 1]
    }

    pub fn end_day(&self) -> &StepEvent {
        &self.events[self.events.len() - 1]
    }

    /// Number of events including `end_day`.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Never true: `end_day` is always present.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn iter(&self) -> impl Iterator<Item = &StepEvent> {
        self.events.iter()
    }
}
