//! Plain data row types written by output backends.

use serde::{Deserialize, Serialize};

/// Status counts after one event.
///
/// `counts` follows the run's status vocabulary order.  The initial state is
/// recorded at timestep 0 with an empty event name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusSummaryRow {
    pub timestep:      u32,
    pub current_event: String,
    pub counts:        Vec<u32>,
}

impl StatusSummaryRow {
    pub fn total(&self) -> u64 {
        self.counts.iter().map(|&c| c as u64).sum()
    }
}

/// One folk's state after one event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndividualLogRow {
    pub timestep:    u32,
    pub event:       String,
    pub agent_id:    u32,
    pub status:      String,
    pub location_id: u32,
}
