//! Run metadata written alongside the result tables.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::OutputResult;

/// Everything needed to interpret (and reproduce) a run's tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunMetadata {
    pub simulation: SimulationMetadata,
    pub town:       TownSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationMetadata {
    /// `false` when the generator was drawn from OS entropy.
    pub seeded:           bool,
    pub seed:             Option<u64>,
    pub model:            String,
    /// Status vocabulary, in status-summary column order.
    pub all_statuses:     Vec<String>,
    pub model_parameters: serde_json::Value,
    pub num_locations:    usize,
    pub max_timesteps:    u32,
    pub population:       usize,
    pub step_events:      Vec<StepEventMetadata>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepEventMetadata {
    pub name:                 String,
    pub max_distance:         f64,
    pub place_types:          Vec<String>,
    pub event_type:           String,
    pub action:               String,
    /// Destination probability function name, if any.
    pub probability_function: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TownSection {
    /// `[lat, lon]` of the town center.
    pub origin_point:        [f32; 2],
    /// Town radius in metres.
    pub dist:                f64,
    pub epsg_code:           u32,
    pub accommodation_nodes: Vec<u32>,
}

impl RunMetadata {
    pub fn status_count(&self) -> usize {
        self.simulation.all_statuses.len()
    }

    pub fn to_json(&self) -> OutputResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write pretty-printed JSON to `path`.
    pub fn write_json(&self, path: &Path) -> OutputResult<()> {
        let file = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    pub fn read_json(path: &Path) -> OutputResult<Self> {
        let file = File::open(path)?;
        Ok(serde_json::from_reader(std::io::BufReader::new(file))?)
    }
}
