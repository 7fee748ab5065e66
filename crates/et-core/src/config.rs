//! Run configuration.
//!
//! A run is a fixed number of whole days ("timesteps").  Each timestep walks
//! the model's day schedule once; there is no finer clock.

/// Seed used when the caller asks for a seeded run without naming a value.
pub const DEFAULT_SEED: u64 = 5710;

/// Top-level simulation configuration.
///
/// Typically deserialized by the application and handed to `SimBuilder`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Maximum number of days to simulate.  The run may stop earlier when
    /// the model's infected statuses die out.
    pub timesteps: u32,

    /// Master RNG seed.  `None` draws the generator from OS entropy and the
    /// run is not reproducible.
    pub seed: Option<u64>,
}

impl SimConfig {
    pub fn new(timesteps: u32) -> Self {
        Self { timesteps, ..Self::default() }
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    #[inline]
    pub fn is_seeded(&self) -> bool {
        self.seed.is_some()
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self { timesteps: 100, seed: Some(DEFAULT_SEED) }
    }
}
