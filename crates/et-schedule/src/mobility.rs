//! Destination probability functions.
//!
//! A [`MobilityFn`] turns the distances to a folk's candidate destinations
//! into selection weights.  The dispersal engine normalizes nothing itself:
//! it hands the returned weights to a weighted draw and falls back to a
//! uniform draw if they do not form a distribution.
//!
//! The two-argument signature (distances, folk) is fixed by the trait, so a
//! step event can never hold a function it cannot call.

use std::f64::consts::PI;

use et_agent::FolkView;
use et_core::{ConfigError, ConfigResult};

pub trait MobilityFn: Send + Sync {
    /// Label recorded in run metadata.
    fn name(&self) -> &str;

    /// One weight per entry of `distances` (metres).
    fn weights(&self, distances: &[f64], folk: &dyn FolkView) -> Vec<f64>;
}

/// Zero out negative or non-finite weights and scale to sum 1.  All-zero
/// input becomes uniform.
pub fn normalize(mut weights: Vec<f64>) -> Vec<f64> {
    for w in weights.iter_mut() {
        if !w.is_finite() || *w < 0.0 {
            *w = 0.0;
        }
    }
    let sum: f64 = weights.iter().sum();
    if sum > 0.0 {
        weights.iter_mut().for_each(|w| *w /= sum);
    } else if !weights.is_empty() {
        let u = 1.0 / weights.len() as f64;
        weights.iter_mut().for_each(|w| *w = u);
    }
    weights
}

// ── LogNormalMobility ─────────────────────────────────────────────────────────

/// Log-normal trip lengths: most trips near `median_distance`, a long tail
/// of far ones.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LogNormalMobility {
    pub median_distance: f64,
    pub sigma:           f64,
}

impl LogNormalMobility {
    pub fn new(median_distance: f64, sigma: f64) -> ConfigResult<Self> {
        if !(median_distance > 0.0 && median_distance.is_finite()) {
            return Err(ConfigError::invalid("median_distance", "must be positive"));
        }
        if !(sigma > 0.0 && sigma.is_finite()) {
            return Err(ConfigError::invalid("sigma", "must be positive"));
        }
        Ok(Self { median_distance, sigma })
    }
}

impl Default for LogNormalMobility {
    fn default() -> Self {
        Self { median_distance: 2_000.0, sigma: 1.0 }
    }
}

impl MobilityFn for LogNormalMobility {
    fn name(&self) -> &str {
        "log_normal_mobility"
    }

    fn weights(&self, distances: &[f64], _folk: &dyn FolkView) -> Vec<f64> {
        let mu = self.median_distance.ln();
        let norm = self.sigma * (2.0 * PI).sqrt();
        let pdf = distances
            .iter()
            .map(|&d| {
                let d = d.max(1e-6);
                let z = d.ln() - mu;
                (-(z * z) / (2.0 * self.sigma * self.sigma)).exp() / (d * norm)
            })
            .collect();
        normalize(pdf)
    }
}

// ── EnergyExponentialMobility ─────────────────────────────────────────────────

/// Exponential decay with distance, steeper for tired folks.
///
/// `rate = 2 - energy / max_energy`, so a rested folk decays at rate 1 per
/// `distance_scale` metres and an exhausted one at rate 2.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnergyExponentialMobility {
    pub distance_scale: f64,
}

impl EnergyExponentialMobility {
    pub fn new(distance_scale: f64) -> ConfigResult<Self> {
        if !(distance_scale > 0.0 && distance_scale.is_finite()) {
            return Err(ConfigError::invalid("distance_scale", "must be positive"));
        }
        Ok(Self { distance_scale })
    }
}

impl Default for EnergyExponentialMobility {
    fn default() -> Self {
        Self { distance_scale: 1_000.0 }
    }
}

impl MobilityFn for EnergyExponentialMobility {
    fn name(&self) -> &str {
        "energy_exponential_mobility"
    }

    fn weights(&self, distances: &[f64], folk: &dyn FolkView) -> Vec<f64> {
        let rate = 2.0 - folk.energy_fraction();
        let w = distances
            .iter()
            .map(|&d| rate * (-rate * d / self.distance_scale).exp())
            .collect();
        normalize(w)
    }
}

// ── CustomMobility ────────────────────────────────────────────────────────────

/// Wrap a closure as a named [`MobilityFn`].
///
/// ```
/// use et_schedule::{CustomMobility, MobilityFn};
///
/// let nearest_first = CustomMobility::new("inverse_distance", |d: &[f64], _folk: &dyn et_agent::FolkView| {
///     d.iter().map(|x| 1.0 / (1.0 + x)).collect()
/// });
/// assert_eq!(nearest_first.name(), "inverse_distance");
/// ```
pub struct CustomMobility<F> {
    name: String,
    f:    F,
}

impl<F> CustomMobility<F>
where
    F: Fn(&[f64], &dyn FolkView) -> Vec<f64> + Send + Sync,
{
    pub fn new(name: impl Into<String>, f: F) -> Self {
        Self { name: name.into(), f }
    }
}

impl<F> MobilityFn for CustomMobility<F>
where
    F: Fn(&[f64], &dyn FolkView) -> Vec<f64> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn weights(&self, distances: &[f64], folk: &dyn FolkView) -> Vec<f64> {
        (self.f)(distances, folk)
    }
}
