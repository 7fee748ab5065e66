//! Simulation observer trait for progress reporting and data collection.

use et_agent::{Folk, Status, StatusTally};
use et_output::RunMetadata;

/// Callbacks invoked by [`Simulation::run_with`][crate::Simulation::run_with]
/// at key points of the day loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example: prevalence tracker
///
/// ```rust,ignore
/// struct PeakInfected { peak: u32 }
///
/// impl<T> SimObserver<SeirStatus, T> for PeakInfected {
///     fn on_day_end(&mut self, _day: u32, tally: &StatusTally<SeirStatus>) {
///         self.peak = self.peak.max(tally.count(SeirStatus::I));
///     }
/// }
/// ```
pub trait SimObserver<S: Status, T> {
    /// Called once before the initial state is recorded.
    fn on_run_start(&mut self, _metadata: &RunMetadata) {}

    /// Called after every event, and once for the initial state (timestep 0,
    /// no event).  `folks` includes the dead.
    fn on_event_end(&mut self, _tally: &StatusTally<S>, _folks: &[Folk<S, T>]) {}

    /// Called after `end_day` and the population update of `day`.
    fn on_day_end(&mut self, _day: u32, _tally: &StatusTally<S>) {}

    /// Called once after the last recorded day.  `early` is `true` when the
    /// infected statuses died out before the configured horizon.
    fn on_run_end(&mut self, _last_day: u32, _early: bool) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl<S: Status, T> SimObserver<S, T> for NoopObserver {}
