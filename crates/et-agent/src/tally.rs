//! Aggregate per-status counts.

use std::marker::PhantomData;

use crate::Status;

/// Per-status counts at one `(timestep, event)` point of a run.
///
/// The simulation keeps one tally per event: each is cloned from the
/// previous one, retagged, and then mutated only through
/// [`Folk::convert`](crate::Folk::convert) and population updates.
#[derive(Clone, Debug, PartialEq)]
pub struct StatusTally<S: Status> {
    pub timestep:      u32,
    /// `None` for the initial state recorded before the first event.
    pub current_event: Option<String>,
    counts:            Vec<u32>,
    _status:           PhantomData<S>,
}

impl<S: Status> StatusTally<S> {
    /// All counts zero, timestep 0, no event.
    pub fn new() -> Self {
        Self {
            timestep:      0,
            current_event: None,
            counts:        vec![0; S::ALL.len()],
            _status:       PhantomData,
        }
    }

    /// Count every status yielded by `statuses`.
    pub fn from_statuses(statuses: impl IntoIterator<Item = S>) -> Self {
        let mut tally = Self::new();
        for s in statuses {
            tally.increment(s);
        }
        tally
    }

    /// Clone of `self` tagged for the next event.
    pub fn next_event(&self, timestep: u32, event: &str) -> Self {
        Self {
            timestep,
            current_event: Some(event.to_owned()),
            counts: self.counts.clone(),
            _status: PhantomData,
        }
    }

    #[inline]
    pub fn count(&self, status: S) -> u32 {
        self.counts[status.index()]
    }

    #[inline]
    pub fn increment(&mut self, status: S) {
        self.counts[status.index()] += 1;
    }

    #[inline]
    pub fn decrement(&mut self, status: S) {
        let slot = &mut self.counts[status.index()];
        debug_assert!(*slot > 0, "tally for {status:?} would go negative");
        *slot = slot.saturating_sub(1);
    }

    /// Sum over every status.
    pub fn total(&self) -> u32 {
        self.counts.iter().sum()
    }

    /// Sum over `statuses` only.
    pub fn sum_of(&self, statuses: &[S]) -> u32 {
        statuses.iter().map(|&s| self.count(s)).sum()
    }

    /// Sum over every status not listed in `excluded`.
    pub fn total_excluding(&self, excluded: &[S]) -> u32 {
        self.total() - self.sum_of(excluded)
    }

    /// Counts in [`Status::ALL`] order.
    pub fn counts(&self) -> &[u32] {
        &self.counts
    }

    pub fn iter(&self) -> impl Iterator<Item = (S, u32)> + '_ {
        S::ALL.iter().map(|&s| (s, self.count(s)))
    }

    /// Event label as written to output: empty for the initial state.
    pub fn event_label(&self) -> &str {
        self.current_event.as_deref().unwrap_or("")
    }
}

impl<S: Status> Default for StatusTally<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Status> std::fmt::Display for StatusTally<S> {
    /// `S=90 E=3 I=7 R=0`
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (s, n) in self.iter() {
            if !first {
                f.write_str(" ")?;
            }
            write!(f, "{}={}", s.name(), n)?;
            first = false;
        }
        Ok(())
    }
}
