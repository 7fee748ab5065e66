//! The per-individual record.

use std::collections::VecDeque;

use et_core::{AgentId, NodeId, PlaceType, SimRng};

use crate::{Status, StatusTally};

/// One simulated individual.
///
/// `S` is the model's status vocabulary; `T` holds model-specific extras
/// (e.g. vaccination intent) and defaults to `()`.
///
/// Invariants kept by the methods below:
/// - `energy` stays in `0..=max_energy`;
/// - status changes go through [`convert`](Self::convert), which keeps the
///   tally in step and resets the streak.
#[derive(Clone, Debug)]
pub struct Folk<S, T = ()> {
    pub id:                  AgentId,
    pub home:                NodeId,
    pub location:            NodeId,
    pub status:              S,
    pub energy:              u32,
    pub max_energy:          u32,
    pub alive:               bool,
    /// Restricted folks stay where they are (quarantine).
    pub movement_restricted: bool,
    /// Place types this folk will head for, nearest first, before doing
    /// anything else on a dispersal event.
    pub priority_places:     VecDeque<PlaceType>,
    /// Nights spent in the current status.
    pub status_step_streak:  u32,
    pub traits:              T,
}

impl<S: Status, T> Folk<S, T> {
    /// A living folk at home with energy drawn uniformly from
    /// `0..=max_energy`.
    pub fn new(id: AgentId, home: NodeId, status: S, max_energy: u32, traits: T, rng: &mut SimRng) -> Self {
        Self {
            id,
            home,
            location: home,
            status,
            energy: rng.gen_range(0..=max_energy),
            max_energy,
            alive: true,
            movement_restricted: false,
            priority_places: VecDeque::new(),
            status_step_streak: 0,
            traits,
        }
    }

    /// Move this folk to `new_status`, updating `tally`.
    ///
    /// # Panics
    /// If `new_status` equals the current status.
    pub fn convert(&mut self, new_status: S, tally: &mut StatusTally<S>) {
        assert_ne!(
            self.status, new_status,
            "{} cannot convert to its current status {:?}",
            self.id, new_status
        );
        tally.decrement(self.status);
        tally.increment(new_status);
        self.status = new_status;
        self.status_step_streak = 0;
    }

    /// Alive with energy left: may interact, and is visible in interaction
    /// snapshots.
    #[inline]
    pub fn can_act(&self) -> bool {
        self.alive && self.energy > 0
    }

    /// May be moved by dispersal.
    #[inline]
    pub fn can_move(&self) -> bool {
        self.can_act() && !self.movement_restricted
    }

    /// Charge one interaction.
    #[inline]
    pub fn spend_energy(&mut self) {
        self.energy = self.energy.saturating_sub(1);
    }

    /// Nightly bookkeeping shared by every model: one more night in the
    /// current status, fresh energy for tomorrow.
    pub fn rest(&mut self, rng: &mut SimRng) {
        self.status_step_streak += 1;
        self.energy = rng.gen_range(0..=self.max_energy);
    }

    #[inline]
    pub fn return_home(&mut self) {
        self.location = self.home;
    }

    #[inline]
    pub fn is_home(&self) -> bool {
        self.location == self.home
    }

    /// Queue `place` as a priority destination unless it is already queued.
    /// Returns `true` if it was added.
    pub fn queue_priority(&mut self, place: PlaceType) -> bool {
        if self.priority_places.contains(&place) {
            return false;
        }
        self.priority_places.push_back(place);
        true
    }

    /// Drop the first queued occurrence of `place`.
    pub fn take_priority(&mut self, place: PlaceType) -> bool {
        match self.priority_places.iter().position(|&p| p == place) {
            Some(i) => {
                self.priority_places.remove(i);
                true
            }
            None => false,
        }
    }
}

// ── FolkView ──────────────────────────────────────────────────────────────────

/// Read-only, model-agnostic view of a folk.
///
/// Destination probability functions receive this instead of the concrete
/// `Folk<S, T>` so that step events stay independent of any one model.
pub trait FolkView {
    fn id(&self) -> AgentId;
    fn home(&self) -> NodeId;
    fn location(&self) -> NodeId;
    fn energy(&self) -> u32;
    fn max_energy(&self) -> u32;
    fn status_name(&self) -> &'static str;

    /// `energy / max_energy`, or `0.0` when `max_energy` is zero.
    fn energy_fraction(&self) -> f64 {
        if self.max_energy() == 0 {
            0.0
        } else {
            self.energy() as f64 / self.max_energy() as f64
        }
    }
}

impl<S: Status, T> FolkView for Folk<S, T> {
    fn id(&self) -> AgentId { self.id }
    fn home(&self) -> NodeId { self.home }
    fn location(&self) -> NodeId { self.location }
    fn energy(&self) -> u32 { self.energy }
    fn max_energy(&self) -> u32 { self.max_energy }
    fn status_name(&self) -> &'static str { self.status.name() }
}
