//! Arguments handed to a model's transitions.

use et_agent::{Folk, Status, StatusTally};
use et_core::{AgentId, PlaceType};

use crate::transition::inverse_bernoulli;

/// Everything an `interact` transition may look at or change.
///
/// # The shared snapshot
///
/// `here` lists the folks that were alive and had energy when the node was
/// gathered, in occupancy order, **including the acting folk**.  It is the
/// same list for every folk evaluated at this node during this event.  The
/// list holds ids, and statuses are read live from `folks`, so a conversion
/// made for an earlier folk in the pass is already visible to later ones.
/// That ordering is part of the model semantics: runs are only reproducible
/// if the pass order is kept.
pub struct InteractionContext<'a, S: Status, T> {
    /// The folk being evaluated.
    pub agent: AgentId,
    pub here:  &'a [AgentId],
    pub place: PlaceType,
    pub folks: &'a mut [Folk<S, T>],
    pub tally: &'a mut StatusTally<S>,
    /// Uniform draw in `[0, 1)` for this folk and event.
    pub dice:  f64,
}

impl<'a, S: Status, T> InteractionContext<'a, S, T> {
    #[inline]
    pub fn me(&self) -> &Folk<S, T> {
        &self.folks[self.agent.index()]
    }

    #[inline]
    pub fn me_mut(&mut self) -> &mut Folk<S, T> {
        &mut self.folks[self.agent.index()]
    }

    #[inline]
    pub fn status(&self) -> S {
        self.me().status
    }

    /// Size of the snapshot, the acting folk included.
    #[inline]
    pub fn here_len(&self) -> usize {
        self.here.len()
    }

    /// Other folks in the snapshot whose current status is one of
    /// `statuses`.  The acting folk is never its own contact.
    pub fn contacts(&self, statuses: &[S]) -> usize {
        self.here
            .iter()
            .filter(|&&id| id != self.agent)
            .filter(|id| statuses.contains(&self.folks[id.index()].status))
            .count()
    }

    /// Folks in the snapshot matching `pred`, in snapshot order.
    pub fn here_matching<'s>(
        &'s self,
        pred: impl Fn(&Folk<S, T>) -> bool + 's,
    ) -> impl Iterator<Item = AgentId> + 's {
        self.here.iter().copied().filter(move |id| pred(&self.folks[id.index()]))
    }

    /// `inverse_bernoulli` with the contact count saturated at this folk's
    /// energy: a folk cannot meet more people today than it has energy for.
    pub fn contact_probability(&self, contacts: usize, p: f64) -> f64 {
        let n = contacts.min(self.me().energy as usize);
        inverse_bernoulli(n, p)
    }

    /// Convert the acting folk.  Panics if `to` is its current status.
    pub fn convert(&mut self, to: S) {
        let agent = self.agent.index();
        self.folks[agent].convert(to, self.tally);
    }
}

/// Everything a `sleep` transition may look at or change.
pub struct SleepContext<'a, S: Status, T> {
    pub folk:  &'a mut Folk<S, T>,
    pub tally: &'a mut StatusTally<S>,
    /// Uniform draw in `[0, 1)` for this folk and event.
    pub dice:  f64,
}

impl<'a, S: Status, T> SleepContext<'a, S, T> {
    #[inline]
    pub fn status(&self) -> S {
        self.folk.status
    }

    #[inline]
    pub fn streak(&self) -> u32 {
        self.folk.status_step_streak
    }

    pub fn convert(&mut self, to: S) {
        self.folk.convert(to, self.tally);
    }
}
