//! Stochastic transition primitives shared by every model.

/// Probability of at least one success in `n` independent contacts that
/// each convert with probability `p`: `1 - (1 - p)^n`.
///
/// `n == 0` is exactly `0.0`.  Callers saturate `n` at the folk's energy
/// (see [`InteractionContext::contact_probability`](crate::InteractionContext::contact_probability)).
#[inline]
pub fn inverse_bernoulli(n: usize, p: f64) -> f64 {
    if n == 0 {
        return 0.0;
    }
    let n = i32::try_from(n).unwrap_or(i32::MAX);
    1.0 - (1.0 - p).powi(n)
}

/// Pick at most one destination among competing transitions.
///
/// Candidates are tried in descending probability order (ties keep their
/// given order); the first whose probability exceeds `dice` wins.
pub fn first_firing<S: Copy>(dice: f64, candidates: &[(S, f64)]) -> Option<S> {
    let mut ordered: Vec<(S, f64)> = candidates.to_vec();
    ordered.sort_by(|a, b| b.1.total_cmp(&a.1));
    ordered.into_iter().find(|&(_, p)| p > dice).map(|(s, _)| s)
}
