//! Deterministic mean-field counterparts of the agent models.
//!
//! A well-mixed ODE with the same rate parameters gives a reference
//! trajectory to compare aggregate agent-based counts against.

/// An autonomous ODE system over compartment densities.
pub trait MeanField {
    /// Compartment names, in state-vector order.
    fn labels(&self) -> &'static [&'static str];

    /// `dy/dt` at `y`.  `y.len() == labels().len()`.
    fn derivatives(&self, y: &[f64]) -> Vec<f64>;
}

/// Integrate `system` from `y0` with classic fourth-order Runge-Kutta.
///
/// Takes `steps_per_day` equal steps per day and returns `days + 1` state
/// vectors: `y0` followed by the state at the end of each day.
pub fn integrate_rk4<M: MeanField + ?Sized>(
    system:        &M,
    y0:            &[f64],
    days:          u32,
    steps_per_day: u32,
) -> Vec<Vec<f64>> {
    let steps = steps_per_day.max(1);
    let h = 1.0 / steps as f64;

    let mut out = Vec::with_capacity(days as usize + 1);
    let mut y = y0.to_vec();
    out.push(y.clone());

    for _ in 0..days {
        for _ in 0..steps {
            let k1 = system.derivatives(&y);
            let k2 = system.derivatives(&axpy(&y, &k1, h / 2.0));
            let k3 = system.derivatives(&axpy(&y, &k2, h / 2.0));
            let k4 = system.derivatives(&axpy(&y, &k3, h));
            for (i, yi) in y.iter_mut().enumerate() {
                *yi += h / 6.0 * (k1[i] + 2.0 * k2[i] + 2.0 * k3[i] + k4[i]);
            }
        }
        out.push(y.clone());
    }
    out
}

/// `y + a * k`
fn axpy(y: &[f64], k: &[f64], a: f64) -> Vec<f64> {
    y.iter().zip(k).map(|(yi, ki)| yi + a * ki).collect()
}
