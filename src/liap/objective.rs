//! The Liapunov function of an extensive-form game.
//!
//! For a behavior profile `p` with conditional payoffs `u`, every infoset
//! contributes
//!
//! ```text
//!   Σ_a NEGATIVE_WEIGHT · min(p_a, 0)²          negative probabilities
//! + Σ_a max(u_a − Σ_b p_b·u_b, 0)²              profitable deviations
//! + SUM_WEIGHT · (Σ_a p_a − 1)²                 probabilities not summing to 1
//! ```
//!
//! The total is non-negative and vanishes exactly when `p` is a proper
//! distribution at every infoset and no action beats the infoset's average,
//! i.e. at the Nash equilibria in behavior strategies over the support.

use crate::efg::BehavProfile;

/// Penalty weight on squared negative probabilities.
pub const NEGATIVE_WEIGHT: f64 = 10_000.0;

/// Penalty weight on the squared deviation of an infoset's sum from one.
pub const SUM_WEIGHT: f64 = 100.0;

/// A scalar function of a real vector, as seen by the minimizer.
pub trait Objective {
    /// Evaluate at `x`.
    fn value(&mut self, x: &[f64]) -> f64;
}

/// The Liapunov function over a fixed game and support.
///
/// Owns a scratch profile that every evaluation overwrites with its input.
#[derive(Debug, Clone)]
pub struct LiapFunction {
    profile: BehavProfile,
    evaluations: u64,
}

impl LiapFunction {
    /// Wrap a copy of `start`; its game and support fix the layout of inputs.
    pub fn new(start: &BehavProfile) -> Self {
        Self {
            profile: start.clone(),
            evaluations: 0,
        }
    }

    /// Number of evaluations so far.
    pub fn num_evals(&self) -> u64 {
        self.evaluations
    }

    /// The profile written by the last evaluation.
    pub fn profile(&self) -> &BehavProfile {
        &self.profile
    }
}

impl Objective for LiapFunction {
    /// # Panics
    /// Panics if `x` does not match the profile's dimensionality.
    fn value(&mut self, x: &[f64]) -> f64 {
        self.evaluations += 1;
        self.profile.copy_from_slice(x);
        liap_value(&self.profile)
    }
}

/// Liapunov value of `profile`, without touching any evaluation counter.
pub fn liap_value(profile: &BehavProfile) -> f64 {
    let cpay = profile.cond_payoffs();
    let support = profile.support();
    let mut result = 0.0;

    for (iset, _) in profile.game().infosets() {
        let range = support.infoset_range(iset);
        let probs = &profile.as_slice()[range.clone()];
        let payoffs = &cpay[range];

        let mut avg = 0.0;
        let mut sum = 0.0;
        for (&p, &u) in probs.iter().zip(payoffs) {
            avg += p * u;
            sum += p;
            let negative = p.min(0.0);
            result += NEGATIVE_WEIGHT * negative * negative;
        }

        for &u in payoffs {
            let gain = (u - avg).max(0.0);
            result += gain * gain;
        }

        let excess = sum - 1.0;
        result += SUM_WEIGHT * excess * excess;
    }
    result
}
