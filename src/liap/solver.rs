//! The restart driver for Liapunov minimization.
//!
//! Each attempt minimizes the Liapunov function with Powell's method from a
//! starting profile: the caller's profile for the first attempt, a uniformly
//! sampled one for every later attempt. Converged attempts are recorded as
//! solutions.

use std::sync::Arc;
use std::time::Instant;

use rand::rngs::StdRng;
use rand::Rng;

use crate::efg::BehavProfile;
use crate::linalg::RectArray;
use crate::liap::config::{LiapParams, LiapStats};
use crate::liap::objective::LiapFunction;
use crate::liap::powell::{powell, PowellOutcome};
use crate::liap::project::project;
use crate::liap::solution::{Algorithm, BehavSolution};

/// A Liapunov solver owning its parameters and random source.
///
/// # Example
/// ```
/// use efg_liap::efg::BehavProfile;
/// use efg_liap::games::one_player_choice;
/// use efg_liap::liap::{LiapParams, LiapSolver};
///
/// let start = BehavProfile::new(one_player_choice(&[3.0, 1.0]).unwrap());
/// let mut solver = LiapSolver::new(LiapParams::default().with_seed(1));
/// let mut solutions = Vec::new();
/// let stats = solver.solve(&start, &mut solutions);
///
/// assert!(stats.found);
/// assert!(solutions[0].profile().as_slice()[0] > 0.999);
/// ```
pub struct LiapSolver {
    params: LiapParams,
    rng: StdRng,
    stats: LiapStats,
}

impl LiapSolver {
    /// Create a solver. The random source is seeded from `params.seed`, or
    /// from entropy when no seed is set.
    pub fn new(params: LiapParams) -> Self {
        Self {
            rng: params.rng(),
            params,
            stats: LiapStats::new(),
        }
    }

    /// Search for equilibria from `start`, appending them to `solutions`.
    pub fn solve(&mut self, start: &BehavProfile, solutions: &mut Vec<BehavSolution>) -> LiapStats {
        self.stats = liap(&self.params, start, solutions, &mut self.rng);
        self.stats.clone()
    }

    /// Statistics of the last search.
    pub fn stats(&self) -> &LiapStats {
        &self.stats
    }

    /// The solver's parameters.
    pub fn params(&self) -> &LiapParams {
        &self.params
    }
}

/// Run the restart loop with an explicit random source.
///
/// Stops after `params.n_tries` attempts, once `solutions` holds
/// `params.stop_after` entries (unless that is 0), or when the status
/// handle is cancelled. The cancellation is consumed, so the handle is
/// clean again when this returns.
pub fn liap<R: Rng + ?Sized>(
    params: &LiapParams,
    start: &BehavProfile,
    solutions: &mut Vec<BehavSolution>,
    rng: &mut R,
) -> LiapStats {
    run_attempts(params, start, solutions, rng, |attempt, outcome| {
        if params.trace >= 1 {
            log::debug!(
                "liap attempt {}: value {:e} after {} sweeps ({})",
                attempt + 1,
                outcome.value,
                outcome.iterations,
                if outcome.converged { "converged" } else { "failed" }
            );
        }
    })
}

/// The restart loop behind [`liap`]. `on_attempt` sees every finished
/// attempt before the cancellation check that follows it.
fn run_attempts<R, F>(
    params: &LiapParams,
    start: &BehavProfile,
    solutions: &mut Vec<BehavSolution>,
    rng: &mut R,
    mut on_attempt: F,
) -> LiapStats
where
    R: Rng + ?Sized,
    F: FnMut(usize, &PowellOutcome),
{
    let timer = Instant::now();
    let mut stats = LiapStats::new();
    let initial = solutions.len();

    let mut profile = start.clone();
    let mut func = LiapFunction::new(start);
    let lengths = profile.lengths();
    let mut xi = RectArray::identity(profile.len());
    let config = params.powell();

    for attempt in 0..params.n_tries {
        if params.status.take() {
            stats.cancelled = true;
            break;
        }
        if params.stop_after > 0 && solutions.len() >= params.stop_after {
            break;
        }

        if attempt > 0 {
            pick_random_profile(&mut profile, rng);
        }
        init_matrix(&mut xi, &lengths);
        stats.attempts += 1;

        let outcome = powell(profile.as_mut_slice(), &mut xi, &mut func, &config, &params.status);
        stats.iterations += outcome.iterations as u64;

        if outcome.converged {
            solutions.push(BehavSolution::new(profile.clone(), outcome.value, Algorithm::Liap));
        }
        on_attempt(attempt, &outcome);

        if params.status.take() {
            stats.cancelled = true;
            break;
        }
    }

    stats.found = !solutions.is_empty();
    stats.solutions = solutions.len() - initial;
    stats.evaluations = func.num_evals();
    stats.elapsed_seconds = timer.elapsed().as_secs_f64();

    if params.trace >= 1 {
        log::info!(
            "liap: {} solutions in {} attempts, {} evaluations{}",
            stats.solutions,
            stats.attempts,
            stats.evaluations,
            if stats.cancelled { " (cancelled)" } else { "" }
        );
    }
    stats
}

/// Overwrite `profile` with a random point of the product of simplices.
///
/// At each infoset every active action but the last draws a uniform value
/// in `[0, 1)`, redrawn while it would push the running sum past one; the
/// last action takes whatever remains.
pub fn pick_random_profile<R: Rng + ?Sized>(profile: &mut BehavProfile, rng: &mut R) {
    let game = Arc::clone(profile.game());
    for (iset, _) in game.infosets() {
        let probs = profile.infoset_probs_mut(iset);
        let Some((last, head)) = probs.split_last_mut() else {
            continue;
        };
        let mut sum = 0.0;
        for slot in head {
            let mut tmp: f64 = rng.gen();
            while tmp + sum > 1.0 {
                tmp = rng.gen();
            }
            *slot = tmp;
            sum += tmp;
        }
        *last = 1.0 - sum;
    }
}

/// Reset `xi` to the identity and project each row so that it sums to zero
/// within every infoset block of `lengths`.
///
/// # Panics
/// Panics if `xi` is not square.
pub fn init_matrix(xi: &mut RectArray<f64>, lengths: &[usize]) {
    assert_eq!(xi.num_rows(), xi.num_columns(), "direction set must be square");
    for (i, row) in xi.rows_mut().enumerate() {
        row.fill(0.0);
        row[i] = 1.0;
        project(row, lengths);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::efg::Efg;
    use crate::liap::objective::liap_value;
    use crate::liap::status::Status;
    use rand::SeedableRng;

    fn choice(payoffs: &[f64]) -> BehavProfile {
        let mut game = Efg::new(&["Solo"]);
        let names: Vec<String> = (0..payoffs.len()).map(|k| format!("a{}", k)).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let iset = game.add_infoset(0, "only", &refs).unwrap();
        let kids = game.set_decision(0, iset).unwrap();
        for (&kid, &u) in kids.iter().zip(payoffs) {
            game.set_payoffs(kid, &[u]).unwrap();
        }
        BehavProfile::new(Arc::new(game))
    }

    #[test]
    fn test_init_matrix_rows_are_tangent() {
        let mut xi = RectArray::identity(5);
        init_matrix(&mut xi, &[2, 3]);
        for i in 0..5 {
            let row = xi.row(i).unwrap();
            assert!((row[0] + row[1]).abs() < 1e-15);
            assert!((row[2] + row[3] + row[4]).abs() < 1e-15);
        }
        assert!((xi[(0, 0)] - 0.5).abs() < 1e-15);
        assert!((xi[(2, 2)] - 2.0 / 3.0).abs() < 1e-15);
        assert_eq!(xi[(0, 2)], 0.0);
    }

    #[test]
    fn test_init_matrix_overwrites_every_row() {
        let mut xi = RectArray::filled(3, 3, 7.0);
        init_matrix(&mut xi, &[3]);
        for i in 0..3 {
            for j in 0..3 {
                let expected = if i == j { 2.0 / 3.0 } else { -1.0 / 3.0 };
                assert!((xi[(i, j)] - expected).abs() < 1e-15, "({}, {})", i, j);
            }
        }
    }

    #[test]
    #[should_panic(expected = "square")]
    fn test_init_matrix_rejects_non_square() {
        let mut xi = RectArray::new(2, 3);
        init_matrix(&mut xi, &[3]);
    }

    #[test]
    fn test_random_profile_is_distribution() {
        let mut profile = choice(&[0.0; 4]);
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..100 {
            pick_random_profile(&mut profile, &mut rng);
            let probs = profile.as_slice();
            assert!(probs.iter().all(|&p| (0.0..=1.0).contains(&p)), "{:?}", probs);
            assert!((probs.iter().sum::<f64>() - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_converges_to_best_response() {
        let start = choice(&[3.0, 1.0]);
        let mut solutions = Vec::new();
        let params = LiapParams::default().with_seed(5);
        let stats = liap(&params, &start, &mut solutions, &mut StdRng::seed_from_u64(5));

        assert!(stats.found);
        assert_eq!(stats.solutions, 1);
        assert!(stats.evaluations > 0);
        assert!(stats.iterations > 0);
        let solution = &solutions[0];
        assert_eq!(solution.creator(), Algorithm::Liap);
        assert!(solution.liap_value() < 1e-6);
        let probs = solution.profile().as_slice();
        assert!((probs[0] - 1.0).abs() < 1e-3, "{:?}", probs);
        assert!(probs[1].abs() < 1e-3, "{:?}", probs);
        assert!(liap_value(solution.profile()) < 1e-6);
    }

    #[test]
    fn test_precancelled_search_does_nothing() {
        let start = choice(&[3.0, 1.0]);
        let status = Status::new();
        status.cancel();
        let params = LiapParams::default().with_tries(1).with_status(status.clone());
        let mut solutions = Vec::new();
        let stats = liap(&params, &start, &mut solutions, &mut StdRng::seed_from_u64(0));

        assert!(!stats.found);
        assert!(stats.cancelled);
        assert_eq!(stats.attempts, 0);
        assert_eq!(stats.evaluations, 0);
        assert!(solutions.is_empty());
        // The request was consumed.
        assert!(!status.is_cancelled());
    }

    #[test]
    fn test_stop_after_first_solution() {
        let start = choice(&[3.0, 1.0]);
        let params = LiapParams::default().with_tries(10).with_stop_after(1);
        let mut solutions = Vec::new();
        let stats = liap(&params, &start, &mut solutions, &mut StdRng::seed_from_u64(9));
        assert_eq!(solutions.len(), 1);
        assert_eq!(stats.attempts, 1);
    }

    #[test]
    fn test_stop_after_waits_for_first_success() {
        // A NaN start never converges; the sampled restart does.
        let mut start = choice(&[3.0, 1.0]);
        start.copy_from_slice(&[f64::NAN, f64::NAN]);
        let params = LiapParams::default().with_tries(10).with_stop_after(1);
        let mut solutions = Vec::new();
        let mut converged = Vec::new();
        let stats = run_attempts(&params, &start, &mut solutions, &mut StdRng::seed_from_u64(8), |_, outcome| {
            converged.push(outcome.converged)
        });

        assert_eq!(converged, vec![false, true]);
        assert_eq!(stats.attempts, 2);
        assert_eq!(solutions.len(), 1);
        assert!(solutions[0].profile().as_slice()[0] > 0.999);
    }

    #[test]
    fn test_cancel_during_attempt_ends_search() {
        let start = choice(&[3.0, 1.0]);
        let status = Status::new();
        let params = LiapParams::default()
            .with_tries(5)
            .with_stop_after(0)
            .with_status(status.clone());
        let mut solutions = Vec::new();
        let mut seen = 0;
        let stats = run_attempts(&params, &start, &mut solutions, &mut StdRng::seed_from_u64(4), |_, _| {
            seen += 1;
            status.cancel();
        });

        assert_eq!(seen, 1);
        assert_eq!(stats.attempts, 1);
        assert!(stats.cancelled);
        // The finished attempt is still recorded.
        assert_eq!(solutions.len(), 1);
        assert!(!status.is_cancelled());
    }

    #[test]
    fn test_unbounded_collects_every_attempt() {
        let start = choice(&[3.0, 1.0]);
        let params = LiapParams::default().with_tries(4).with_stop_after(0);
        let mut solutions = Vec::new();
        let stats = liap(&params, &start, &mut solutions, &mut StdRng::seed_from_u64(2));
        assert_eq!(stats.attempts, 4);
        assert_eq!(stats.solutions, solutions.len());
        assert!(solutions.len() >= 1);
    }

    #[test]
    fn test_seeded_solver_is_reproducible() {
        let start = choice(&[1.0, 2.0, 0.5]);
        let params = LiapParams::default().with_tries(3).with_stop_after(0).with_seed(42);

        let mut first = Vec::new();
        let mut second = Vec::new();
        let a = LiapSolver::new(params.clone()).solve(&start, &mut first);
        let b = LiapSolver::new(params).solve(&start, &mut second);

        assert_eq!(a.evaluations, b.evaluations);
        assert_eq!(first.len(), second.len());
        for (x, y) in first.iter().zip(&second) {
            assert_eq!(x.profile().as_slice(), y.profile().as_slice());
        }
    }

    #[test]
    fn test_solver_keeps_last_stats() {
        let start = choice(&[3.0, 1.0]);
        let mut solver = LiapSolver::new(LiapParams::default().with_seed(1));
        assert_eq!(solver.stats(), &LiapStats::default());
        let mut solutions = Vec::new();
        let stats = solver.solve(&start, &mut solutions);
        assert_eq!(solver.stats().evaluations, stats.evaluations);
        assert_eq!(solver.params().n_tries, 10);
    }
}
