//! Liapunov search subgame by subgame.
//!
//! A game whose tree splits into marked subgames can be solved one subgame
//! at a time. Subgames are visited in post-order, nested ones first; each
//! solved subgame is folded into a terminal node carrying its equilibrium
//! payoffs before the subgame containing it is extracted. The per-subgame
//! profiles are then stitched into a single profile over the whole game.
//!
//! [`SubgameDecomposition::solve_subgame`] runs the search on one extracted
//! subgame, for callers that drive the traversal themselves.
//! [`SubgameDecomposition::solve`] drives the whole traversal.

use std::sync::Arc;
use std::time::Instant;

use rand::rngs::StdRng;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::efg::{BehavProfile, Efg, EfgError, InfosetId, NodeId};
use crate::liap::config::LiapParams;
use crate::liap::objective::liap_value;
use crate::liap::solution::{Algorithm, BehavSolution};
use crate::liap::solver::liap;

/// Solves the marked subgames of a game one at a time.
///
/// Built once per top-level solve. Construction assigns every infoset to
/// the subgame whose root is the nearest marked ancestor of the infoset's
/// first member; the assignment never changes afterwards.
pub struct SubgameDecomposition {
    params: LiapParams,
    start: BehavProfile,
    max_solutions: usize,
    rng: StdRng,
    /// Marked roots in post-order.
    roots: Vec<NodeId>,
    /// player -> infoset -> position in `roots`
    infoset_subgames: Vec<Vec<usize>>,
    subgame_number: usize,
    evaluations: u64,
}

impl SubgameDecomposition {
    /// Prepare to solve the game of `start`, which also provides the
    /// starting probabilities of every subgame search. When `max_solutions`
    /// is positive, at most that many solutions are kept per subgame.
    ///
    /// # Panics
    /// Panics if an infoset cannot be attributed to a marked subgame, which
    /// happens when it has no member nodes.
    pub fn new(params: LiapParams, start: &BehavProfile, max_solutions: usize) -> Self {
        let game = start.game();
        let roots = game.marked_subgame_roots();

        let infoset_subgames = (0..game.num_players())
            .map(|pl| {
                (0..game.num_infosets(pl))
                    .map(|index| {
                        let iset = InfosetId::new(pl, index);
                        let first = game
                            .infoset(iset)
                            .ok()
                            .and_then(|infoset| infoset.members().first().copied());
                        first
                            .and_then(|node| {
                                let root = game.subgame_root(node);
                                roots.iter().position(|&r| r == root)
                            })
                            .unwrap_or_else(|| panic!("infoset {} belongs to no marked subgame", iset))
                    })
                    .collect()
            })
            .collect();

        Self {
            rng: params.rng(),
            params,
            start: start.clone(),
            max_solutions,
            roots,
            infoset_subgames,
            subgame_number: 0,
            evaluations: 0,
        }
    }

    /// Marked subgame roots in the order they are solved.
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Position in [`roots`](Self::roots) of the subgame owning `iset`.
    pub fn infoset_subgame(&self, iset: InfosetId) -> Option<usize> {
        self.infoset_subgames
            .get(iset.player)
            .and_then(|p| p.get(iset.index))
            .copied()
    }

    /// Number of subgames solved so far.
    pub fn subgame_number(&self) -> usize {
        self.subgame_number
    }

    /// Objective evaluations summed over every subgame solved so far.
    pub fn evaluations(&self) -> u64 {
        self.evaluations
    }

    /// Solve the next subgame in order.
    ///
    /// `game` is the extracted subgame. Its infosets are matched with those
    /// of the full game by order of appearance within each player, so any
    /// nested subgame must already be collapsed out of it. Returns whether
    /// the search consumed a cancellation request.
    pub fn solve_subgame(&mut self, game: &Arc<Efg>, solutions: &mut Vec<BehavSolution>) -> bool {
        let k = self.subgame_number;
        self.subgame_number += 1;

        let start = self.local_start(game, k);
        let mut found = Vec::new();
        let stats = liap(&self.params, &start, &mut found, &mut self.rng);
        self.evaluations += stats.evaluations;

        if self.max_solutions > 0 {
            found.truncate(self.max_solutions);
        }
        if self.params.trace >= 1 {
            log::debug!(
                "subgame {} ({} infosets): {} solutions, {} evaluations",
                k,
                start.game().infosets().count(),
                found.len(),
                stats.evaluations
            );
        }
        solutions.extend(found);
        stats.cancelled
    }

    /// Solve every marked subgame and compose the results.
    ///
    /// Each subgame contributes its first solution, or its starting profile
    /// when the search found none. The composed profile is scored with the
    /// Liapunov function of the whole game. Counters restart from zero.
    pub fn solve(&mut self) -> Result<SubgameOutcome, EfgError> {
        let timer = Instant::now();
        self.subgame_number = 0;
        self.evaluations = 0;

        let game = Arc::clone(self.start.game());
        let mut full = self.start.clone();
        let mut collapsed: FxHashMap<NodeId, Vec<f64>> = FxHashMap::default();
        let mut reports = Vec::with_capacity(self.roots.len());
        let mut found = true;
        let mut cancelled = false;

        for k in 0..self.roots.len() {
            let root = self.roots[k];
            let sub = Arc::new(game.subgame(root, &collapsed)?);

            let before = self.evaluations;
            let mut solutions = Vec::new();
            cancelled = self.solve_subgame(&sub, &mut solutions);
            reports.push(SubgameReport {
                root,
                evaluations: self.evaluations - before,
                solutions: solutions.len(),
            });
            if cancelled {
                break;
            }

            let local = match solutions.into_iter().next() {
                Some(solution) => solution.profile().clone(),
                None => {
                    found = false;
                    self.local_start(&sub, k)
                }
            };
            for (global, local_iset) in self.subgame_infosets(&sub, k) {
                for (pos, &action) in self.start.support().actions(global).iter().enumerate() {
                    full.set(global, pos, local.action_prob(local_iset, action));
                }
            }
            collapsed.insert(root, local.payoffs());
        }

        let solution = if cancelled {
            None
        } else {
            let value = liap_value(&full);
            Some(BehavSolution::new(full, value, Algorithm::LiapSubgame))
        };

        let outcome = SubgameOutcome {
            solution,
            found: found && !cancelled,
            cancelled,
            evaluations: self.evaluations,
            subgames: reports,
            elapsed_seconds: timer.elapsed().as_secs_f64(),
        };
        if self.params.trace >= 1 {
            log::info!(
                "liap by subgame: {} subgames, {} evaluations{}",
                outcome.subgames.len(),
                outcome.evaluations,
                if cancelled { " (cancelled)" } else { "" }
            );
        }
        Ok(outcome)
    }

    /// Pairs of (full-game infoset, subgame infoset) for subgame `k`.
    fn subgame_infosets(&self, game: &Efg, k: usize) -> Vec<(InfosetId, InfosetId)> {
        let mut pairs = Vec::new();
        for (pl, subgames) in self.infoset_subgames.iter().enumerate() {
            let mut local = 0;
            for (index, &owner) in subgames.iter().enumerate() {
                if owner != k {
                    continue;
                }
                if local < game.num_infosets(pl) {
                    pairs.push((InfosetId::new(pl, index), InfosetId::new(pl, local)));
                }
                local += 1;
            }
        }
        pairs
    }

    /// The centroid of `game` overwritten with the starting probabilities of
    /// the infosets of subgame `k`.
    fn local_start(&self, game: &Arc<Efg>, k: usize) -> BehavProfile {
        let mut profile = BehavProfile::new(Arc::clone(game));
        for (global, local) in self.subgame_infosets(game, k) {
            for (pos, &action) in profile.support().actions(local).to_vec().iter().enumerate() {
                profile.set(local, pos, self.start.action_prob(global, action));
            }
        }
        profile
    }
}

/// Per-subgame counts from [`SubgameDecomposition::solve`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubgameReport {
    /// Root node of the subgame in the full game.
    pub root: NodeId,
    /// Objective evaluations spent on it.
    pub evaluations: u64,
    /// Solutions found for it.
    pub solutions: usize,
}

/// Result of [`SubgameDecomposition::solve`].
#[derive(Debug, Clone)]
pub struct SubgameOutcome {
    /// The composed profile; `None` when the run was cancelled.
    pub solution: Option<BehavSolution>,
    /// Whether every subgame search found a solution.
    pub found: bool,
    /// Whether the run stopped on a cancellation request.
    pub cancelled: bool,
    /// Evaluations summed over all subgames.
    pub evaluations: u64,
    /// One report per subgame attempted, in solve order.
    pub subgames: Vec<SubgameReport>,
    /// Wall-clock time spent (in seconds).
    pub elapsed_seconds: f64,
}
