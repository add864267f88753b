//! Behavior profiles and the payoff quantities derived from them.

use std::sync::Arc;

use crate::efg::game::{Efg, InfosetId, NodeKind};
use crate::efg::support::EfgSupport;

/// A behavior strategy for every player: one probability per active action
/// at every infoset, stored flat in the layout fixed by the support.
///
/// Probabilities are not forced to be non-negative or to sum to one. The
/// minimizer moves through points that violate both, and every quantity
/// below is computed from whatever values are currently stored.
#[derive(Debug, Clone)]
pub struct BehavProfile {
    support: EfgSupport,
    probs: Vec<f64>,
}

impl BehavProfile {
    /// The centroid profile over the full support of `game`.
    pub fn new(game: Arc<Efg>) -> Self {
        Self::from_support(EfgSupport::new(game))
    }

    /// The centroid profile over `support`: uniform at every infoset.
    pub fn from_support(support: EfgSupport) -> Self {
        let mut probs = vec![0.0; support.dimensionality()];
        for (iset, _) in support.game().infosets() {
            let range = support.infoset_range(iset);
            let uniform = 1.0 / range.len() as f64;
            probs[range].fill(uniform);
        }
        Self { support, probs }
    }

    /// The game this profile belongs to.
    pub fn game(&self) -> &Arc<Efg> {
        self.support.game()
    }

    /// The support fixing the profile's layout.
    pub fn support(&self) -> &EfgSupport {
        &self.support
    }

    /// Number of free probabilities.
    pub fn len(&self) -> usize {
        self.probs.len()
    }

    /// Whether the profile has no free probabilities.
    pub fn is_empty(&self) -> bool {
        self.probs.is_empty()
    }

    /// All probabilities in canonical order.
    pub fn as_slice(&self) -> &[f64] {
        &self.probs
    }

    /// Mutable view of all probabilities.
    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.probs
    }

    /// Overwrite every probability.
    ///
    /// # Panics
    /// Panics if `x` does not have [`len`](Self::len) entries.
    pub fn copy_from_slice(&mut self, x: &[f64]) {
        self.probs.copy_from_slice(x);
    }

    /// Per-infoset active-action counts.
    pub fn lengths(&self) -> Vec<usize> {
        self.support.lengths()
    }

    /// Probabilities of the active actions at `iset`.
    pub fn infoset_probs(&self, iset: InfosetId) -> &[f64] {
        &self.probs[self.support.infoset_range(iset)]
    }

    /// Mutable probabilities of the active actions at `iset`.
    pub fn infoset_probs_mut(&mut self, iset: InfosetId) -> &mut [f64] {
        let range = self.support.infoset_range(iset);
        &mut self.probs[range]
    }

    /// Probability of the `k`-th active action at `iset`.
    ///
    /// # Panics
    /// Panics if `k` is not an active-action position of `iset`.
    pub fn get(&self, iset: InfosetId, k: usize) -> f64 {
        self.infoset_probs(iset)[k]
    }

    /// Set the probability of the `k`-th active action at `iset`.
    ///
    /// # Panics
    /// Panics if `k` is not an active-action position of `iset`.
    pub fn set(&mut self, iset: InfosetId, k: usize, value: f64) {
        self.infoset_probs_mut(iset)[k] = value;
    }

    /// Probability of game action `action` at `iset`; zero when the action
    /// is outside the support.
    pub fn action_prob(&self, iset: InfosetId, action: usize) -> f64 {
        self.support
            .position(iset, action)
            .map_or(0.0, |k| self.get(iset, k))
    }

    /// Expected payoff vector at every node, indexed by node id.
    pub fn node_values(&self) -> Vec<Vec<f64>> {
        let game = self.game();
        let num_players = game.num_players();
        let mut values = vec![vec![0.0; num_players]; game.num_nodes()];

        // Children always have larger ids than their parent.
        for (id, node) in game.nodes().iter().enumerate().rev() {
            let value = match node.kind() {
                NodeKind::Terminal { payoffs } => payoffs.clone(),
                NodeKind::Chance { probs } => {
                    let mut acc = vec![0.0; num_players];
                    for (&p, &child) in probs.iter().zip(node.children()) {
                        accumulate(&mut acc, p, &values[child]);
                    }
                    acc
                }
                NodeKind::Decision { infoset } => {
                    let mut acc = vec![0.0; num_players];
                    for (a, &child) in node.children().iter().enumerate() {
                        accumulate(&mut acc, self.action_prob(*infoset, a), &values[child]);
                    }
                    acc
                }
            };
            values[id] = value;
        }
        values
    }

    /// Probability of reaching every node, indexed by node id.
    pub fn realization_probs(&self) -> Vec<f64> {
        let game = self.game();
        let mut reach = vec![0.0; game.num_nodes()];
        if reach.is_empty() {
            return reach;
        }
        reach[game.root()] = 1.0;

        for (id, node) in game.nodes().iter().enumerate() {
            match node.kind() {
                NodeKind::Terminal { .. } => {}
                NodeKind::Chance { probs } => {
                    for (&p, &child) in probs.iter().zip(node.children()) {
                        reach[child] = reach[id] * p;
                    }
                }
                NodeKind::Decision { infoset } => {
                    for (a, &child) in node.children().iter().enumerate() {
                        reach[child] = reach[id] * self.action_prob(*infoset, a);
                    }
                }
            }
        }
        reach
    }

    /// Expected payoff to each player.
    pub fn payoffs(&self) -> Vec<f64> {
        self.node_values()
            .into_iter()
            .next()
            .unwrap_or_default()
    }

    /// Conditional payoff of every active action, in the profile's layout.
    ///
    /// For action `a` at infoset `I` of player `i` this is the reach-weighted
    /// average over the members of `I` of player `i`'s expected payoff after
    /// taking `a`. At infosets whose total reach is not positive the sum is
    /// left unnormalized, which makes it zero at unreached infosets.
    pub fn cond_payoffs(&self) -> Vec<f64> {
        let game = self.game();
        let values = self.node_values();
        let reach = self.realization_probs();
        let mut cpay = vec![0.0; self.len()];

        for (iset, infoset) in game.infosets() {
            let range = self.support.infoset_range(iset);
            let actions = self.support.actions(iset);
            let mut total = 0.0;
            for &member in infoset.members() {
                let weight = reach[member];
                total += weight;
                let children = game.nodes()[member].children();
                for (slot, &a) in range.clone().zip(actions) {
                    cpay[slot] += weight * values[children[a]][iset.player];
                }
            }
            if total > 0.0 {
                for slot in range {
                    cpay[slot] /= total;
                }
            }
        }
        cpay
    }
}

fn accumulate(acc: &mut [f64], weight: f64, value: &[f64]) {
    for (a, v) in acc.iter_mut().zip(value) {
        *a += weight * v;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Chance picks one of two nodes; player 0 cannot tell which.
    fn guessing_game() -> Arc<Efg> {
        let mut game = Efg::new(&["Guesser"]);
        let guess = game.add_infoset(0, "guess", &["Left", "Right"]).unwrap();
        let states = game.set_chance(0, &[0.25, 0.75]).unwrap();
        for (k, &state) in states.iter().enumerate() {
            let kids = game.set_decision(state, guess).unwrap();
            // Correct guess pays 4, wrong guess pays 0.
            game.set_payoffs(kids[k], &[4.0]).unwrap();
        }
        Arc::new(game)
    }

    #[test]
    fn test_centroid() {
        let profile = BehavProfile::new(guessing_game());
        assert_eq!(profile.len(), 2);
        assert_eq!(profile.as_slice(), &[0.5, 0.5]);
        assert_eq!(profile.lengths(), vec![2]);
    }

    #[test]
    fn test_payoffs_and_reach() {
        let mut profile = BehavProfile::new(guessing_game());
        profile.copy_from_slice(&[0.0, 1.0]);
        assert!((profile.payoffs()[0] - 3.0).abs() < 1e-12);

        let reach = profile.realization_probs();
        assert_eq!(reach[0], 1.0);
        assert_eq!(reach[1], 0.25);
        assert_eq!(reach[2], 0.75);
        // Left child of the first chance outcome is never played.
        assert_eq!(reach[3], 0.0);
    }

    #[test]
    fn test_cond_payoffs_use_beliefs() {
        let profile = BehavProfile::new(guessing_game());
        let cpay = profile.cond_payoffs();
        // Beliefs are (0.25, 0.75) whatever the guesser does.
        assert!((cpay[0] - 1.0).abs() < 1e-12);
        assert!((cpay[1] - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_cond_payoffs_zero_when_unreached() {
        let mut game = Efg::new(&["A", "B"]);
        let first = game.add_infoset(0, "first", &["Stop", "Go"]).unwrap();
        let second = game.add_infoset(1, "second", &["x", "y"]).unwrap();
        let kids = game.set_decision(0, first).unwrap();
        let later = game.set_decision(kids[1], second).unwrap();
        game.set_payoffs(later[0], &[0.0, 5.0]).unwrap();
        let game = Arc::new(game);

        let mut profile = BehavProfile::new(game);
        profile.set(InfosetId::new(0, 0), 0, 1.0);
        profile.set(InfosetId::new(0, 0), 1, 0.0);
        let cpay = profile.cond_payoffs();
        assert_eq!(&cpay[2..], &[0.0, 0.0]);

        profile.set(InfosetId::new(0, 0), 1, 0.5);
        let cpay = profile.cond_payoffs();
        assert!((cpay[2] - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_restricted_support_zeroes_inactive_actions() {
        let game = guessing_game();
        let mut support = EfgSupport::new(game);
        support.remove_action(InfosetId::new(0, 0), 0).unwrap();
        let profile = BehavProfile::from_support(support);
        assert_eq!(profile.as_slice(), &[1.0]);
        assert_eq!(profile.action_prob(InfosetId::new(0, 0), 0), 0.0);
        assert_eq!(profile.action_prob(InfosetId::new(0, 0), 1), 1.0);
        assert!((profile.payoffs()[0] - 3.0).abs() < 1e-12);
        assert!((profile.cond_payoffs()[0] - 3.0).abs() < 1e-12);
    }
}
