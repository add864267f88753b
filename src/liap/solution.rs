//! Equilibrium snapshots returned by the search.

use serde::{Deserialize, Serialize};

use crate::efg::BehavProfile;

/// Which algorithm produced a solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Algorithm {
    /// Liapunov minimization over the whole game.
    Liap,
    /// Liapunov minimization subgame by subgame.
    LiapSubgame,
}

/// An approximate equilibrium: the profile the minimizer stopped at and the
/// Liapunov value it achieved there.
#[derive(Debug, Clone)]
pub struct BehavSolution {
    profile: BehavProfile,
    liap_value: f64,
    creator: Algorithm,
}

impl BehavSolution {
    /// Snapshot `profile`.
    pub fn new(profile: BehavProfile, liap_value: f64, creator: Algorithm) -> Self {
        Self {
            profile,
            liap_value,
            creator,
        }
    }

    /// The profile.
    pub fn profile(&self) -> &BehavProfile {
        &self.profile
    }

    /// Liapunov value of the profile.
    pub fn liap_value(&self) -> f64 {
        self.liap_value
    }

    /// The producing algorithm.
    pub fn creator(&self) -> Algorithm {
        self.creator
    }

    /// A self-describing, serializable view of the solution.
    pub fn export(&self) -> SolutionExport {
        let game = self.profile.game();
        let support = self.profile.support();
        let infosets = game
            .infosets()
            .map(|(iset, infoset)| InfosetExport {
                player: game
                    .player_name(iset.player)
                    .map(str::to_owned)
                    .unwrap_or_default(),
                label: infoset.label().to_owned(),
                actions: support
                    .actions(iset)
                    .iter()
                    .map(|&a| infoset.actions()[a].clone())
                    .collect(),
                probs: self.profile.infoset_probs(iset).to_vec(),
            })
            .collect();

        SolutionExport {
            creator: self.creator,
            liap_value: self.liap_value,
            infosets,
        }
    }
}

/// Serializable form of a [`BehavSolution`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolutionExport {
    /// Producing algorithm.
    pub creator: Algorithm,
    /// Liapunov value.
    pub liap_value: f64,
    /// One entry per infoset, in canonical order.
    pub infosets: Vec<InfosetExport>,
}

/// One infoset of a [`SolutionExport`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfosetExport {
    /// Name of the player to move.
    pub player: String,
    /// Infoset label.
    pub label: String,
    /// Names of the active actions.
    pub actions: Vec<String>,
    /// Probabilities of the active actions.
    pub probs: Vec<f64>,
}
