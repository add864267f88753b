//! Action supports.

use std::ops::Range;
use std::sync::Arc;

use crate::efg::game::{Efg, EfgError, InfosetId};

/// The set of actions considered active at each infoset.
///
/// Active actions are listed in game order. The support also fixes
/// the layout of flat profile vectors: infosets in canonical order, and
/// within each infoset one slot per active action.
#[derive(Debug, Clone)]
pub struct EfgSupport {
    game: Arc<Efg>,
    /// player -> infoset -> active action indices
    actions: Vec<Vec<Vec<usize>>>,
    /// player -> infoset -> offset of the infoset's first slot
    offsets: Vec<Vec<usize>>,
    dimension: usize,
}

impl EfgSupport {
    /// The full support: every action of every infoset is active.
    pub fn new(game: Arc<Efg>) -> Self {
        let actions = (0..game.num_players())
            .map(|pl| {
                (0..game.num_infosets(pl))
                    .map(|index| {
                        let n = game
                            .infoset(InfosetId::new(pl, index))
                            .map_or(0, |iset| iset.num_actions());
                        (0..n).collect()
                    })
                    .collect()
            })
            .collect();
        let mut support = Self {
            game,
            actions,
            offsets: Vec::new(),
            dimension: 0,
        };
        support.relayout();
        support
    }

    /// The game this support belongs to.
    pub fn game(&self) -> &Arc<Efg> {
        &self.game
    }

    /// Number of active actions at `iset`.
    pub fn num_actions(&self, iset: InfosetId) -> usize {
        self.actions(iset).len()
    }

    /// Active action indices at `iset` (empty for an unknown infoset).
    pub fn actions(&self, iset: InfosetId) -> &[usize] {
        self.actions
            .get(iset.player)
            .and_then(|p| p.get(iset.index))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Whether `action` is active at `iset`.
    pub fn contains(&self, iset: InfosetId, action: usize) -> bool {
        self.actions(iset).contains(&action)
    }

    /// Position of `action` among the active actions of `iset`.
    pub fn position(&self, iset: InfosetId, action: usize) -> Option<usize> {
        self.actions(iset).iter().position(|&a| a == action)
    }

    /// Deactivate `action` at `iset`. Returns `Ok(false)` if it was not active.
    pub fn remove_action(&mut self, iset: InfosetId, action: usize) -> Result<bool, EfgError> {
        let num_actions = self.game.infoset(iset)?.num_actions();
        if action >= num_actions {
            return Err(EfgError::UnknownAction {
                infoset: iset,
                action,
            });
        }
        let active = &mut self.actions[iset.player][iset.index];
        let Some(pos) = active.iter().position(|&a| a == action) else {
            return Ok(false);
        };
        if active.len() == 1 {
            return Err(EfgError::LastAction(iset));
        }
        active.remove(pos);
        self.relayout();
        Ok(true)
    }

    /// Total number of active actions across all infosets.
    pub fn dimensionality(&self) -> usize {
        self.dimension
    }

    /// Active-action count of every infoset, in canonical order.
    pub fn lengths(&self) -> Vec<usize> {
        self.actions.iter().flatten().map(Vec::len).collect()
    }

    /// Slots of `iset` in a flat profile vector.
    pub fn infoset_range(&self, iset: InfosetId) -> Range<usize> {
        let start = self.offsets[iset.player][iset.index];
        start..start + self.num_actions(iset)
    }

    fn relayout(&mut self) {
        let mut next = 0;
        self.offsets = self
            .actions
            .iter()
            .map(|player| {
                player
                    .iter()
                    .map(|acts| {
                        let start = next;
                        next += acts.len();
                        start
                    })
                    .collect()
            })
            .collect();
        self.dimension = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game() -> Arc<Efg> {
        let mut game = Efg::new(&["A", "B"]);
        let a = game.add_infoset(0, "a", &["x", "y", "z"]).unwrap();
        let b = game.add_infoset(1, "b", &["l", "r"]).unwrap();
        let kids = game.set_decision(0, a).unwrap();
        game.set_decision(kids[0], b).unwrap();
        Arc::new(game)
    }

    #[test]
    fn test_full_support_layout() {
        let support = EfgSupport::new(game());
        assert_eq!(support.dimensionality(), 5);
        assert_eq!(support.lengths(), vec![3, 2]);
        assert_eq!(support.infoset_range(InfosetId::new(1, 0)), 3..5);
    }

    #[test]
    fn test_remove_action() {
        let mut support = EfgSupport::new(game());
        let a = InfosetId::new(0, 0);
        assert_eq!(support.remove_action(a, 1), Ok(true));
        assert_eq!(support.remove_action(a, 1), Ok(false));
        assert_eq!(support.actions(a), &[0, 2]);
        assert_eq!(support.position(a, 2), Some(1));
        assert_eq!(support.infoset_range(InfosetId::new(1, 0)), 2..4);

        let b = InfosetId::new(1, 0);
        support.remove_action(b, 0).unwrap();
        assert_eq!(support.remove_action(b, 1), Err(EfgError::LastAction(b)));
        assert!(matches!(
            support.remove_action(b, 7),
            Err(EfgError::UnknownAction { action: 7, .. })
        ));
    }
}
