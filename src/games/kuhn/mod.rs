//! Kuhn Poker as an extensive-form game tree.
//!
//! Kuhn Poker is a three-card poker game small enough to write out in full,
//! with a known one-parameter family of Nash equilibria. It makes a good
//! check for the Liapunov search: every member of the family has Liapunov
//! value zero.
//!
//! ## Game Rules
//!
//! - 3 cards: Jack (0), Queen (1), King (2)
//! - 2 players, each antes 1 chip
//! - Each player receives 1 card
//! - Player 1 acts first: Pass or Bet (1 chip)
//! - Player 2 responds based on P1's action
//! - Higher card wins at showdown
//!
//! ## Game Tree
//!
//! ```text
//! Chance (6 deals, 1/6 each)
//! └── P1
//!     ├── Pass
//!     │   └── P2
//!     │       ├── Pass → Showdown (±1)
//!     │       └── Bet
//!     │           └── P1
//!     │               ├── Pass → P2 wins (1)
//!     │               └── Bet → Showdown (±2)
//!     └── Bet
//!         └── P2
//!             ├── Pass → P1 wins (1)
//!             └── Bet → Showdown (±2)
//! ```
//!
//! ## Known Nash Equilibria
//!
//! For any α in [0, 1/3]:
//! - **Player 1 with Jack**: Bet with probability α, fold to a bet
//! - **Player 1 with Queen**: Always Pass, call a bet with probability α + 1/3
//! - **Player 1 with King**: Bet with probability 3α, always call
//! - **Player 2 after a Pass**: Bet with Jack 1/3, Queen never, King always
//! - **Player 2 facing Bet**: Call with Jack never, Queen 1/3, King always
//!
//! **Expected Value**: Player 1 EV = -1/18 ≈ -0.0556

use std::sync::Arc;

use crate::efg::{BehavProfile, Efg, EfgError, InfosetId, NodeId};

/// Card names, lowest first.
pub const CARDS: [&str; 3] = ["J", "Q", "K"];

/// Player 1's expected value at every equilibrium.
pub const KUHN_VALUE: f64 = -1.0 / 18.0;

/// Action index of Pass (check, or fold when facing a bet).
pub const PASS: usize = 0;

/// Action index of Bet (bet, or call when facing a bet).
pub const BET: usize = 1;

/// Player 1's first decision holding `card`.
pub const fn opening(card: usize) -> InfosetId {
    InfosetId::new(0, card)
}

/// Player 1 facing a bet after passing, holding `card`.
pub const fn facing_delayed_bet(card: usize) -> InfosetId {
    InfosetId::new(0, 3 + card)
}

/// Player 2 after Player 1 passes, holding `card`.
pub const fn facing_pass(card: usize) -> InfosetId {
    InfosetId::new(1, card)
}

/// Player 2 facing Player 1's bet, holding `card`.
pub const fn facing_bet(card: usize) -> InfosetId {
    InfosetId::new(1, 3 + card)
}

/// Build the Kuhn Poker tree.
///
/// Deals are ordered by Player 1's card, then Player 2's. Every infoset has
/// actions `["Pass", "Bet"]`.
pub fn kuhn_poker() -> Result<Arc<Efg>, EfgError> {
    let mut game = Efg::new(&["Player 1", "Player 2"]).with_title("Kuhn Poker");
    let actions = ["Pass", "Bet"];

    for player in 0..2 {
        for suffix in [["", ":p"], [":pb", ":b"]] {
            for card in CARDS {
                game.add_infoset(player, &format!("{}{}", card, suffix[player]), &actions)?;
            }
        }
    }

    let deals: Vec<(usize, usize)> = (0..3)
        .flat_map(|c1| (0..3).filter(move |&c2| c2 != c1).map(move |c2| (c1, c2)))
        .collect();
    let nodes = game.set_chance(game.root(), &vec![1.0 / deals.len() as f64; deals.len()])?;

    for (&node, &(c1, c2)) in nodes.iter().zip(&deals) {
        deal(&mut game, node, c1, c2)?;
    }
    Ok(Arc::new(game))
}

fn deal(game: &mut Efg, node: NodeId, c1: usize, c2: usize) -> Result<(), EfgError> {
    let showdown = |stake: f64| {
        if c1 > c2 {
            [stake, -stake]
        } else {
            [-stake, stake]
        }
    };

    let first = game.set_decision(node, opening(c1))?;

    let after_pass = game.set_decision(first[PASS], facing_pass(c2))?;
    game.set_payoffs(after_pass[PASS], &showdown(1.0))?;
    let delayed = game.set_decision(after_pass[BET], facing_delayed_bet(c1))?;
    game.set_payoffs(delayed[PASS], &[-1.0, 1.0])?;
    game.set_payoffs(delayed[BET], &showdown(2.0))?;

    let after_bet = game.set_decision(first[BET], facing_bet(c2))?;
    game.set_payoffs(after_bet[PASS], &[1.0, -1.0])?;
    game.set_payoffs(after_bet[BET], &showdown(2.0))?;
    Ok(())
}

/// The equilibrium with Jack bluffing probability `alpha`.
///
/// `game` must come from [`kuhn_poker`]. `alpha` is clamped to [0, 1/3].
pub fn kuhn_equilibrium(game: Arc<Efg>, alpha: f64) -> BehavProfile {
    let alpha = alpha.clamp(0.0, 1.0 / 3.0);
    let bets = [
        (opening(0), alpha),
        (opening(1), 0.0),
        (opening(2), 3.0 * alpha),
        (facing_delayed_bet(0), 0.0),
        (facing_delayed_bet(1), alpha + 1.0 / 3.0),
        (facing_delayed_bet(2), 1.0),
        (facing_pass(0), 1.0 / 3.0),
        (facing_pass(1), 0.0),
        (facing_pass(2), 1.0),
        (facing_bet(0), 0.0),
        (facing_bet(1), 1.0 / 3.0),
        (facing_bet(2), 1.0),
    ];

    let mut profile = BehavProfile::new(game);
    for (iset, bet) in bets {
        profile.set(iset, PASS, 1.0 - bet);
        profile.set(iset, BET, bet);
    }
    profile
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::efg::NodeKind;
    use crate::liap::liap_value;

    #[test]
    fn test_kuhn_game_tree() {
        let game = kuhn_poker().unwrap();
        assert_eq!(game.title(), "Kuhn Poker");
        assert_eq!(game.num_nodes(), 55);
        assert_eq!(game.num_infosets(0), 6);
        assert_eq!(game.num_infosets(1), 6);
        assert_eq!(game.infoset(opening(2)).unwrap().label(), "K");
        assert_eq!(game.infoset(facing_bet(1)).unwrap().label(), "Q:b");
        assert_eq!(game.infoset(facing_delayed_bet(0)).unwrap().label(), "J:pb");
        // Each card is dealt to each player in two of the six deals.
        assert_eq!(game.infoset(facing_pass(0)).unwrap().members().len(), 2);
    }

    #[test]
    fn test_kuhn_terminal_payoffs() {
        let game = kuhn_poker().unwrap();
        // First deal is J vs Q.
        let deal = game.child(game.root(), 0).unwrap();
        let pass = game.child(deal, PASS).unwrap();
        let pp = game.child(pass, PASS).unwrap();
        let bet = game.child(deal, BET).unwrap();
        let bb = game.child(bet, BET).unwrap();
        let bp = game.child(bet, PASS).unwrap();

        let payoffs = |node| match game.node(node).unwrap().kind() {
            NodeKind::Terminal { payoffs } => payoffs.clone(),
            other => panic!("not terminal: {:?}", other),
        };
        assert_eq!(payoffs(pp), vec![-1.0, 1.0]);
        assert_eq!(payoffs(bb), vec![-2.0, 2.0]);
        assert_eq!(payoffs(bp), vec![1.0, -1.0]);
    }

    #[test]
    fn test_kuhn_no_proper_subgames() {
        let mut game = (*kuhn_poker().unwrap()).clone();
        game.mark_all_subgames();
        assert_eq!(game.marked_subgame_roots(), vec![game.root()]);
    }

    #[test]
    fn test_equilibrium_family() {
        let game = kuhn_poker().unwrap();
        for alpha in [0.0, 1.0 / 6.0, 1.0 / 3.0] {
            let profile = kuhn_equilibrium(Arc::clone(&game), alpha);
            assert!(liap_value(&profile) < 1e-12, "alpha = {}", alpha);
            assert!((profile.payoffs()[0] - KUHN_VALUE).abs() < 1e-12);
        }
    }

    #[test]
    fn test_deviation_is_penalized() {
        let game = kuhn_poker().unwrap();
        let mut profile = kuhn_equilibrium(game, 1.0 / 3.0);
        // Player 2 calls with the Jack.
        profile.set(facing_bet(0), PASS, 0.0);
        profile.set(facing_bet(0), BET, 1.0);
        assert!(liap_value(&profile) > 1e-3);

        let centroid = BehavProfile::new(kuhn_poker().unwrap());
        assert!(liap_value(&centroid) > 1e-3);
    }
}
