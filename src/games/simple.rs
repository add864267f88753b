//! Small games with known equilibria.

use std::sync::Arc;

use crate::efg::{Efg, EfgError};

/// One player picks one of `payoffs.len()` actions and receives the
/// matching payoff. Actions are named `a1`, `a2`, ...
pub fn one_player_choice(payoffs: &[f64]) -> Result<Arc<Efg>, EfgError> {
    let mut game = Efg::new(&["Player"]).with_title("One-player choice");
    let names: Vec<String> = (1..=payoffs.len()).map(|k| format!("a{}", k)).collect();
    let actions: Vec<&str> = names.iter().map(String::as_str).collect();
    let iset = game.add_infoset(0, "choice", &actions)?;
    let kids = game.set_decision(game.root(), iset)?;
    for (&kid, &u) in kids.iter().zip(payoffs) {
        game.set_payoffs(kid, &[u])?;
    }
    Ok(Arc::new(game))
}

/// Matching pennies played in sequence, with the second mover unable to
/// see the first move. The unique equilibrium mixes 50/50 on both sides.
pub fn matching_pennies() -> Result<Arc<Efg>, EfgError> {
    let mut game = Efg::new(&["Matcher", "Mismatcher"]).with_title("Matching pennies");
    let first = game.add_infoset(0, "first", &["Heads", "Tails"])?;
    let second = game.add_infoset(1, "second", &["Heads", "Tails"])?;

    let coins = game.set_decision(game.root(), first)?;
    for (i, &coin) in coins.iter().enumerate() {
        let replies = game.set_decision(coin, second)?;
        for (j, &reply) in replies.iter().enumerate() {
            let u = if i == j { 1.0 } else { -1.0 };
            game.set_payoffs(reply, &[u, -u])?;
        }
    }
    Ok(Arc::new(game))
}

/// An entrant decides whether to enter a market held by an incumbent, who
/// then fights or accommodates.
///
/// The incumbent's decision node is marked as a subgame root. The subgame
/// perfect equilibrium is (In, Accommodate); (Out, Fight) is a further
/// Nash equilibrium supported by the incumbent's threat.
pub fn entry_deterrence() -> Result<Arc<Efg>, EfgError> {
    let mut game = Efg::new(&["Entrant", "Incumbent"]).with_title("Entry deterrence");
    let enter = game.add_infoset(0, "enter", &["Out", "In"])?;
    let respond = game.add_infoset(1, "respond", &["Fight", "Accommodate"])?;

    let kids = game.set_decision(game.root(), enter)?;
    game.set_payoffs(kids[0], &[0.0, 2.0])?;
    let market = game.set_decision(kids[1], respond)?;
    game.set_payoffs(market[0], &[-1.0, -1.0])?;
    game.set_payoffs(market[1], &[1.0, 1.0])?;
    game.mark_subgame(kids[1])?;
    Ok(Arc::new(game))
}

/// Chance picks one of two games with equal probability: in the first,
/// player 1 picks `a1` (payoff 2) or `a2` (payoff 1); in the second,
/// player 2 picks `b1` (payoff 1) or `b2` (payoff 3). Every legal subgame
/// root is marked, so the game splits into two independent subgames below
/// the chance move.
pub fn independent_subgames() -> Result<Arc<Efg>, EfgError> {
    let mut game = Efg::new(&["Left", "Right"]).with_title("Independent subgames");
    let left = game.add_infoset(0, "left", &["a1", "a2"])?;
    let right = game.add_infoset(1, "right", &["b1", "b2"])?;

    let halves = game.set_chance(game.root(), &[0.5, 0.5])?;
    let a = game.set_decision(halves[0], left)?;
    game.set_payoffs(a[0], &[2.0, 0.0])?;
    game.set_payoffs(a[1], &[1.0, 0.0])?;
    let b = game.set_decision(halves[1], right)?;
    game.set_payoffs(b[0], &[0.0, 1.0])?;
    game.set_payoffs(b[1], &[0.0, 3.0])?;
    game.mark_all_subgames();
    Ok(Arc::new(game))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::efg::{BehavProfile, InfosetId};
    use crate::liap::liap_value;

    #[test]
    fn test_one_player_choice() {
        let game = one_player_choice(&[3.0, 1.0, 2.0]).unwrap();
        assert_eq!(game.infoset(InfosetId::new(0, 0)).unwrap().actions(), &["a1", "a2", "a3"]);
        let mut profile = BehavProfile::new(game);
        assert!((profile.payoffs()[0] - 2.0).abs() < 1e-12);
        profile.copy_from_slice(&[1.0, 0.0, 0.0]);
        assert_eq!(liap_value(&profile), 0.0);

        assert!(matches!(one_player_choice(&[]), Err(EfgError::NoActions(_))));
    }

    #[test]
    fn test_matching_pennies_equilibrium() {
        let game = matching_pennies().unwrap();
        let profile = BehavProfile::new(game);
        assert_eq!(liap_value(&profile), 0.0);

        let mut skewed = profile.clone();
        skewed.copy_from_slice(&[0.7, 0.3, 0.5, 0.5]);
        assert!(liap_value(&skewed) > 0.0);
    }

    #[test]
    fn test_entry_deterrence() {
        let game = entry_deterrence().unwrap();
        assert_eq!(game.marked_subgame_roots(), vec![2, 0]);

        let mut profile = BehavProfile::new(game);
        profile.copy_from_slice(&[0.0, 1.0, 0.0, 1.0]);
        assert_eq!(liap_value(&profile), 0.0);
        profile.copy_from_slice(&[1.0, 0.0, 1.0, 0.0]);
        assert_eq!(liap_value(&profile), 0.0);
    }

    #[test]
    fn test_independent_subgames() {
        let game = independent_subgames().unwrap();
        assert_eq!(game.marked_subgame_roots(), vec![1, 2, 0]);
        let mut profile = BehavProfile::new(game);
        profile.copy_from_slice(&[1.0, 0.0, 0.0, 1.0]);
        assert_eq!(liap_value(&profile), 0.0);
        assert_eq!(profile.payoffs(), vec![1.0, 1.5]);
    }
}
