//! Reference game trees.
//!
//! These games have known equilibria and serve as:
//!
//! 1. **Validation**: every known equilibrium must have Liapunov value zero,
//!    and the search should find one.
//!
//! 2. **Examples**: they show how to build an [`Efg`](crate::efg::Efg) with
//!    chance moves, imperfect information and subgame marks.
//!
//! 3. **Benchmarks**: Kuhn Poker is the standard workload in `benches/`.
//!
//! ## Available Games
//!
//! - [`kuhn`]: Kuhn Poker, with its one-parameter equilibrium family
//! - [`one_player_choice`]: a single decision among fixed payoffs
//! - [`matching_pennies`]: sequential matching pennies, second mover blind
//! - [`entry_deterrence`]: entry game with one proper subgame
//! - [`independent_subgames`]: two unrelated subgames under a chance move

pub mod kuhn;
mod simple;

pub use kuhn::{kuhn_equilibrium, kuhn_poker};
pub use simple::{entry_deterrence, independent_subgames, matching_pennies, one_player_choice};
