//! Extensive-form game model.
//!
//! - [`Efg`]: the game tree (players, infosets, nodes, subgame marks)
//! - [`EfgSupport`]: which actions are active at each infoset
//! - [`BehavProfile`]: action probabilities over a support, with node values,
//!   realization probabilities and conditional payoffs
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use efg_liap::efg::{BehavProfile, Efg};
//!
//! let mut game = Efg::new(&["Alice"]);
//! let choose = game.add_infoset(0, "choose", &["Up", "Down"]).unwrap();
//! let kids = game.set_decision(game.root(), choose).unwrap();
//! game.set_payoffs(kids[0], &[3.0]).unwrap();
//! game.set_payoffs(kids[1], &[1.0]).unwrap();
//!
//! let profile = BehavProfile::new(Arc::new(game));
//! assert_eq!(profile.payoffs(), vec![2.0]);
//! ```

pub mod game;
pub mod profile;
pub mod support;

pub use game::{Efg, EfgError, Infoset, InfosetId, Node, NodeId, NodeKind};
pub use profile::BehavProfile;
pub use support::EfgSupport;
