//! Liapunov-function search for Nash equilibria.
//!
//! # Overview
//!
//! The Liapunov function of a game maps a behavior profile to a
//! non-negative number that is zero exactly at the Nash equilibria. The
//! search minimizes it:
//! 1. Start from a profile (the caller's first, random ones afterwards)
//! 2. Minimize with Powell's method along directions that keep every
//!    infoset's probabilities summing to one
//! 3. Record every attempt that converges as a solution
//!
//! Games with marked subgames can instead be solved one subgame at a time
//! with [`SubgameDecomposition`], which keeps each minimization small.
//!
//! # Example
//!
//! ```
//! use efg_liap::efg::BehavProfile;
//! use efg_liap::games::entry_deterrence;
//! use efg_liap::liap::{LiapParams, LiapSolver};
//!
//! let start = BehavProfile::new(entry_deterrence().unwrap());
//! let mut solver = LiapSolver::new(LiapParams::default().with_tries(20).with_seed(3));
//! let mut solutions = Vec::new();
//! let stats = solver.solve(&start, &mut solutions);
//!
//! assert!(stats.evaluations > 0);
//! for solution in &solutions {
//!     println!("{:?} at {:e}", solution.profile().as_slice(), solution.liap_value());
//! }
//! ```
//!
//! # Cancellation
//!
//! [`LiapParams::status`] is a shared [`Status`] flag. The driver checks it
//! before and after every attempt and the minimizer before every sweep. The
//! driver consumes the request when it stops, so one request stops one
//! search.

pub mod config;
pub mod objective;
pub mod powell;
pub mod project;
pub mod solution;
pub mod solver;
pub mod status;
pub mod subgame;

pub use config::{ConfigError, LiapParams, LiapStats};
pub use objective::{liap_value, LiapFunction, Objective};
pub use powell::{powell, PowellConfig, PowellOutcome};
pub use project::project;
pub use solution::{Algorithm, BehavSolution, InfosetExport, SolutionExport};
pub use solver::{init_matrix, liap, pick_random_profile, LiapSolver};
pub use status::Status;
pub use subgame::{SubgameDecomposition, SubgameOutcome, SubgameReport};
