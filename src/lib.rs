//! # EFG Liap
//!
//! Nash equilibria of extensive-form games by Liapunov-function
//! minimization.
//!
//! ## Features
//!
//! - **Game Trees**: Players, information sets, chance moves, subgame marks
//! - **Liapunov Objective**: Zero exactly at the equilibria of a support
//! - **Powell Minimizer**: Derivative-free, with Brent line searches
//! - **Random Restarts**: Seeded, reproducible, cancellable
//! - **Subgame Decomposition**: Solve marked subgames bottom-up and compose
//!
//! ## Quick Start
//!
//! ```
//! use efg_liap::efg::BehavProfile;
//! use efg_liap::games::matching_pennies;
//! use efg_liap::liap::{LiapParams, LiapSolver};
//!
//! // 1. Build or load a game and a starting profile
//! let start = BehavProfile::new(matching_pennies().unwrap());
//!
//! // 2. Create a solver
//! let mut solver = LiapSolver::new(LiapParams::default().with_seed(7));
//!
//! // 3. Search
//! let mut solutions = Vec::new();
//! let stats = solver.solve(&start, &mut solutions);
//!
//! // 4. Inspect what was found
//! assert!(stats.found);
//! println!("{}", serde_json::to_string_pretty(&solutions[0].export()).unwrap());
//! ```
//!
//! ## Modules
//!
//! - [`efg`]: Game trees, supports and behavior profiles
//! - [`liap`]: The objective, minimizer, search driver and subgame solver
//! - [`linalg`]: Dense matrices and complex numbers
//! - [`games`]: Reference games (Kuhn Poker, etc.)
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │              SubgameDecomposition (optional)                    │
//! │  - Post-order subgame traversal  - Profile stitching            │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │ one search per subgame
//!                               ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                   Search driver (liap)                          │
//! │  - Random restarts        - Cancellation                        │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//!         ┌─────────────────────┼─────────────────────┐
//!         │                     │                     │
//!         ▼                     ▼                     ▼
//!    ┌─────────┐         ┌───────────┐         ┌───────────┐
//!    │ Powell  │────────▶│ Liapunov  │────────▶│ Behavior  │
//!    │         │         │ function  │         │ profile   │
//!    └─────────┘         └───────────┘         └───────────┘
//! ```

#![warn(missing_docs)]

/// Extensive-form game model.
pub mod efg;

/// Reference games.
///
/// Games with known equilibria for testing and benchmarking.
pub mod games;

/// Liapunov equilibrium search.
///
/// This is the core module containing the objective, the minimizer and
/// the search drivers.
pub mod liap;

/// Dense linear algebra helpers.
pub mod linalg;

// Re-export commonly used types at crate root for convenience
pub use efg::{BehavProfile, Efg, EfgError, EfgSupport, InfosetId};
pub use liap::{
    BehavSolution, LiapParams, LiapSolver, LiapStats, Status, SubgameDecomposition,
};
