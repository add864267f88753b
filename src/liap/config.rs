//! Configuration options for the Liapunov search.
//!
//! This module provides the parameter bundle passed through the whole solve
//! (restart policy, minimizer caps and tolerances, cancellation handle) and
//! the statistics a search reports back.

use std::fs;
use std::path::Path;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::liap::powell::PowellConfig;
use crate::liap::status::Status;

/// Parameters for a Liapunov equilibrium search.
///
/// # Example
/// ```
/// use efg_liap::liap::LiapParams;
///
/// let params = LiapParams::default().with_tries(25).with_seed(7);
/// assert_eq!(params.stop_after, 1);
/// assert!(params.validate().is_ok());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LiapParams {
    /// Logging verbosity.
    ///
    /// 0 is quiet, 1 logs one line per restart at debug level, 2 also logs
    /// every Powell sweep at trace level.
    pub trace: u32,

    /// Number of minimization attempts. The first starts from the caller's
    /// profile, every later one from a freshly sampled random profile.
    pub n_tries: usize,

    /// Stop once the solution list holds this many entries (0 = never).
    pub stop_after: usize,

    /// Iteration cap for each line minimization.
    pub maxits1: usize,

    /// Relative tolerance for each line minimization.
    pub tol1: f64,

    /// Cap on Powell sweeps per attempt.
    pub maxits_n: usize,

    /// Convergence tolerance on the objective value.
    pub tol_n: f64,

    /// Seed for the restart sampler. `None` seeds from entropy.
    pub seed: Option<u64>,

    /// Cancellation handle shared with the caller.
    #[serde(skip)]
    pub status: Status,
}

impl Default for LiapParams {
    fn default() -> Self {
        Self {
            trace: 0,
            n_tries: 10,
            stop_after: 1,
            maxits1: 100,
            tol1: 2.0e-10,
            maxits_n: 20,
            tol_n: 1.0e-10,
            seed: None,
            status: Status::new(),
        }
    }
}

impl LiapParams {
    /// Create parameters with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the number of attempts.
    pub fn with_tries(mut self, n_tries: usize) -> Self {
        self.n_tries = n_tries;
        self
    }

    /// Builder method: set the target solution count (0 = unbounded).
    pub fn with_stop_after(mut self, stop_after: usize) -> Self {
        self.stop_after = stop_after;
        self
    }

    /// Builder method: set the line-minimization cap and tolerance.
    pub fn with_line_search(mut self, maxits: usize, tol: f64) -> Self {
        self.maxits1 = maxits;
        self.tol1 = tol;
        self
    }

    /// Builder method: set the Powell sweep cap and tolerance.
    pub fn with_powell(mut self, maxits: usize, tol: f64) -> Self {
        self.maxits_n = maxits;
        self.tol_n = tol;
        self
    }

    /// Builder method: set the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Builder method: set the trace level.
    pub fn with_trace(mut self, trace: u32) -> Self {
        self.trace = trace;
        self
    }

    /// Builder method: share a cancellation handle.
    pub fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    /// The minimizer settings carried by these parameters.
    pub fn powell(&self) -> PowellConfig {
        PowellConfig {
            maxits1: self.maxits1,
            tol1: self.tol1,
            maxits_n: self.maxits_n,
            tol_n: self.tol_n,
            trace: self.trace,
        }
    }

    /// A random source seeded from [`seed`](Self::seed), or from entropy
    /// when no seed is set.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    /// Validate the parameters and return any errors.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.maxits1 == 0 {
            return Err(ConfigError::ZeroIterations("maxits1"));
        }
        if self.maxits_n == 0 {
            return Err(ConfigError::ZeroIterations("maxits_n"));
        }
        if !(self.tol1.is_finite() && self.tol1 > 0.0) {
            return Err(ConfigError::InvalidTolerance("tol1", self.tol1));
        }
        if !(self.tol_n.is_finite() && self.tol_n > 0.0) {
            return Err(ConfigError::InvalidTolerance("tol_n", self.tol_n));
        }
        Ok(())
    }

    /// Parse and validate parameters from JSON. Missing fields take their
    /// default values.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let params: Self = serde_json::from_str(json)?;
        params.validate()?;
        Ok(params)
    }

    /// Load and validate parameters from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Errors that can occur when loading or validating parameters.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An iteration cap is zero.
    #[error("{0} must be at least 1")]
    ZeroIterations(&'static str),
    /// A tolerance is not a positive finite number.
    #[error("{0} tolerance {1} must be positive and finite")]
    InvalidTolerance(&'static str, f64),
    /// The JSON could not be parsed.
    #[error("invalid parameter JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// The parameter file could not be read.
    #[error("cannot read parameter file: {0}")]
    Io(#[from] std::io::Error),
}

/// Statistics reported by one search.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LiapStats {
    /// Whether the solution list is non-empty after the search.
    pub found: bool,

    /// Solutions appended by this search.
    pub solutions: usize,

    /// Objective evaluations performed.
    pub evaluations: u64,

    /// Powell sweeps performed, summed over attempts.
    pub iterations: u64,

    /// Minimization attempts started.
    pub attempts: usize,

    /// Whether the search stopped on a cancellation request.
    pub cancelled: bool,

    /// Wall-clock time spent (in seconds).
    pub elapsed_seconds: f64,
}

impl LiapStats {
    /// Create empty stats.
    pub fn new() -> Self {
        Self::default()
    }
}
