//! objective_optimizer — argmin-powered minimization of model objectives.
//!
//! Purpose
//! -------
//! Provide a high-level, Argmin-backed optimization layer for **minimizing**
//! model costs `c(θ)`: quantile-regression tick losses and negative
//! log-likelihoods. Callers implement a single trait, [`Objective`], and
//! invoke either [`minimize`] (L-BFGS with a configurable line search) or
//! [`minimize_simplex`] (derivative-free Nelder–Mead).
//!
//! Key behaviors
//! -------------
//! - Bridge user objectives into Argmin via [`adapter::ArgMinAdapter`]
//!   (gradient-based, finite-difference fallback) and
//!   [`adapter::SimplexAdapter`] (infeasible points score `+∞`).
//! - Build solvers from validated configuration ([`LbfgsOptions`],
//!   [`Tolerances`], [`SimplexOptions`]) in [`builders`].
//! - Execute solvers in [`run`] and normalize results into an
//!   [`OptimOutcome`].
//!
//! Invariants & assumptions
//! ------------------------
//! - Parameters live in an unconstrained optimizer space as [`Theta`]
//!   (`Array1<f64>`). Any mapping into bounded model space happens in the
//!   model layer via `numerical_stability`.
//! - [`Objective::cost`] and [`Objective::grad`] report invalid inputs as
//!   recoverable [`OptError`] values, not panics.
//! - [`OptimOutcome::converged`] is `true` only when the solver's own
//!   convergence test fired.
//!
//! Testing notes
//! -------------
//! - Unit tests in submodules cover gradient fallback and infeasibility
//!   handling in [`adapter`], solver construction in [`builders`],
//!   configuration invariants in [`traits`] and end-to-end toy solves in
//!   [`api`].
//!
//! [`OptError`]: crate::optimization::errors::OptError

pub mod adapter;
pub mod api;
pub mod builders;
pub mod run;
pub mod traits;
pub mod types;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::api::{minimize, minimize_simplex};
pub use self::traits::{
    LbfgsOptions, LineSearcher, Objective, OptimOutcome, SimplexOptions, Tolerances,
};
pub use self::types::{Cost, DEFAULT_LBFGS_MEM, FnEvalMap, Grad, Theta};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use rust_caviar::optimization::objective_optimizer::prelude::*;
//
// to import the main optimizer surface in a single line.

pub mod prelude {
    pub use super::api::{minimize, minimize_simplex};
    pub use super::traits::{LbfgsOptions, Objective, OptimOutcome, SimplexOptions, Tolerances};
    pub use super::types::{Cost, Grad, Theta};
}
