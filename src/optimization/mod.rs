//! optimization — objective minimization, parameter transforms, and a
//! unified error surface.
//!
//! Purpose
//! -------
//! Provide a cohesive optimization layer for model fitting, combining an
//! Argmin-backed objective optimizer, numerically stable parameter
//! transforms, and a single error/result surface. Callers implement an
//! objective, choose tolerances, and obtain fitted parameters and
//! diagnostics without touching backend solver details.
//!
//! Key behaviors
//! -------------
//! - Expose a high-level API for **minimizing** costs `c(θ)`
//!   (`objective_optimizer`) with either L-BFGS or Nelder–Mead.
//! - Supply shared numerical primitives (`numerical_stability`) for mapping
//!   unconstrained parameters into bounded model space.
//! - Normalize configuration issues, numerical failures, and backend solver
//!   errors into a single enum (`errors::OptError`) with a common result
//!   alias (`OptResult<T>`).
//!
//! Conventions
//! -----------
//! - Optimizers operate in an unconstrained parameter space `θ`; model
//!   bounds are enforced by the transforms in `numerical_stability`, never
//!   by the solvers.
//! - Public optimization entrypoints that can fail return `OptResult<T>`;
//!   callers never see raw Argmin errors.
//! - This module does not log. Progress reporting belongs to the model
//!   layer (`tracing` events) or the optional `obs_slog` observer.

pub mod errors;
pub mod numerical_stability;
pub mod objective_optimizer;

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use rust_caviar::optimization::prelude::*;
//
// to import the main optimization surface in a single line.

pub mod prelude {
    pub use super::errors::{OptError, OptResult};
    pub use super::numerical_stability::prelude::*;
    pub use super::objective_optimizer::prelude::*;
}
