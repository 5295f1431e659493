//! models — CAViaR estimators and the fitted-model result.
//!
//! Purpose
//! -------
//! Wire the pure building blocks of `caviar::core` to the argmin-backed
//! optimizer layer: optimizer objectives over the recurrence, the
//! multi-start regression-quantile search, the Asymmetric-Laplace retry
//! loop, and the [`CaviarModel`] facade that returns a [`FitResult`].
//!
//! Key behaviors
//! -------------
//! - [`objectives`]: [`RqObjective`] (tick loss over β) and [`AldObjective`]
//!   (ALD negative log-likelihood over unconstrained θ).
//! - [`multi_start`]: random seeding, alternating Nelder–Mead / L-BFGS
//!   refinement and best-seed selection.
//! - [`ald_mle`]: bounded L-BFGS with warm restarts and resampling.
//! - [`caviar`]: spec + options → fit; [`fit`]: estimates, VaR path,
//!   out-of-sample continuation.
//!
//! Invariants & assumptions
//! ------------------------
//! - Every random number comes from the caller's RNG.
//! - Recurrence faults are never clamped; they fail the parameter vector
//!   that caused them and are handled by the seed/retry policies.
//!
//! Testing notes
//! -------------
//! - Unit tests per submodule use small synthetic series and
//!   `rand_chacha::ChaCha8Rng` for reproducible draws.
//! - End-to-end scenarios live in `tests/integration_caviar_pipeline.rs`.

pub mod ald_mle;
pub mod caviar;
pub mod fit;
pub mod multi_start;
pub mod objectives;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::ald_mle::{MleEstimate, fit_ald};
pub use self::caviar::CaviarModel;
pub use self::fit::FitResult;
pub use self::multi_start::{Candidate, RefinedSeed, draw_seeds, multi_start, refine_seed};
pub use self::objectives::{AldObjective, RqObjective};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use rust_caviar::caviar::models::prelude::*;
//
// to import the main CAViaR model surface in a single line.

pub mod prelude {
    pub use super::caviar::CaviarModel;
    pub use super::fit::FitResult;
}
