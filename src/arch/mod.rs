//! arch — Gaussian ARCH(p) volatility baseline.
//!
//! Purpose
//! -------
//! Provide the conditional-variance benchmark for CAViaR fits: the ARCH(p)
//! variance recurrence, its Gaussian likelihood, a single-start L-BFGS fit
//! and the implied Gaussian VaR.
//!
//! Key behaviors
//! -------------
//! - [`model::ArchModel`] validates orders (pure ARCH only) and evaluates
//!   variances and the likelihood for a given `[ω, α...]`.
//! - [`model::ArchFit`] carries the estimate, the in-sample σ² path, VaR
//!   `σ[t]·Φ⁻¹(q)` and the one-step forecast.
//! - [`errors`] holds [`ArchError`] and [`ArchResult`].
//!
//! Invariants & assumptions
//! ------------------------
//! - Only σ²[t] for `t >= p` enter the likelihood and are required to be
//!   strictly positive.

pub mod errors;
pub mod model;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::errors::{ArchError, ArchResult};
pub use self::model::{ArchFit, ArchModel, ArchObjective};
