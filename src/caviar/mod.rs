//! caviar — Conditional Autoregressive Value-at-Risk models.
//!
//! Purpose
//! -------
//! Estimate time-varying conditional quantiles (VaR) of a return series with
//! the four CAViaR recurrences of Engle & Manganelli (adaptive, symmetric
//! absolute value, asymmetric slope, indirect GARCH), by regression
//! quantiles or by Asymmetric-Laplace maximum likelihood.
//!
//! Key behaviors
//! -------------
//! - [`core`]: validated data and spec, parameter bounds, recurrences, tick
//!   loss, options, hit diagnostics and the news-impact curve. No
//!   optimizer code.
//! - [`models`]: optimizer objectives, the multi-start RQ search, the ALD
//!   retry loop and the [`CaviarModel`] / [`FitResult`] pair.
//! - [`errors`]: [`CaviarError`] and [`CaviarResult`].
//!
//! Invariants & assumptions
//! ------------------------
//! - Return series are finite with at least two observations.
//! - `0 < quantile < 1`; β length matches the variant; the igarch radicand
//!   is strictly positive at every step.
//! - VaR sits on the return scale: a violation at `t` is `y[t] < VaR[t]`.
//!
//! Conventions
//! -----------
//! - Indexing is 0-based; `VaR[0]` is the starting value VaR₀ and the loss
//!   and likelihood sum over `t = 1..T-1`.
//! - Fits are pure: inputs are borrowed, the RNG is passed in, and the
//!   result is returned by value.
//!
//! Downstream usage
//! ----------------
//! 1. Wrap returns in [`ReturnSeries`].
//! 2. Build a [`CaviarSpec`] (variant, quantile, method, optional VaR₀).
//! 3. `CaviarModel::with_spec(spec).fit(&returns, &mut rng)`.
//! 4. Use `FitResult::var_in` for backtests ([`hit_rate`]) and
//!    `FitResult::predict(new, fit.var0_out)` out of sample.

pub mod core;
pub mod errors;
pub mod models;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::core::{
    data::ReturnSeries,
    diagnostics::{hit_rate, violations},
    news_impact::{default_grid, news_impact},
    options::{CaviarOptions, MleFitOptions, RefineOptions, SeedingOptions},
    recurrence::CaviarRecurrence,
    spec::{CaviarSpec, Method, Variant},
};
pub use self::errors::{CaviarError, CaviarResult};
pub use self::models::{CaviarModel, FitResult};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use rust_caviar::caviar::prelude::*;
//
// to import the main CAViaR surface in a single line.

pub mod prelude {
    pub use super::{
        CaviarError, CaviarModel, CaviarOptions, CaviarResult, CaviarSpec, FitResult, Method,
        ReturnSeries, Variant, hit_rate,
    };
}
