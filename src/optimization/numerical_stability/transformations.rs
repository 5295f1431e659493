//! Numerical stability utilities.
//!
//! Provides safe implementations of common nonlinear transforms
//! that are prone to overflow/underflow in naïve form, plus the
//! [`ParamBound`] mapping that turns a box-constrained estimation problem
//! into an unconstrained one.
//!
//! The scalar transforms use explicit cutoffs (`|x| > 20.0`) to keep `f64`
//! arithmetic in a well-conditioned regime.
//!
//! # Provided items
//! - [`BOUND_EPS`]: the strictly positive floor used for scale and
//!   variance-like parameters (1e-10).
//! - [`LOGIT_EPS`]: clamp applied before taking a logit so the inverse map
//!   stays finite at interval edges.
//! - [`SATURATION_LOGIT`]: |θ| beyond which an interval coordinate is pinned
//!   to its edge.
//! - [`safe_softplus`] / [`safe_softplus_inv`]: ℝ ↔ (0, ∞).
//! - [`safe_logistic`] / [`safe_logit`]: ℝ ↔ (0, 1).
//! - [`ParamBound`], [`to_model_space`], [`to_theta_space`]: per-coordinate
//!   bounds and their vector forms.
use ndarray::{Array1, ArrayView1};

/// Strictly positive floor for bounded-below parameters.
///
/// Scale parameters (the ALD τ) and variance-like intercepts are mapped to
/// `BOUND_EPS + softplus(θ)`, so they never touch zero.
pub const BOUND_EPS: f64 = 1e-10;

/// Clamp applied to unit-interval values before inverting the logistic.
pub const LOGIT_EPS: f64 = 1e-12;

/// Interval coordinates with `|θ|` above this sit within `e^-15` of an
/// edge, where the logistic slope is below 3.1e-7.
pub const SATURATION_LOGIT: f64 = 15.0;

/// Numerically stable softplus: `softplus(x) = ln(1 + exp(x))`.
///
/// - For sufficiently large `x`, `softplus(x) ≈ x`.
/// - Otherwise, it falls back to `ln1p(exp(x))`.
pub fn safe_softplus(x: f64) -> f64 {
    if x > 20.0 { x } else { x.exp().ln_1p() }
}

/// Stable inverse of softplus on `(0, ∞)`: solves for `t` in
/// `softplus(t) = x`, returning `t = ln(exp(x) - 1)`.
///
/// - For sufficiently large `x`, `ln(exp(x) - 1) ≈ x`.
/// - Otherwise, it uses `ln(expm1(x))`.
///
/// `x` must be finite and `> 0`.
pub fn safe_softplus_inv(x: f64) -> f64 {
    if x > 20.0 { x } else { x.exp_m1().ln() }
}

/// Numerically stable logistic `1 / (1 + exp(-x))`.
///
/// The branch on the sign of `x` keeps `exp` from overflowing for large
/// negative inputs.
pub fn safe_logistic(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}

/// Inverse of [`safe_logistic`] on `(0, 1)`: `ln(p) - ln(1 - p)`.
///
/// `p` is clamped into `[LOGIT_EPS, 1 - LOGIT_EPS]` first.
pub fn safe_logit(p: f64) -> f64 {
    let p = p.clamp(LOGIT_EPS, 1.0 - LOGIT_EPS);
    p.ln() - (-p).ln_1p()
}

/// Box constraint on a single model-space parameter.
///
/// Each variant defines a smooth bijection between an unconstrained
/// optimizer coordinate `θ ∈ ℝ` and the constrained model value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamBound {
    /// No constraint: the identity map.
    Free,
    /// `(floor, ∞)` via `floor + softplus(θ)`.
    Positive { floor: f64 },
    /// `(lower, upper)` via `lower + (upper - lower)·logistic(θ)`.
    Interval { lower: f64, upper: f64 },
}

impl ParamBound {
    /// Map an unconstrained coordinate into model space.
    pub fn to_model(&self, theta: f64) -> f64 {
        match *self {
            ParamBound::Free => theta,
            ParamBound::Positive { floor } => floor + safe_softplus(theta),
            ParamBound::Interval { lower, upper } => lower + (upper - lower) * safe_logistic(theta),
        }
    }

    /// Map a model-space value back to the unconstrained coordinate.
    ///
    /// Values on or outside the boundary are pulled just inside it first, so
    /// the result is always finite.
    pub fn to_theta(&self, value: f64) -> f64 {
        match *self {
            ParamBound::Free => value,
            ParamBound::Positive { floor } => {
                let excess = (value - floor).max(BOUND_EPS);
                safe_softplus_inv(excess)
            }
            ParamBound::Interval { lower, upper } => safe_logit((value - lower) / (upper - lower)),
        }
    }

    /// Whether `theta` pins an interval coordinate to one of its edges.
    ///
    /// `Free` and `Positive` coordinates never saturate.
    pub fn is_saturated(&self, theta: f64) -> bool {
        matches!(self, ParamBound::Interval { .. }) && theta.abs() > SATURATION_LOGIT
    }

    /// Clamp a raw draw into the closed hull of the bound.
    pub fn clamp(&self, value: f64) -> f64 {
        match *self {
            ParamBound::Free => value,
            ParamBound::Positive { floor } => value.max(floor),
            ParamBound::Interval { lower, upper } => value.clamp(lower, upper),
        }
    }
}

/// Apply [`ParamBound::to_model`] coordinate-wise.
///
/// `theta` and `bounds` must have the same length.
pub fn to_model_space(theta: ArrayView1<f64>, bounds: &[ParamBound]) -> Array1<f64> {
    theta.iter().zip(bounds).map(|(&t, b)| b.to_model(t)).collect()
}

/// Apply [`ParamBound::to_theta`] coordinate-wise.
///
/// `values` and `bounds` must have the same length.
pub fn to_theta_space(values: ArrayView1<f64>, bounds: &[ParamBound]) -> Array1<f64> {
    values.iter().zip(bounds).map(|(&v, b)| b.to_theta(v)).collect()
}
