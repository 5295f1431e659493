//! numerical_stability — numerically robust parameter transforms.
//!
//! Purpose
//! -------
//! Collect numerically stable scalar transforms and the per-coordinate
//! bound maps that let an unconstrained optimizer (L-BFGS, Nelder–Mead)
//! estimate box-constrained model parameters.
//!
//! Key behaviors
//! -------------
//! - Provide stable scalar transforms (`safe_softplus`, `safe_logistic`
//!   and their inverses) mapping ℝ into `(0, ∞)` or `(0, 1)` without
//!   overflow/underflow.
//! - Describe each parameter's admissible region with [`ParamBound`] and
//!   map whole vectors between θ-space and model space.
//!
//! Invariants & assumptions
//! ------------------------
//! - All transforms assume finite `f64` inputs; shape validation happens in
//!   the model layer.
//! - `to_model` never produces a value on a bound: floors are strict and
//!   interval ends are approached only asymptotically.
//!
//! Conventions
//! -----------
//! - This module never logs or touches global state; it is pure numerical
//!   helpers suitable for use inside objective evaluations.

pub mod transformations;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::transformations::{
    BOUND_EPS, LOGIT_EPS, ParamBound, SATURATION_LOGIT, safe_logistic, safe_logit, safe_softplus,
    safe_softplus_inv, to_model_space, to_theta_space,
};

// ---- Optional convenience prelude for downstream crates -------------------

pub mod prelude {
    pub use super::transformations::{
        BOUND_EPS, ParamBound, safe_logistic, safe_softplus, to_model_space, to_theta_space,
    };
}
