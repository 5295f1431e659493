//! Errors for CAViaR models (input validation, recurrence invariants, and
//! optimizer failures).
//!
//! [`CaviarError`] is used across the Rust core and, behind the
//! `python-bindings` feature, converts to a Python `ValueError`.
//!
//! ## Conventions
//! - **Indices are 0-based** (match Rust/NumPy).
//! - Recurrence invariants are reported for the offending parameter vector
//!   and are never clamped away.
//! - Failures of a single multi-start seed carry the seed index and the
//!   refinement pass in which they happened.
use crate::optimization::errors::OptError;

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

/// Result alias for CAViaR operations that may produce [`CaviarError`].
pub type CaviarResult<T> = Result<T, CaviarError>;

/// Unified error type for CAViaR modeling.
#[derive(Debug, Clone, PartialEq)]
pub enum CaviarError {
    // ---- Input/data validation ----
    /// Return series must hold at least two observations.
    SeriesTooShort { len: usize, min: usize },

    /// A data point is NaN/±inf.
    NonFiniteData { index: usize, value: f64 },

    /// Two aligned series have different lengths.
    LengthMismatch { expected: usize, actual: usize },

    // ---- Spec validation ----
    /// Quantile must lie strictly inside (0, 1).
    InvalidQuantile { value: f64 },

    /// Smoothing constant G must be finite and > 0.
    InvalidSmoothing { value: f64 },

    /// VaR₀ must be finite.
    InvalidVar0 { value: f64 },

    /// Unknown model variant name.
    UnsupportedModel { name: String },

    /// Unknown estimation method name.
    UnsupportedMethod { name: String },

    /// Option value is out of range.
    InvalidOption { name: &'static str, reason: &'static str },

    // ---- Recurrence invariants ----
    /// β length does not match the model variant.
    InvalidParameterDimension { expected: usize, actual: usize },

    /// igarch radicand was not strictly positive (or not finite) at `t`.
    NonPositiveVariance { t: usize, value: f64 },

    // ---- Estimation ----
    /// A local optimizer failed while refining one seed.
    OptimizationFailure { seed: usize, iteration: usize, reason: String },

    /// Maximum-likelihood fitting kept breaking down numerically.
    NumericalInstability { resamples: usize, reason: String },

    /// Every random draw produced an invalid loss, so no seed survived.
    NoViableSeeds { draws: usize },

    /// Optimizer error surfaced outside the seed/retry policies.
    Optimizer(OptError),
}

impl std::error::Error for CaviarError {}

impl std::fmt::Display for CaviarError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Input/data validation ----
            CaviarError::SeriesTooShort { len, min } => {
                write!(f, "Return series too short: length {len}, need at least {min}")
            }
            CaviarError::NonFiniteData { index, value } => {
                write!(f, "Non-finite return at index {index}: {value}")
            }
            CaviarError::LengthMismatch { expected, actual } => {
                write!(f, "Length mismatch: expected {expected}, actual {actual}")
            }

            // ---- Spec validation ----
            CaviarError::InvalidQuantile { value } => {
                write!(f, "Invalid quantile {value}: must lie strictly in (0, 1)")
            }
            CaviarError::InvalidSmoothing { value } => {
                write!(f, "Invalid smoothing constant {value}: must be finite and > 0")
            }
            CaviarError::InvalidVar0 { value } => {
                write!(f, "Invalid VaR0 {value}: must be finite")
            }
            CaviarError::UnsupportedModel { name } => {
                write!(
                    f,
                    "Unsupported CAViaR model '{name}': expected one of adaptive, symmetric, \
                     asymmetric, igarch"
                )
            }
            CaviarError::UnsupportedMethod { name } => {
                write!(f, "Unsupported estimation method '{name}': expected 'mle' or 'rq'")
            }
            CaviarError::InvalidOption { name, reason } => {
                write!(f, "Invalid option '{name}': {reason}")
            }

            // ---- Recurrence invariants ----
            CaviarError::InvalidParameterDimension { expected, actual } => {
                write!(f, "Invalid parameter dimension: expected {expected}, actual {actual}")
            }
            CaviarError::NonPositiveVariance { t, value } => {
                write!(f, "Non-positive igarch radicand at t = {t}: {value}")
            }

            // ---- Estimation ----
            CaviarError::OptimizationFailure { seed, iteration, reason } => {
                write!(f, "Optimization failed for seed {seed} at pass {iteration}: {reason}")
            }
            CaviarError::NumericalInstability { resamples, reason } => {
                write!(f, "Numerical instability after {resamples} resamples: {reason}")
            }
            CaviarError::NoViableSeeds { draws } => {
                write!(f, "No viable seeds among {draws} random draws")
            }
            CaviarError::Optimizer(err) => write!(f, "Optimizer error: {err}"),
        }
    }
}

impl From<OptError> for CaviarError {
    fn from(err: OptError) -> Self {
        match err {
            OptError::ThetaLengthMismatch { expected, actual } => {
                CaviarError::InvalidParameterDimension { expected, actual }
            }
            OptError::NonPositiveVariance { t, value } => {
                CaviarError::NonPositiveVariance { t, value }
            }
            other => CaviarError::Optimizer(other),
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<CaviarError> for PyErr {
    fn from(err: CaviarError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}
