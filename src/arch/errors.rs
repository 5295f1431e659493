//! Errors for the ARCH baseline model.
//!
//! [`ArchError`] covers order validation, variance positivity and optimizer
//! failures. Behind the `python-bindings` feature it converts to a Python
//! `ValueError`.
use crate::optimization::errors::OptError;
use statrs::distribution::NormalError;

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

/// Result alias for ARCH operations.
pub type ArchResult<T> = Result<T, ArchError>;

#[derive(Debug, Clone, PartialEq)]
pub enum ArchError {
    // ---- Model order ----
    /// Only pure ARCH(p) is supported; GARCH lags must be zero.
    UnsupportedModel { q: usize },

    /// ARCH order must be at least one.
    InvalidLagOrder { p: usize },

    // ---- Data ----
    /// The series must be longer than the ARCH order.
    SeriesTooShort { len: usize, p: usize },

    /// σ²[t] was not strictly positive (or not finite) at an in-likelihood index.
    NonPositiveVariance { t: usize, value: f64 },

    /// Parameter vector does not have length `p + 1`.
    ParamLengthMismatch { expected: usize, actual: usize },

    /// Quantile must lie strictly inside (0, 1).
    InvalidQuantile { value: f64 },

    /// Wrapper for statrs::distribution::NormalError
    InvalidNormalParam,

    // ---- Estimation ----
    /// The single L-BFGS run failed.
    OptimizationFailure { reason: String },

    /// Optimizer error surfaced outside the fit.
    Optimizer(OptError),
}

impl std::error::Error for ArchError {}

impl std::fmt::Display for ArchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArchError::UnsupportedModel { q } => {
                write!(f, "Only ARCH models are supported: q must be 0, got {q}")
            }
            ArchError::InvalidLagOrder { p } => {
                write!(f, "ARCH order p must be at least 1, got {p}")
            }
            ArchError::SeriesTooShort { len, p } => {
                write!(f, "Series of length {len} is too short for ARCH({p})")
            }
            ArchError::NonPositiveVariance { t, value } => {
                write!(f, "Non-positive conditional variance at index {t}: {value}")
            }
            ArchError::ParamLengthMismatch { expected, actual } => {
                write!(f, "ARCH parameter length mismatch: expected {expected}, actual {actual}")
            }
            ArchError::InvalidQuantile { value } => {
                write!(f, "Quantile must lie strictly in (0, 1), got {value}")
            }
            ArchError::InvalidNormalParam => {
                write!(f, "Invalid normal distribution parameters")
            }
            ArchError::OptimizationFailure { reason } => {
                write!(f, "ARCH optimization failed: {reason}")
            }
            ArchError::Optimizer(err) => write!(f, "Optimizer error: {err}"),
        }
    }
}

impl From<NormalError> for ArchError {
    fn from(_: NormalError) -> ArchError {
        ArchError::InvalidNormalParam
    }
}

impl From<OptError> for ArchError {
    fn from(err: OptError) -> Self {
        match err {
            OptError::ThetaLengthMismatch { expected, actual } => {
                ArchError::ParamLengthMismatch { expected, actual }
            }
            OptError::NonPositiveVariance { t, value } => {
                ArchError::NonPositiveVariance { t, value }
            }
            other => ArchError::Optimizer(other),
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<ArchError> for PyErr {
    fn from(err: ArchError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}
