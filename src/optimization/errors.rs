//! optimization::errors — unified error surface for the optimizer layer.
//!
//! Every failure that can occur while evaluating an objective, configuring a
//! solver, or running an Argmin executor is normalized into [`OptError`].
//! Model-layer errors raised inside objective evaluations (parameter-shape
//! mismatches, variance-positivity violations) are carried through the
//! backend unchanged so callers can still match on them after a run.
use argmin::core::{ArgminError, Error};

use crate::{arch::errors::ArchError, caviar::errors::CaviarError};

/// Crate-wide result alias for optimizer operations.
pub type OptResult<T> = Result<T, OptError>;

#[derive(Debug, Clone, PartialEq)]
pub enum OptError {
    // ---- Gradient ----
    /// Implies that FD should be used
    GradientNotImplemented,

    /// Gradient dimensions do not match parameter dimensions.
    GradientDimMismatch {
        expected: usize,
        found: usize,
    },

    /// Gradient elements need to be finite
    InvalidGradient {
        index: usize,
        value: f64,
        reason: &'static str,
    },

    // ---- LbfgsOptions / SimplexOptions ----
    /// Gradient tolerance needs to be positive and finite.
    InvalidTolGrad {
        tol: f64,
        reason: &'static str,
    },
    /// Cost change tolerance needs to be positive and finite.
    InvalidTolCost {
        tol: f64,
        reason: &'static str,
    },
    /// Maximum iterations needs to be positive.
    InvalidMaxIter {
        max_iter: usize,
        reason: &'static str,
    },
    /// At least one tolerance must be provided.
    NoTolerancesProvided,

    /// Invalid line searcher name.
    InvalidLineSearch {
        name: String,
        reason: &'static str,
    },

    /// lbfgs_mem needs to be at least 1.
    InvalidLBFGSMem {
        mem: usize,
        reason: &'static str,
    },

    /// Simplex standard-deviation tolerance needs to be positive and finite.
    InvalidSdTolerance {
        tol: f64,
        reason: &'static str,
    },

    /// Initial simplex steps need to be positive and finite.
    InvalidSimplexStep {
        step: f64,
        reason: &'static str,
    },

    /// Starting point for a local search must have at least one coordinate.
    EmptyTheta,

    // ---- Cost function ----
    /// Cost function returned a non-finite value.
    NonFiniteCost {
        value: f64,
    },

    // ---- Optimizer outcome ----
    /// Estimated parameters must be finite.
    InvalidThetaHat {
        index: usize,
        value: f64,
        reason: &'static str,
    },

    /// Theta hat is missing
    MissingThetaHat,

    // ---- Argmin ---
    /// Wrapper for argmin::InvalidParameter
    InvalidParameter {
        text: String,
    },
    /// Wrapper for argmin::NotImplemented
    NotImplemented {
        text: String,
    },
    /// Wrapper for argmin::NotInitialized
    NotInitialized {
        text: String,
    },
    /// Wrapper for argmin::ConditionViolated
    ConditionViolated {
        text: String,
    },
    /// Wrapper for argmin::CheckPointNotFound
    CheckPointNotFound {
        text: String,
    },
    /// Wrapper for argmin::PotentialBug
    PotentialBug {
        text: String,
    },
    /// Wrapper for argmin::ImpossibleError
    ImpossibleError {
        text: String,
    },
    /// Wrapper for other argmin::Error types
    BackendError {
        text: String,
    },

    // ---- Model errors raised inside objectives ----
    /// Parameter vector has the wrong length for the model.
    ThetaLengthMismatch {
        expected: usize,
        actual: usize,
    },

    /// A variance-like quantity (igarch radicand, ARCH σ²) was not strictly positive.
    NonPositiveVariance {
        t: usize,
        value: f64,
    },

    /// Unconstrained optimization input must have finite values.
    InvalidThetaInput {
        index: usize,
        value: f64,
    },

    /// Any other model-layer failure, carried as text.
    ModelError {
        text: String,
    },

    // ---- Fallback ----
    UnknownError,
}

impl OptError {
    /// Whether the error signals a numerical breakdown of a run (non-finite
    /// cost or gradient, failed line search, degenerate solver state) rather
    /// than a configuration or model-domain fault.
    ///
    /// Retry loops resample their starting point on these errors and
    /// propagate every other variant.
    pub fn is_numerical(&self) -> bool {
        self.is_search_breakdown()
            || matches!(
                self,
                OptError::NonFiniteCost { .. }
                    | OptError::InvalidThetaHat { .. }
                    | OptError::MissingThetaHat
                    | OptError::InvalidThetaInput { .. }
                    | OptError::BackendError { .. }
            )
    }

    /// Whether a quasi-Newton run stopped because its line search or search
    /// direction broke down (typical on non-smooth objectives), as opposed
    /// to the objective itself failing.
    pub fn is_search_breakdown(&self) -> bool {
        matches!(
            self,
            OptError::InvalidGradient { .. }
                | OptError::ConditionViolated { .. }
                | OptError::PotentialBug { .. }
        )
    }
}

impl std::error::Error for OptError {}

impl std::fmt::Display for OptError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Gradient ----
            OptError::GradientNotImplemented => {
                write!(f, "Gradient optimization not implemented")
            }
            OptError::GradientDimMismatch { expected, found } => {
                write!(f, "Gradient dimension mismatch: expected {expected}, found {found}")
            }
            OptError::InvalidGradient { index, value, reason } => {
                write!(f, "Invalid gradient at index {index}: {value}: {reason}")
            }

            // ---- LbfgsOptions / SimplexOptions ----
            OptError::InvalidTolGrad { tol, reason } => {
                write!(f, "Invalid gradient tolerance {tol}: {reason}")
            }
            OptError::InvalidTolCost { tol, reason } => {
                write!(f, "Invalid cost function change tolerance {tol}: {reason}")
            }
            OptError::InvalidMaxIter { max_iter, reason } => {
                write!(f, "Invalid maximum iterations {max_iter}: {reason}")
            }
            OptError::NoTolerancesProvided => {
                write!(f, "No tolerances provided")
            }
            OptError::InvalidLineSearch { name, reason } => {
                write!(f, "Invalid line searcher '{name}': {reason}")
            }
            OptError::InvalidLBFGSMem { mem, reason } => {
                write!(f, "Invalid L-BFGS memory {mem}: {reason}")
            }
            OptError::InvalidSdTolerance { tol, reason } => {
                write!(f, "Invalid simplex standard-deviation tolerance {tol}: {reason}")
            }
            OptError::InvalidSimplexStep { step, reason } => {
                write!(f, "Invalid initial simplex step {step}: {reason}")
            }
            OptError::EmptyTheta => {
                write!(f, "Starting point must have at least one coordinate")
            }

            // ---- Cost function ----
            OptError::NonFiniteCost { value } => {
                write!(f, "Non-finite cost value: {value}")
            }

            // ---- Optimizer outcome ----
            OptError::InvalidThetaHat { index, value, reason } => {
                write!(f, "Invalid estimated parameter at index {index}: {value}: {reason}")
            }
            OptError::MissingThetaHat => {
                write!(f, "Missing estimated parameters (theta hat)")
            }

            // ---- Argmin ----
            OptError::InvalidParameter { text } => {
                write!(f, "Invalid parameter: {text}")
            }
            OptError::NotImplemented { text } => {
                write!(f, "Not implemented: {text}")
            }
            OptError::NotInitialized { text } => {
                write!(f, "Not initialized: {text}")
            }
            OptError::ConditionViolated { text } => {
                write!(f, "Condition violated: {text}")
            }
            OptError::CheckPointNotFound { text } => {
                write!(f, "Checkpoint not found: {text}")
            }
            OptError::PotentialBug { text } => {
                write!(f, "Potential bug: {text}")
            }
            OptError::ImpossibleError { text } => {
                write!(f, "Impossible error: {text}")
            }
            OptError::BackendError { text } => {
                write!(f, "Backend error: {text}")
            }

            // ---- Model errors raised inside objectives ----
            OptError::ThetaLengthMismatch { expected, actual } => {
                write!(f, "Theta length mismatch: expected {expected}, actual {actual}")
            }
            OptError::NonPositiveVariance { t, value } => {
                write!(f, "Non-positive variance term at index {t}: {value}")
            }
            OptError::InvalidThetaInput { index, value } => {
                write!(f, "Invalid theta input at index {index}: {value}, must be finite")
            }
            OptError::ModelError { text } => {
                write!(f, "Model error: {text}")
            }

            // ---- Fallback ----
            OptError::UnknownError => {
                write!(f, "Unknown error")
            }
        }
    }
}

impl From<Error> for OptError {
    fn from(original_err: Error) -> Self {
        // Errors raised by our own objectives travel through argmin boxed as
        // `OptError`; recover them first so model faults keep their identity.
        let original_err = match original_err.downcast::<OptError>() {
            Ok(opt_err) => return opt_err,
            Err(err) => err,
        };
        match original_err.downcast() {
            Ok(opt_err) => match opt_err {
                ArgminError::InvalidParameter { text } => OptError::InvalidParameter { text },
                ArgminError::NotImplemented { text } => OptError::NotImplemented { text },
                ArgminError::NotInitialized { text } => OptError::NotInitialized { text },
                ArgminError::ConditionViolated { text } => OptError::ConditionViolated { text },
                ArgminError::CheckpointNotFound { text } => OptError::CheckPointNotFound { text },
                ArgminError::PotentialBug { text } => OptError::PotentialBug { text },
                ArgminError::ImpossibleError { text } => OptError::ImpossibleError { text },
                _ => OptError::UnknownError,
            },
            Err(err) => OptError::BackendError { text: err.to_string() },
        }
    }
}

impl From<CaviarError> for OptError {
    fn from(err: CaviarError) -> Self {
        match err {
            CaviarError::InvalidParameterDimension { expected, actual } => {
                OptError::ThetaLengthMismatch { expected, actual }
            }
            CaviarError::NonPositiveVariance { t, value } => {
                OptError::NonPositiveVariance { t, value }
            }
            CaviarError::Optimizer(inner) => inner,
            other => OptError::ModelError { text: other.to_string() },
        }
    }
}

impl From<ArchError> for OptError {
    fn from(err: ArchError) -> Self {
        match err {
            ArchError::ParamLengthMismatch { expected, actual } => {
                OptError::ThetaLengthMismatch { expected, actual }
            }
            ArchError::NonPositiveVariance { t, value } => {
                OptError::NonPositiveVariance { t, value }
            }
            ArchError::Optimizer(inner) => inner,
            other => OptError::ModelError { text: other.to_string() },
        }
    }
}
