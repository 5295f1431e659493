//! Validation helpers for objective minimization.
//!
//! This module centralizes common consistency checks used across the
//! optimizer interface:
//!
//! - **Tolerance checks**: [`verify_tol_grad`], [`verify_tol_cost`] and
//!   [`verify_sd_tolerance`] ensure numeric tolerances are finite and strictly
//!   positive when provided.
//! - **Gradient validation**: [`validate_grad`] enforces correct dimension
//!   and finite entries.
//! - **Parameter estimates**: [`validate_theta_hat`] ensures a candidate
//!   `theta_hat` exists and contains only finite values.
//! - **Objective values**: [`validate_value`] checks objective outputs for
//!   finiteness.
//! - **Starting points**: [`validate_theta0`] rejects empty or non-finite
//!   initial vectors before a solver is built around them.
use crate::optimization::{
    errors::{OptError, OptResult},
    objective_optimizer::{Grad, Theta},
};

/// Validate the optional gradient‐norm tolerance.
///
/// # Errors
/// Returns [`OptError::InvalidTolGrad`] if the value is non-finite or ≤ 0.0.
pub fn verify_tol_grad(tol: Option<f64>) -> OptResult<()> {
    if let Some(tol) = tol {
        if !tol.is_finite() {
            return Err(OptError::InvalidTolGrad { tol, reason: "Tolerance must be finite." });
        }
        if tol <= 0.0 {
            return Err(OptError::InvalidTolGrad { tol, reason: "Tolerance must be positive." });
        }
    }
    Ok(())
}

/// Validate the optional cost‐change tolerance (for convergence).
///
/// # Errors
/// Returns [`OptError::InvalidTolCost`] if the value is non-finite or ≤ 0.0.
pub fn verify_tol_cost(tol: Option<f64>) -> OptResult<()> {
    if let Some(tol) = tol {
        if !tol.is_finite() {
            return Err(OptError::InvalidTolCost { tol, reason: "Tolerance must be finite." });
        }
        if tol <= 0.0 {
            return Err(OptError::InvalidTolCost { tol, reason: "Tolerance must be positive." });
        }
    }
    Ok(())
}

/// Validate the simplex standard-deviation tolerance.
///
/// # Errors
/// Returns [`OptError::InvalidSdTolerance`] if the value is non-finite or ≤ 0.0.
pub fn verify_sd_tolerance(tol: f64) -> OptResult<()> {
    if !tol.is_finite() {
        return Err(OptError::InvalidSdTolerance { tol, reason: "Tolerance must be finite." });
    }
    if tol <= 0.0 {
        return Err(OptError::InvalidSdTolerance { tol, reason: "Tolerance must be positive." });
    }
    Ok(())
}

/// Validate a gradient vector against dimension and finiteness.
///
/// # Errors
/// - [`OptError::GradientDimMismatch`] if length does not match `dim`.
/// - [`OptError::InvalidGradient`] with the index/value/reason of the first
///   offending element.
pub fn validate_grad(grad: &Grad, dim: usize) -> OptResult<()> {
    if grad.len() != dim {
        return Err(OptError::GradientDimMismatch { expected: dim, found: grad.len() });
    }
    for (index, &value) in grad.iter().enumerate() {
        if !value.is_finite() {
            return Err(OptError::InvalidGradient {
                index,
                value,
                reason: "Gradient elements must be finite.",
            });
        }
    }
    Ok(())
}

/// Validate a starting point before a local search.
///
/// # Errors
/// - [`OptError::EmptyTheta`] if `theta0` has no coordinates.
/// - [`OptError::InvalidThetaInput`] for the first non-finite coordinate.
pub fn validate_theta0(theta0: &Theta) -> OptResult<()> {
    if theta0.is_empty() {
        return Err(OptError::EmptyTheta);
    }
    for (index, &value) in theta0.iter().enumerate() {
        if !value.is_finite() {
            return Err(OptError::InvalidThetaInput { index, value });
        }
    }
    Ok(())
}

/// Validate and unwrap an estimated parameter vector (`theta_hat`).
///
/// # Errors
/// - [`OptError::MissingThetaHat`] if no vector was provided.
/// - [`OptError::InvalidThetaHat`] if any element is non-finite.
pub fn validate_theta_hat(theta_hat: Option<Theta>) -> OptResult<Theta> {
    match theta_hat {
        Some(t) => {
            for (index, &value) in t.iter().enumerate() {
                if !value.is_finite() {
                    return Err(OptError::InvalidThetaHat {
                        index,
                        value,
                        reason: "Parameter estimates must be finite.",
                    });
                }
            }
            Ok(t)
        }
        None => Err(OptError::MissingThetaHat),
    }
}

/// Validate that a scalar objective value is finite.
///
/// # Errors
/// Returns [`OptError::NonFiniteCost`] if the value is `NaN` or infinite.
pub fn validate_value(value: f64) -> OptResult<()> {
    if !value.is_finite() {
        return Err(OptError::NonFiniteCost { value });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    // Purpose
    // -------
    // Tolerance verifiers accept `None` and positive finite values, and
    // reject zero, negatives and non-finite inputs.
    fn tolerance_verifiers_reject_non_positive_and_non_finite() {
        assert!(verify_tol_grad(None).is_ok());
        assert!(verify_tol_grad(Some(1e-6)).is_ok());
        assert!(verify_tol_grad(Some(0.0)).is_err());
        assert!(verify_tol_cost(Some(f64::INFINITY)).is_err());
        assert!(verify_tol_cost(Some(-1.0)).is_err());
        assert!(verify_sd_tolerance(1e-8).is_ok());
        assert!(verify_sd_tolerance(f64::NAN).is_err());
    }

    #[test]
    // Purpose
    // -------
    // `validate_grad` reports the first offending coordinate.
    //
    // Given
    // -----
    // - A gradient `[1.0, NaN, inf]` of the right length.
    //
    // Expect
    // ------
    // - `InvalidGradient` at index 1.
    fn validate_grad_reports_first_non_finite_entry() {
        // Arrange
        let grad = array![1.0, f64::NAN, f64::INFINITY];

        // Act
        let err = validate_grad(&grad, 3).unwrap_err();

        // Assert
        assert!(matches!(err, OptError::InvalidGradient { index: 1, .. }));
        assert_eq!(
            validate_grad(&grad, 2).unwrap_err(),
            OptError::GradientDimMismatch { expected: 2, found: 3 }
        );
    }

    #[test]
    // Purpose
    // -------
    // Starting points must be non-empty and finite.
    fn validate_theta0_rejects_empty_and_non_finite() {
        assert_eq!(validate_theta0(&Theta::zeros(0)).unwrap_err(), OptError::EmptyTheta);
        assert_eq!(
            validate_theta0(&array![0.5, f64::NEG_INFINITY]).unwrap_err(),
            OptError::InvalidThetaInput { index: 1, value: f64::NEG_INFINITY }
        );
        assert!(validate_theta0(&array![0.0, 1.0]).is_ok());
    }

    #[test]
    // Purpose
    // -------
    // Missing or non-finite estimates are rejected; finite ones pass through.
    fn validate_theta_hat_unwraps_only_finite_vectors() {
        assert_eq!(validate_theta_hat(None).unwrap_err(), OptError::MissingThetaHat);
        assert!(validate_theta_hat(Some(array![f64::NAN])).is_err());
        assert_eq!(validate_theta_hat(Some(array![1.0, 2.0])).unwrap(), array![1.0, 2.0]);
        assert!(validate_value(f64::NAN).is_err());
        assert!(validate_value(-3.5).is_ok());
    }
}
