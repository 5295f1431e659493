//! Tick (check) loss and the Asymmetric-Laplace likelihood built on it.
//!
//! - [`tick`]: `ρ_q(u) = u·(q-1)` for `u < 0`, else `u·q`.
//! - [`rq_loss`]: `Σ_{t=1}^{T-1} ρ_q(y[t] - VaR[t])`. Index 0 is skipped
//!   because `VaR[0]` is the fixed starting value, not a model output.
//! - [`ald_nll`]: `(T-1)·ln τ + rq_loss/τ`.
use crate::caviar::errors::{CaviarError, CaviarResult};
use ndarray::ArrayView1;

/// Tick loss `ρ_q(u)`; piecewise linear, convex, zero only at `u = 0`.
#[inline]
pub fn tick(q: f64, u: f64) -> f64 {
    if u < 0.0 { u * (q - 1.0) } else { u * q }
}

/// Regression-quantile criterion over an aligned VaR path.
///
/// # Errors
/// `CaviarError::LengthMismatch` when `var.len() != returns.len()`.
pub fn rq_loss(returns: ArrayView1<f64>, var: ArrayView1<f64>, q: f64) -> CaviarResult<f64> {
    if var.len() != returns.len() {
        return Err(CaviarError::LengthMismatch { expected: returns.len(), actual: var.len() });
    }
    Ok(returns.iter().zip(var.iter()).skip(1).map(|(&y, &v)| tick(q, y - v)).sum())
}

/// Asymmetric-Laplace negative log-likelihood from a precomputed tick-loss
/// sum over `n_terms` residuals.
///
/// `tau` must be strictly positive; the bound transform guarantees it.
pub fn ald_nll(tau: f64, loss: f64, n_terms: usize) -> f64 {
    n_terms as f64 * tau.ln() + loss / tau
}
