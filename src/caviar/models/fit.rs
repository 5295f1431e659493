//! Fitted CAViaR model: estimates, in-sample VaR path and out-of-sample
//! continuation.
use crate::caviar::{
    core::{
        data::ReturnSeries,
        diagnostics::hit_rate,
        news_impact::news_impact,
        recurrence::CaviarRecurrence,
        spec::CaviarSpec,
    },
    errors::{CaviarError, CaviarResult},
};
use ndarray::{Array1, ArrayView1};

/// Result of [`CaviarModel::fit`](crate::caviar::models::caviar::CaviarModel::fit).
///
/// Fields
/// ------
/// - `beta`: recurrence coefficients, length `spec.variant.beta_dim()`.
/// - `tau`: ALD scale; `Some` only for maximum-likelihood fits.
/// - `objective`: final tick loss (RQ) or negative log-likelihood (MLE).
/// - `converged`: `false` when a pass or attempt cap stopped the estimator.
/// - `var_in`: in-sample VaR aligned with the fitted returns,
///   `var_in[0] = var0`.
/// - `var0`: the starting value actually used.
/// - `var0_out`: one recurrence step past the last observation; seeds
///   [`FitResult::predict`] on the following period.
/// - `attempts`: refinement passes (RQ) or L-BFGS attempts (MLE).
/// - `spec`: the specification that produced the fit.
#[derive(Debug, Clone, PartialEq)]
pub struct FitResult {
    pub beta: Array1<f64>,
    pub tau: Option<f64>,
    pub objective: f64,
    pub converged: bool,
    pub var_in: Array1<f64>,
    pub var0: f64,
    pub var0_out: f64,
    pub attempts: usize,
    pub spec: CaviarSpec,
}

impl FitResult {
    /// Recurrence parameterized like the fit.
    pub fn recurrence(&self) -> CaviarRecurrence {
        CaviarRecurrence::from_spec(&self.spec)
    }

    /// Run the fitted recurrence over `new_returns` starting from `var0`.
    ///
    /// Passing [`FitResult::var0_out`] continues the in-sample path on data
    /// that directly follows the fitted sample.
    ///
    /// # Errors
    /// - `CaviarError::NonFiniteData` for a NaN/±inf return.
    /// - `CaviarError::InvalidVar0` if `var0` is not finite.
    /// - `CaviarError::NonPositiveVariance` from an igarch step.
    pub fn predict(&self, new_returns: ArrayView1<f64>, var0: f64) -> CaviarResult<Array1<f64>> {
        if !var0.is_finite() {
            return Err(CaviarError::InvalidVar0 { value: var0 });
        }
        if let Some((index, &value)) = new_returns.iter().enumerate().find(|(_, v)| !v.is_finite())
        {
            return Err(CaviarError::NonFiniteData { index, value });
        }
        self.recurrence().compute_var(self.beta.view(), new_returns, var0)
    }

    /// In-sample hit rate on the series the model was fitted to.
    ///
    /// # Errors
    /// `CaviarError::LengthMismatch` if `returns` is not the fitted series.
    pub fn in_sample_hit_rate(&self, returns: &ReturnSeries) -> CaviarResult<f64> {
        hit_rate(returns.view(), self.var_in.view())
    }

    /// News-impact curve of the fitted coefficients at a lagged VaR of
    /// `var_level`.
    ///
    /// # Errors
    /// See [`news_impact`].
    pub fn news_impact(&self, var_level: f64, grid: ArrayView1<f64>) -> CaviarResult<Array1<f64>> {
        news_impact(&self.recurrence(), self.beta.view(), var_level, grid)
    }
}
