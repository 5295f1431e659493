//! ARCH(p) conditional-variance baseline with Gaussian maximum likelihood.
//!
//! Purpose
//! -------
//! Provide the volatility benchmark that CAViaR fits are compared against:
//! `σ²[t] = ω + Σ_{i=1}^p α_i·r[t-i]²`, estimated by one bounded L-BFGS
//! run, and a Gaussian VaR `σ[t]·Φ⁻¹(q)` derived from it.
//!
//! Key behaviors
//! -------------
//! - [`ArchModel::variance`] fills the `p` pre-sample slots with the
//!   population variance of the whole series and runs the recurrence from
//!   `t = p`.
//! - [`ArchModel::neg_log_likelihood`] evaluates
//!   `(T-p+1)/2·ln(2π) + ½·Σ_{t=p}^{T-1} (r[t]²/σ²[t] + ln σ²[t])`.
//! - [`ArchModel::fit`] draws a uniform start, optimizes in the
//!   unconstrained space of [`ArchObjective`] and does not retry.
//!
//! Invariants & assumptions
//! ------------------------
//! - Only GARCH order `q = 0` is accepted; `p >= 1`; the series is longer
//!   than `p`.
//! - Every σ²[t] with `t >= p` must be finite and strictly positive. The
//!   pre-sample fill is not checked (a constant series has variance 0).
//! - Bounds: `ω > 0`, `α_i ∈ (0, 1)`, enforced by reparameterisation.
use crate::{
    arch::errors::{ArchError, ArchResult},
    caviar::core::data::ReturnSeries,
    optimization::{
        errors::{OptError, OptResult},
        numerical_stability::{BOUND_EPS, ParamBound, to_model_space, to_theta_space},
        objective_optimizer::{Cost, LbfgsOptions, Objective, Theta, minimize},
    },
};
use ndarray::{Array1, ArrayView1, s};
use rand::Rng;
use statrs::distribution::{ContinuousCDF, Normal};
use std::f64::consts::PI;
use tracing::debug;

const OMEGA_BOUND: ParamBound = ParamBound::Positive { floor: BOUND_EPS };
const ALPHA_BOUND: ParamBound = ParamBound::Interval { lower: 0.0, upper: 1.0 };

/// ARCH(p) model specification.
#[derive(Debug, Clone, PartialEq)]
pub struct ArchModel {
    pub p: usize,
    pub q: usize,
    pub options: LbfgsOptions,
}

impl ArchModel {
    /// # Errors
    /// - `ArchError::UnsupportedModel` if `q != 0`.
    /// - `ArchError::InvalidLagOrder` if `p == 0`.
    pub fn new(p: usize, q: usize) -> ArchResult<Self> {
        Self::with_options(p, q, LbfgsOptions::default())
    }

    /// Same as [`ArchModel::new`] with explicit optimizer settings.
    pub fn with_options(p: usize, q: usize, options: LbfgsOptions) -> ArchResult<Self> {
        if q != 0 {
            return Err(ArchError::UnsupportedModel { q });
        }
        if p == 0 {
            return Err(ArchError::InvalidLagOrder { p });
        }
        Ok(Self { p, q, options })
    }

    /// Conditional variances for `params = [ω, α_1..α_p]`.
    ///
    /// # Errors
    /// - `ParamLengthMismatch` unless `params.len() == p + 1`.
    /// - `SeriesTooShort` unless `returns.len() > p`.
    /// - `NonPositiveVariance` for the first `t >= p` with σ²[t] ≤ 0 or
    ///   non-finite.
    pub fn variance(&self, params: ArrayView1<f64>, returns: ArrayView1<f64>) -> ArchResult<Array1<f64>> {
        let p = self.p;
        if params.len() != p + 1 {
            return Err(ArchError::ParamLengthMismatch { expected: p + 1, actual: params.len() });
        }
        let n = returns.len();
        if n <= p {
            return Err(ArchError::SeriesTooShort { len: n, p });
        }

        let mean = returns.sum() / n as f64;
        let presample = returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / n as f64;
        let omega = params[0];
        let alpha = params.slice(s![1..]);

        let mut sigma2 = Array1::from_elem(n, presample);
        for t in p..n {
            let value = omega
                + alpha.iter().enumerate().map(|(i, a)| a * returns[t - 1 - i].powi(2)).sum::<f64>();
            if !value.is_finite() || value <= 0.0 {
                return Err(ArchError::NonPositiveVariance { t, value });
            }
            sigma2[t] = value;
        }
        Ok(sigma2)
    }

    /// Gaussian negative log-likelihood at `params = [ω, α_1..α_p]`.
    ///
    /// # Errors
    /// Same as [`ArchModel::variance`].
    pub fn neg_log_likelihood(&self, params: ArrayView1<f64>, returns: ArrayView1<f64>) -> ArchResult<f64> {
        let sigma2 = self.variance(params, returns)?;
        let n = returns.len();
        let p = self.p;
        let constant = (n - p + 1) as f64 / 2.0 * (2.0 * PI).ln();
        let sum: f64 = (p..n).map(|t| returns[t].powi(2) / sigma2[t] + sigma2[t].ln()).sum();
        Ok(constant + 0.5 * sum)
    }

    /// Fit `[ω, α]` by one L-BFGS run from a `U[0, 1]` start.
    ///
    /// # Errors
    /// - `SeriesTooShort` unless `returns.len() > p`.
    /// - `OptimizationFailure` for any error raised by the optimizer.
    pub fn fit<R: Rng + ?Sized>(&self, returns: &ReturnSeries, rng: &mut R) -> ArchResult<ArchFit> {
        if returns.len() <= self.p {
            return Err(ArchError::SeriesTooShort { len: returns.len(), p: self.p });
        }
        let objective = ArchObjective::new(self.clone());
        let start: Array1<f64> =
            objective.bounds.iter().map(|b| b.clamp(rng.gen_range(0.0..1.0))).collect();
        let theta0 = to_theta_space(start.view(), &objective.bounds);

        let out = minimize(&objective, theta0, returns.as_array(), &self.options)
            .map_err(|e| ArchError::OptimizationFailure { reason: e.to_string() })?;
        let params = to_model_space(out.theta_hat.view(), &objective.bounds);
        let sigma2 = self.variance(params.view(), returns.view())?;
        debug!(p = self.p, nll = out.value, converged = out.converged, status = %out.status, "ARCH fit finished");

        let n = returns.len();
        Ok(ArchFit {
            omega: params[0],
            alpha: params.slice(s![1..]).to_owned(),
            nll: out.value,
            converged: out.converged,
            sigma2,
            tail: returns.view().slice(s![n - self.p..]).to_owned(),
        })
    }
}

/// Gaussian ARCH NLL over an unconstrained θ mapped to `[ω, α...]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ArchObjective {
    pub model: ArchModel,
    bounds: Vec<ParamBound>,
}

impl ArchObjective {
    pub fn new(model: ArchModel) -> Self {
        let mut bounds = Vec::with_capacity(model.p + 1);
        bounds.push(OMEGA_BOUND);
        bounds.extend(std::iter::repeat_n(ALPHA_BOUND, model.p));
        Self { model, bounds }
    }

    pub fn bounds(&self) -> &[ParamBound] {
        &self.bounds
    }
}

impl Objective for ArchObjective {
    type Data = Array1<f64>;

    fn cost(&self, theta: &Theta, data: &Array1<f64>) -> OptResult<Cost> {
        let params = to_model_space(theta.view(), &self.bounds);
        Ok(self.model.neg_log_likelihood(params.view(), data.view())?)
    }

    fn check(&self, theta: &Theta, data: &Array1<f64>) -> OptResult<()> {
        if theta.len() != self.bounds.len() {
            return Err(OptError::ThetaLengthMismatch {
                expected: self.bounds.len(),
                actual: theta.len(),
            });
        }
        if data.len() <= self.model.p {
            return Err(ArchError::SeriesTooShort { len: data.len(), p: self.model.p }.into());
        }
        Ok(())
    }
}

/// Fitted ARCH(p) model.
///
/// `tail` holds the last `p` in-sample returns (oldest first) for the
/// one-step forecast.
#[derive(Debug, Clone, PartialEq)]
pub struct ArchFit {
    pub omega: f64,
    pub alpha: Array1<f64>,
    pub nll: f64,
    pub converged: bool,
    pub sigma2: Array1<f64>,
    pub tail: Array1<f64>,
}

impl ArchFit {
    /// In-sample Gaussian VaR `σ[t]·Φ⁻¹(q)`.
    ///
    /// # Errors
    /// `ArchError::InvalidQuantile` unless `0 < quantile < 1`.
    pub fn value_at_risk(&self, quantile: f64) -> ArchResult<Array1<f64>> {
        let z = standard_normal_quantile(quantile)?;
        Ok(self.sigma2.mapv(|s2| s2.sqrt() * z))
    }

    /// One-step-ahead variance `ω + Σ α_i·r[T-i]²`.
    pub fn forecast_variance(&self) -> f64 {
        self.omega + self.alpha.iter().zip(self.tail.iter().rev()).map(|(a, r)| a * r * r).sum::<f64>()
    }

    /// One-step-ahead Gaussian VaR.
    ///
    /// # Errors
    /// `ArchError::InvalidQuantile` unless `0 < quantile < 1`.
    pub fn forecast_value_at_risk(&self, quantile: f64) -> ArchResult<f64> {
        Ok(self.forecast_variance().sqrt() * standard_normal_quantile(quantile)?)
    }
}

fn standard_normal_quantile(quantile: f64) -> ArchResult<f64> {
    if !(quantile > 0.0 && quantile < 1.0) {
        return Err(ArchError::InvalidQuantile { value: quantile });
    }
    Ok(Normal::new(0.0, 1.0)?.inverse_cdf(quantile))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    // Purpose
    // -------
    // Constructor rejects GARCH terms and a zero ARCH order.
    fn new_validates_orders() {
        assert_eq!(ArchModel::new(1, 1).unwrap_err(), ArchError::UnsupportedModel { q: 1 });
        assert_eq!(ArchModel::new(0, 0).unwrap_err(), ArchError::InvalidLagOrder { p: 0 });
        assert_eq!(ArchModel::new(2, 0).unwrap().p, 2);
    }

    #[test]
    // Purpose
    // -------
    // With all-zero returns the recurrence collapses to ω.
    //
    // Given
    // -----
    // - ARCH(2), ω = 0.3, α = [0.2, 0.1], r ≡ 0 of length 6.
    //
    // Expect
    // ------
    // - σ²[0..2] = 0 (sample variance of a constant series).
    // - σ²[t] = 0.3 for t ≥ 2.
    fn zero_returns_give_sigma2_equal_to_omega() {
        // Arrange
        let model = ArchModel::new(2, 0).unwrap();
        let returns = Array1::<f64>::zeros(6);

        // Act
        let sigma2 = model.variance(array![0.3, 0.2, 0.1].view(), returns.view()).unwrap();

        // Assert
        assert_eq!(sigma2.slice(s![..2]).to_vec(), vec![0.0, 0.0]);
        assert!(sigma2.slice(s![2..]).iter().all(|&v| v == 0.3));
    }

    #[test]
    // Purpose
    // -------
    // Lag ordering and the positivity check follow σ²[t] = ω + Σ α_i·r[t-i]².
    //
    // Given
    // -----
    // - ARCH(2), α = [0.5, 0.25], r = [1, 2, 3].
    //
    // Expect
    // ------
    // - σ²[2] = ω + 0.5·4 + 0.25·1.
    // - ω = -3 drives σ²[2] below zero → NonPositiveVariance at t = 2.
    fn variance_orders_lags_and_checks_positivity() {
        let model = ArchModel::new(2, 0).unwrap();
        let returns = array![1.0, 2.0, 3.0];
        let sigma2 = model.variance(array![0.1, 0.5, 0.25].view(), returns.view()).unwrap();
        assert!((sigma2[2] - 2.35).abs() < 1e-12);
        assert!(matches!(
            model.variance(array![-3.0, 0.5, 0.25].view(), returns.view()),
            Err(ArchError::NonPositiveVariance { t: 2, .. })
        ));
        assert_eq!(
            model.variance(array![0.1].view(), returns.view()).unwrap_err(),
            ArchError::ParamLengthMismatch { expected: 3, actual: 1 }
        );
    }

    #[test]
    // Purpose
    // -------
    // The likelihood matches a hand computation.
    //
    // Given
    // -----
    // - ARCH(1), ω = 1, α = 0, r = [0, 1, 2] so σ²[t] = 1 for t ≥ 1.
    //
    // Expect
    // ------
    // - NLL = (3-1+1)/2·ln(2π) + ½·(1 + 4).
    fn neg_log_likelihood_matches_hand_computation() {
        let model = ArchModel::new(1, 0).unwrap();
        let nll = model.neg_log_likelihood(array![1.0, 0.0].view(), array![0.0, 1.0, 2.0].view()).unwrap();
        let expected = 1.5 * (2.0 * PI).ln() + 2.5;
        assert!((nll - expected).abs() < 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // A fit on simulated ARCH(1) data stays inside the bounds and produces
    // a coherent VaR path and forecast.
    //
    // Given
    // -----
    // - 500 draws from ω = 0.2, α = 0.5 with uniform-scaled shocks.
    //
    // Expect
    // ------
    // - ω > 0, α ∈ (0, 1), finite NLL.
    // - 5% VaR is negative wherever σ² > 0; forecast VaR is negative.
    fn fit_recovers_bounded_parameters() {
        // Arrange
        let mut rng = ChaCha8Rng::seed_from_u64(21);
        let mut data = Vec::with_capacity(500);
        let mut prev: f64 = 0.0;
        for _ in 0..500 {
            let sigma = (0.2 + 0.5 * prev * prev).sqrt();
            let shock: f64 = rng.gen_range(-1.7..1.7);
            prev = sigma * shock;
            data.push(prev);
        }
        let returns = ReturnSeries::new(Array1::from(data)).unwrap();
        let model = ArchModel::new(1, 0).unwrap();

        // Act
        let fit = model.fit(&returns, &mut rng).unwrap();

        // Assert
        assert!(fit.omega > 0.0);
        assert!(fit.alpha[0] > 0.0 && fit.alpha[0] < 1.0);
        assert!(fit.nll.is_finite());
        let var = fit.value_at_risk(0.05).unwrap();
        assert_eq!(var.len(), 500);
        assert!(var.iter().all(|&v| v < 0.0));
        assert!(fit.forecast_value_at_risk(0.05).unwrap() < 0.0);
        assert!(matches!(fit.value_at_risk(1.0), Err(ArchError::InvalidQuantile { .. })));
    }

    #[test]
    // Purpose
    // -------
    // The one-step forecast pairs α_1 with the newest return.
    fn forecast_variance_uses_latest_returns() {
        let fit = ArchFit {
            omega: 0.1,
            alpha: array![0.5, 0.25],
            nll: 0.0,
            converged: true,
            sigma2: array![1.0, 1.0, 1.0],
            tail: array![1.0, 2.0],
        };
        assert!((fit.forecast_variance() - (0.1 + 0.5 * 4.0 + 0.25 * 1.0)).abs() < 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // The Gaussian quantile matches tabulated values and rejects levels
    // outside (0, 1).
    //
    // Expect
    // ------
    // - Φ⁻¹(0.05) ≈ -1.644854, Φ⁻¹(0.5) = 0.
    // - `InvalidQuantile` for 0 and NaN.
    fn standard_normal_quantile_matches_tables() {
        assert!((standard_normal_quantile(0.05).unwrap() + 1.644_853_626_951).abs() < 1e-9);
        assert!(standard_normal_quantile(0.5).unwrap().abs() < 1e-12);
        assert!(matches!(standard_normal_quantile(0.0), Err(ArchError::InvalidQuantile { .. })));
        assert!(matches!(standard_normal_quantile(f64::NAN), Err(ArchError::InvalidQuantile { .. })));
    }
}
