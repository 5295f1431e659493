//! Optimizer objectives for CAViaR estimation.
//!
//! - [`RqObjective`]: tick loss as a function of β, evaluated directly in
//!   model space (the regression-quantile criterion is unconstrained).
//! - [`AldObjective`]: Asymmetric-Laplace negative log-likelihood as a
//!   function of an unconstrained θ that maps to `[τ, β...]` through the
//!   variant's [`ParamBound`]s.
//!
//! Both run the recurrence on every evaluation; recurrence faults
//! (dimension, igarch radicand) surface as `OptError` via the
//! `From<CaviarError>` conversion so optimizer adapters can react to them.
use crate::{
    caviar::core::{
        bounds::mle_bounds,
        data::ReturnSeries,
        recurrence::CaviarRecurrence,
        tick_loss::{ald_nll, rq_loss},
    },
    optimization::{
        errors::{OptError, OptResult},
        numerical_stability::{ParamBound, to_model_space, to_theta_space},
        objective_optimizer::{Cost, Objective, Theta},
    },
};
use ndarray::{Array1, ArrayView1};

fn check_len(theta: &Theta, expected: usize) -> OptResult<()> {
    if theta.len() != expected {
        return Err(OptError::ThetaLengthMismatch { expected, actual: theta.len() });
    }
    Ok(())
}

/// Regression-quantile criterion `β ↦ Σ ρ_q(y[t] - VaR[t](β))`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RqObjective {
    pub recurrence: CaviarRecurrence,
    pub var0: f64,
}

impl RqObjective {
    pub fn new(recurrence: CaviarRecurrence, var0: f64) -> Self {
        Self { recurrence, var0 }
    }

    pub fn loss(&self, beta: ArrayView1<f64>, returns: &ReturnSeries) -> OptResult<f64> {
        let var = self.recurrence.compute_var(beta, returns.view(), self.var0)?;
        Ok(rq_loss(returns.view(), var.view(), self.recurrence.quantile)?)
    }
}

impl Objective for RqObjective {
    type Data = ReturnSeries;

    fn cost(&self, theta: &Theta, data: &ReturnSeries) -> OptResult<Cost> {
        self.loss(theta.view(), data)
    }

    fn check(&self, theta: &Theta, _data: &ReturnSeries) -> OptResult<()> {
        check_len(theta, self.recurrence.variant.beta_dim())
    }
}

/// Asymmetric-Laplace NLL `(T-1)·ln τ + Σ ρ_q(u_t)/τ` over a bounded
/// `[τ, β...]`, exposed to the optimizer in unconstrained θ-space.
#[derive(Debug, Clone, PartialEq)]
pub struct AldObjective {
    pub recurrence: CaviarRecurrence,
    pub var0: f64,
    bounds: Vec<ParamBound>,
}

impl AldObjective {
    pub fn new(recurrence: CaviarRecurrence, var0: f64) -> Self {
        let bounds = mle_bounds(recurrence.variant);
        Self { recurrence, var0, bounds }
    }

    pub fn bounds(&self) -> &[ParamBound] {
        &self.bounds
    }

    /// `[τ, β...]` for an unconstrained θ.
    pub fn to_params(&self, theta: &Theta) -> Array1<f64> {
        to_model_space(theta.view(), &self.bounds)
    }

    /// Unconstrained θ for a model-space `[τ, β...]`.
    pub fn to_theta(&self, params: ArrayView1<f64>) -> Theta {
        to_theta_space(params, &self.bounds)
    }

    /// NLL at a model-space `[τ, β...]`.
    pub fn nll(&self, params: ArrayView1<f64>, returns: &ReturnSeries) -> OptResult<f64> {
        let tau = params[0];
        let beta = params.slice(ndarray::s![1..]);
        let var = self.recurrence.compute_var(beta, returns.view(), self.var0)?;
        let loss = rq_loss(returns.view(), var.view(), self.recurrence.quantile)?;
        Ok(ald_nll(tau, loss, returns.len() - 1))
    }
}

impl Objective for AldObjective {
    type Data = ReturnSeries;

    fn cost(&self, theta: &Theta, data: &ReturnSeries) -> OptResult<Cost> {
        let params = self.to_params(theta);
        self.nll(params.view(), data)
    }

    fn check(&self, theta: &Theta, _data: &ReturnSeries) -> OptResult<()> {
        check_len(theta, self.bounds.len())
    }
}
