//! Asymmetric-Laplace maximum likelihood with a bounded retry loop.
//!
//! Purpose
//! -------
//! Estimate `[τ, β...]` by minimizing the ALD negative log-likelihood with
//! L-BFGS in the unconstrained θ-space of [`AldObjective`].
//!
//! Retry policy
//! ------------
//! 1. Draw `[τ, β]` componentwise from `U[0, 1]`, clamp into the bounds and
//!    map to θ.
//! 2. Run one L-BFGS minimization (an *attempt*).
//! 3. On a numerical breakdown with no usable point (non-finite NLL,
//!    invalid estimate) discard the run, draw a fresh start and reset the
//!    attempt counter. A line search that fails after making progress is
//!    not a breakdown: the optimizer reports its best point unconverged.
//!    More than `max_resamples` breakdowns fail with
//!    `NumericalInstability`.
//! 4. Otherwise return on convergence; if not converged, warm-start the next
//!    attempt from the current optimum; after `max_attempts` attempts
//!    return the last result with `converged = false`.
//!
//! Model faults (dimension mismatch, non-positive variance) are not
//! retried and end the fit.
//!
//! The logistic map flattens the θ-space gradient near the edges of an
//! interval bound, so L-BFGS can pass its own tests at a corner of the
//! parameter box. Such stops count as unconverged (see [`is_saturated`])
//! and [`MleEstimate::saturated`] records them.
use crate::{
    caviar::{
        core::{data::ReturnSeries, options::MleFitOptions},
        errors::{CaviarError, CaviarResult},
        models::objectives::AldObjective,
    },
    optimization::objective_optimizer::{Theta, minimize},
};
use ndarray::Array1;
use rand::Rng;
use tracing::{debug, warn};

/// Result of the ALD fit, in model space.
#[derive(Debug, Clone, PartialEq)]
pub struct MleEstimate {
    pub tau: f64,
    pub beta: Array1<f64>,
    pub nll: f64,
    pub converged: bool,
    /// Attempts made from the final starting point (1..=max_attempts).
    pub attempts: usize,
    /// Fresh starting points drawn after numerical breakdowns.
    pub resamples: usize,
    /// Some interval-bounded coordinate ended pinned to its edge.
    pub saturated: bool,
}

/// Whether any interval-bounded coordinate of `theta` is pinned to an edge.
pub fn is_saturated(objective: &AldObjective, theta: &Theta) -> bool {
    theta.iter().zip(objective.bounds()).any(|(&t, bound)| bound.is_saturated(t))
}

/// Random starting point in θ-space.
pub fn draw_start<R: Rng + ?Sized>(objective: &AldObjective, rng: &mut R) -> Theta {
    let params: Array1<f64> = objective
        .bounds()
        .iter()
        .map(|bound| bound.clamp(rng.gen_range(0.0..1.0)))
        .collect();
    objective.to_theta(params.view())
}

/// Run the retry loop from a random start.
///
/// # Errors
/// - `CaviarError::NumericalInstability` after more than `max_resamples`
///   breakdowns.
/// - Any non-numerical optimizer or model error, converted via
///   `From<OptError>`.
pub fn fit_ald<R: Rng + ?Sized>(
    objective: &AldObjective, returns: &ReturnSeries, opts: &MleFitOptions, rng: &mut R,
) -> CaviarResult<MleEstimate> {
    let mut theta = draw_start(objective, rng);
    let mut attempts = 0;
    let mut resamples = 0;

    loop {
        attempts += 1;
        match minimize(objective, theta.clone(), returns, &opts.lbfgs) {
            Ok(out) => {
                let saturated = is_saturated(objective, &out.theta_hat);
                let converged = out.converged && !saturated;
                debug!(
                    attempt = attempts,
                    resamples,
                    nll = out.value,
                    converged,
                    saturated,
                    status = %out.status,
                    "ALD attempt finished"
                );
                if converged || attempts >= opts.max_attempts {
                    let params = objective.to_params(&out.theta_hat);
                    return Ok(MleEstimate {
                        tau: params[0],
                        beta: params.slice(ndarray::s![1..]).to_owned(),
                        nll: out.value,
                        converged,
                        attempts,
                        resamples,
                        saturated,
                    });
                }
                theta = out.theta_hat;
            }
            Err(err) if err.is_numerical() => {
                if resamples >= opts.max_resamples {
                    return Err(CaviarError::NumericalInstability {
                        resamples,
                        reason: err.to_string(),
                    });
                }
                resamples += 1;
                warn!(attempt = attempts, resamples, error = %err, "ALD fit broke down; resampling start");
                theta = draw_start(objective, rng);
                attempts = 0;
            }
            Err(err) => return Err(err.into()),
        }
    }
}
