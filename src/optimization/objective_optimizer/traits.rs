//! Public API surface for objective minimization.
//!
//! - [`Objective`]: trait users implement for their model.
//! - [`LbfgsOptions`] and [`Tolerances`]: configuration for the quasi-Newton
//!   optimizer.
//! - [`SimplexOptions`]: configuration for the Nelder–Mead optimizer.
//! - [`LineSearcher`]: choice of line search used by L-BFGS.
//! - [`OptimOutcome`]: normalized result returned by both `minimize` entry
//!   points.
//!
//! Convention: every objective in this crate is a **cost** to be minimized
//! (a tick loss or a negative log-likelihood). If an analytic gradient is
//! provided, it is the gradient of that cost.
use crate::optimization::{
    errors::{OptError, OptResult},
    objective_optimizer::{
        Cost, FnEvalMap, Grad, Theta,
        validation::{
            validate_theta_hat, validate_value, verify_sd_tolerance, verify_tol_cost,
            verify_tol_grad,
        },
    },
};
use argmin::core::{TerminationReason, TerminationStatus};
use argmin_math::ArgminL2Norm;
use std::str::FromStr;

/// User-implemented objective interface.
///
/// - `type Data`: per-model data carried into `cost`/`grad`/`check`.
///
/// Required:
/// - `cost(&Theta, &Data) -> OptResult<Cost>`: evaluate `c(θ)`.
/// - `check(&Theta, &Data) -> OptResult<()>`: validation hook to reject
///   obviously invalid `θ`/`data` pairs. Called once before optimization.
///
/// Optional:
/// - `grad(&Theta, &Data) -> OptResult<Grad>`: analytic gradient `∇c(θ)`.
///   If not implemented, finite differences are used automatically.
pub trait Objective {
    type Data: 'static;

    // Required methods
    fn cost(&self, theta: &Theta, data: &Self::Data) -> OptResult<Cost>;
    fn check(&self, theta: &Theta, data: &Self::Data) -> OptResult<()>;

    // Optional methods
    fn grad(&self, _theta: &Theta, _data: &Self::Data) -> OptResult<Grad> {
        Err(OptError::GradientNotImplemented)
    }
}

/// Choice of line search used inside the L-BFGS solver.
///
/// Parsing:
/// This enum implements `FromStr` and accepts case-insensitive names
/// (`"MoreThuente"`, `"HagerZhang"`). Unknown names return
/// `OptError::InvalidLineSearch`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineSearcher {
    MoreThuente,
    HagerZhang,
}

impl FromStr for LineSearcher {
    type Err = OptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "morethuente" => Ok(LineSearcher::MoreThuente),
            "hagerzhang" => Ok(LineSearcher::HagerZhang),
            _ => Err(OptError::InvalidLineSearch {
                name: s.to_string(),
                reason: "Valid options are case insensitive 'MoreThuente' or 'HagerZhang'.",
            }),
        }
    }
}

/// Quasi-Newton (L-BFGS) configuration.
///
/// Fields:
/// - `tols: Tolerances` — numerical tolerances and iteration limits.
/// - `line_searcher: LineSearcher` — line-search algorithm used by L-BFGS.
/// - `verbose: bool` — if `true`, attaches an observer (behind the `obs_slog`
///   feature) and prints progress.
/// - `lbfgs_mem: Option<usize>` — history size; `None` uses the default of 7.
///
/// Default:
/// - `tols`: `tol_grad = 1e-8`, `tol_cost = 1e-12`, `max_iter = 500`
/// - `line_searcher`: `MoreThuente`
/// - `verbose`: `false`
/// - `lbfgs_mem`: `None`
#[derive(Debug, Clone, PartialEq)]
pub struct LbfgsOptions {
    pub tols: Tolerances,
    pub line_searcher: LineSearcher,
    pub verbose: bool,
    pub lbfgs_mem: Option<usize>,
}

impl LbfgsOptions {
    /// Create a new set of quasi-Newton options.
    ///
    /// # Errors
    /// - [`OptError::InvalidLBFGSMem`] if `lbfgs_mem == Some(0)`.
    pub fn new(
        tols: Tolerances, line_searcher: LineSearcher, verbose: bool, lbfgs_mem: Option<usize>,
    ) -> OptResult<Self> {
        if let Some(m) = lbfgs_mem {
            if m == 0 {
                return Err(OptError::InvalidLBFGSMem {
                    mem: m,
                    reason: "L-BFGS memory must be greater than zero.",
                });
            }
        }
        Ok(Self { tols, line_searcher, verbose, lbfgs_mem })
    }
}

impl Default for LbfgsOptions {
    fn default() -> Self {
        Self {
            tols: Tolerances { tol_grad: Some(1e-8), tol_cost: Some(1e-12), max_iter: Some(500) },
            line_searcher: LineSearcher::MoreThuente,
            verbose: false,
            lbfgs_mem: None,
        }
    }
}

/// Numerical tolerances and iteration limits used by L-BFGS.
///
/// - `tol_grad`: terminate when the gradient norm falls below this threshold.
/// - `tol_cost`: terminate when the change in cost falls below this threshold.
/// - `max_iter`: hard cap on the number of iterations.
///
/// Any field can be `None` but **at least one** of the three must be provided
/// (see [`Tolerances::new`]).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerances {
    pub tol_grad: Option<f64>,
    pub tol_cost: Option<f64>,
    pub max_iter: Option<usize>,
}

impl Tolerances {
    /// Construct validated tolerances.
    ///
    /// # Errors
    /// - [`OptError::NoTolerancesProvided`] if all three are `None`.
    /// - [`OptError::InvalidTolGrad`] / [`OptError::InvalidTolCost`] for
    ///   non-finite or non-positive tolerances.
    /// - [`OptError::InvalidMaxIter`] if `max_iter == 0`.
    pub fn new(
        tol_grad: Option<f64>, tol_cost: Option<f64>, max_iter: Option<usize>,
    ) -> OptResult<Self> {
        if tol_grad.is_none() && tol_cost.is_none() && max_iter.is_none() {
            return Err(OptError::NoTolerancesProvided);
        }
        verify_tol_cost(tol_cost)?;
        verify_tol_grad(tol_grad)?;
        if let Some(max_iter) = max_iter {
            if max_iter == 0 {
                return Err(OptError::InvalidMaxIter {
                    max_iter,
                    reason: "Maximum iterations must be greater than zero.",
                });
            }
        }
        Ok(Self { tol_grad, tol_cost, max_iter })
    }
}

/// Nelder–Mead configuration.
///
/// - `sd_tolerance`: the simplex has converged once the standard deviation
///   of the vertex costs drops below this value.
/// - `max_iter`: iteration cap; hitting it counts as non-convergence.
/// - `nonzero_step`: relative perturbation used to build the initial simplex
///   along coordinates that are non-zero.
/// - `zero_step`: absolute perturbation for coordinates equal to zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimplexOptions {
    pub sd_tolerance: f64,
    pub max_iter: usize,
    pub nonzero_step: f64,
    pub zero_step: f64,
}

impl SimplexOptions {
    /// Construct validated simplex options.
    ///
    /// # Errors
    /// - [`OptError::InvalidSdTolerance`] for a non-finite or non-positive
    ///   tolerance.
    /// - [`OptError::InvalidMaxIter`] if `max_iter == 0`.
    /// - [`OptError::InvalidSimplexStep`] for a non-finite or non-positive
    ///   step.
    pub fn new(
        sd_tolerance: f64, max_iter: usize, nonzero_step: f64, zero_step: f64,
    ) -> OptResult<Self> {
        verify_sd_tolerance(sd_tolerance)?;
        if max_iter == 0 {
            return Err(OptError::InvalidMaxIter {
                max_iter,
                reason: "Maximum iterations must be greater than zero.",
            });
        }
        for step in [nonzero_step, zero_step] {
            if !step.is_finite() || step <= 0.0 {
                return Err(OptError::InvalidSimplexStep {
                    step,
                    reason: "Simplex steps must be finite and strictly positive.",
                });
            }
        }
        Ok(Self { sd_tolerance, max_iter, nonzero_step, zero_step })
    }
}

impl Default for SimplexOptions {
    fn default() -> Self {
        Self { sd_tolerance: 1e-8, max_iter: 10_000, nonzero_step: 0.05, zero_step: 0.00025 }
    }
}

/// Canonical result returned by `minimize` and `minimize_simplex`.
///
/// - `theta_hat`: best parameter vector found.
/// - `value`: best objective value `c(θ̂)`.
/// - `converged`: `true` only if the solver stopped because its own
///   convergence test fired (or a target cost was reached). Hitting the
///   iteration cap is *not* convergence.
/// - `status`: human-readable termination status string.
/// - `iterations`: number of optimizer iterations performed.
/// - `fn_evals`: function-evaluation counters reported by `argmin`.
/// - `grad_norm`: norm of the last available gradient, if present.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimOutcome {
    pub theta_hat: Theta,
    pub value: f64,
    pub converged: bool,
    pub status: String,
    pub iterations: usize,
    pub fn_evals: FnEvalMap,
    pub grad_norm: Option<f64>,
}

impl OptimOutcome {
    /// Build a validated [`OptimOutcome`] from raw solver state.
    ///
    /// # Errors
    /// - Propagates any validation errors for `theta_hat` or `value`.
    pub fn new(
        theta_hat_opt: Option<Theta>, value: f64, termination: TerminationStatus,
        iterations: u64, fn_evals: FnEvalMap, grad: Option<Grad>,
    ) -> OptResult<Self> {
        let theta_hat = validate_theta_hat(theta_hat_opt)?;
        validate_value(value)?;
        let (converged, status) = match termination {
            TerminationStatus::NotTerminated => (false, "Not terminated".to_string()),
            TerminationStatus::Terminated(reason) => {
                let converged = matches!(
                    reason,
                    TerminationReason::SolverConverged | TerminationReason::TargetCostReached
                );
                (converged, format!("{reason:?}"))
            }
        };
        let iterations = iterations as usize;
        let grad_norm = grad.map(|g| g.l2_norm());
        Ok(Self { theta_hat, value, converged, status, iterations, fn_evals, grad_norm })
    }
}
