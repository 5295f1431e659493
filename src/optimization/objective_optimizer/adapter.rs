//! Adapters that expose a user [`Objective`] as an `argmin` problem.
//!
//! Two wrappers live here:
//! - [`ArgMinAdapter`] serves gradient-based solvers. Its cost is the
//!   objective value, and non-finite values are hard errors. Analytic
//!   gradients are used when provided; otherwise the cost is
//!   finite-differenced. An optional [`BestPoint`] records the lowest
//!   finite cost evaluated, so a run that breaks down mid-search can still
//!   report where it got to.
//! - [`SimplexAdapter`] serves Nelder–Mead. A simplex vertex that lands in
//!   an infeasible region (non-finite cost or a non-positive variance term)
//!   is scored `+∞` so the simplex contracts away from it instead of
//!   aborting the whole search.
use std::cell::RefCell;

use crate::optimization::{
    errors::OptError,
    objective_optimizer::{
        traits::Objective,
        types::{Cost, Grad, Theta},
        validation::validate_grad,
    },
};
use argmin::core::{CostFunction, Error, Gradient};
use finitediff::FiniteDiff;

/// Bridges a user `Objective` to `argmin`'s `CostFunction` and `Gradient`.
///
/// - `CostFunction::cost` returns `c(θ)` and errors on non-finite values.
/// - `Gradient::gradient` returns:
///   - `∇c(θ)` if the user provides an analytic gradient, or
///   - a finite-difference gradient of the cost.
#[derive(Debug, Clone)]
pub struct ArgMinAdapter<'a, F: Objective> {
    pub f: &'a F,
    pub data: &'a F::Data,
    pub best: Option<&'a BestPoint>,
}

/// Lowest finite cost seen by a tracking [`ArgMinAdapter`], with its θ.
#[derive(Debug, Default)]
pub struct BestPoint {
    inner: RefCell<Option<(Theta, Cost)>>,
}

impl BestPoint {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep `(theta, cost)` if it improves on the stored point.
    pub fn record(&self, theta: &Theta, cost: Cost) {
        let mut slot = self.inner.borrow_mut();
        if slot.as_ref().is_none_or(|(_, best)| cost < *best) {
            *slot = Some((theta.clone(), cost));
        }
    }

    pub fn take(&self) -> Option<(Theta, Cost)> {
        self.inner.borrow_mut().take()
    }
}

impl<'a, F: Objective> CostFunction for ArgMinAdapter<'a, F> {
    type Param = Theta;
    type Output = Cost;

    /// Evaluate the cost `c(θ)`.
    ///
    /// # Errors
    /// - Propagates any `OptError` from the user's `cost` via `?`.
    /// - Returns `NonFiniteCost` if the value is not finite.
    fn cost(&self, theta: &Self::Param) -> Result<Self::Output, Error> {
        let output = self.f.cost(theta, self.data)?;
        if !output.is_finite() {
            return Err((OptError::NonFiniteCost { value: output }).into());
        }
        if let Some(best) = self.best {
            best.record(theta, output);
        }
        Ok(output)
    }
}

impl<'a, F: Objective> Gradient for ArgMinAdapter<'a, F> {
    type Param = Theta;
    type Gradient = Grad;

    /// Evaluate the gradient of the cost at `θ`.
    ///
    /// Behavior:
    /// - If the user implements `grad(θ, data)`, it is validated and returned.
    /// - Otherwise a finite-difference gradient of the cost is computed:
    ///   - *central* differences first;
    ///   - if any cost evaluation failed (captured via `closure_err`) or the
    ///     result is non-finite, *forward* differences once, validated again.
    ///
    /// The FD closure must return `f64`, so the first error is captured in
    /// `closure_err` and the closure returns `NaN`.
    ///
    /// # Errors
    /// - Propagates user errors from `grad` (non-`GradientNotImplemented`).
    /// - Propagates any error raised by cost evaluations performed during FD.
    /// - Returns validation errors for a wrong dimension or non-finite entries.
    fn gradient(&self, theta: &Self::Param) -> Result<Self::Gradient, Error> {
        let dim = theta.len();
        match self.f.grad(theta, self.data) {
            Ok(g) => {
                validate_grad(&g, dim)?;
                Ok(g)
            }
            Err(OptError::GradientNotImplemented) => {
                let closure_err: RefCell<Option<Error>> = RefCell::new(None);
                let cost_func = |theta: &Theta| -> f64 {
                    match self.cost(theta) {
                        Ok(val) => val,
                        Err(e) => {
                            let mut slot = closure_err.borrow_mut();
                            if slot.is_none() {
                                *slot = Some(e);
                            }
                            f64::NAN
                        }
                    }
                };
                let fd_grad = theta.central_diff(&cost_func);
                if closure_err.borrow().is_some() {
                    return run_fd_diff(theta, &cost_func, &closure_err);
                }
                match validate_grad(&fd_grad, dim) {
                    Ok(()) => Ok(fd_grad),
                    Err(_) => run_fd_diff(theta, &cost_func, &closure_err),
                }
            }
            Err(e) => Err(e.into()),
        }
    }
}

impl<'a, F: Objective> ArgMinAdapter<'a, F> {
    /// Construct a new adapter over a user `Objective` and its data.
    pub fn new(f: &'a F, data: &'a F::Data) -> Self {
        Self { f, data, best: None }
    }

    /// Record every finite cost evaluation into `best`.
    pub fn tracking(mut self, best: &'a BestPoint) -> Self {
        self.best = Some(best);
        self
    }
}

/// Bridges a user `Objective` to `argmin`'s `CostFunction` for Nelder–Mead.
///
/// Infeasible vertices score `+∞`: this covers non-finite costs and
/// [`OptError::NonPositiveVariance`]. Any other objective error aborts the
/// run.
#[derive(Debug, Clone)]
pub struct SimplexAdapter<'a, F: Objective> {
    pub f: &'a F,
    pub data: &'a F::Data,
}

impl<'a, F: Objective> SimplexAdapter<'a, F> {
    pub fn new(f: &'a F, data: &'a F::Data) -> Self {
        Self { f, data }
    }
}

impl<'a, F: Objective> CostFunction for SimplexAdapter<'a, F> {
    type Param = Theta;
    type Output = Cost;

    fn cost(&self, theta: &Self::Param) -> Result<Self::Output, Error> {
        match self.f.cost(theta, self.data) {
            Ok(value) if value.is_finite() => Ok(value),
            Ok(_) | Err(OptError::NonPositiveVariance { .. }) => Ok(f64::INFINITY),
            Err(e) => Err(e.into()),
        }
    }
}

/// Compute a forward-difference gradient of `func` at `theta`, with error capture.
///
/// Clears `closure_err`, runs `forward_diff`, returns any captured error, and
/// validates the resulting gradient.
///
/// # Errors
/// Returns any error captured during evaluation of `func` inside the FD routine
/// or by validation of the resulting gradient.
fn run_fd_diff<G: Fn(&Theta) -> f64>(
    theta: &Theta, func: &G, closure_err: &RefCell<Option<Error>>,
) -> Result<Grad, Error> {
    closure_err.replace(None);
    let fd_grad = theta.forward_diff(func);
    let dim = theta.len();
    if let Some(err) = closure_err.take() {
        return Err(err);
    }
    validate_grad(&fd_grad, dim)?;
    Ok(fd_grad)
}
