//! Execution helpers that run an `argmin` solver on an objective and return
//! a crate-friendly [`OptimOutcome`].
use crate::optimization::{
    errors::{OptError, OptResult},
    objective_optimizer::{
        FnEvalMap, Grad, LbfgsOptions, Objective, OptimOutcome, SimplexOptions, Theta,
        adapter::{ArgMinAdapter, BestPoint, SimplexAdapter},
        types::Simplex,
    },
};
#[cfg(feature = "obs_slog")]
use argmin::core::{CostFunction, Gradient};
use argmin::core::{
    Executor, IterState, Solver, State, TerminationReason, TerminationStatus,
};
#[cfg(feature = "obs_slog")]
use argmin_math::ArgminL2Norm;

/// Run an L-BFGS optimization.
///
/// Wires up the objective via [`ArgMinAdapter`], the chosen solver, the
/// initial parameter `theta0`, an optional observer (behind `obs_slog`) and
/// the optional `max_iters` cap, then converts the final state into an
/// [`OptimOutcome`] whose `value` is the best cost `c(θ̂)`.
///
/// # Errors
/// - Propagates any `argmin` runtime error (objective failures, line-search
///   failures, ...) via `From<argmin::core::Error>`.
/// - Propagates validation errors from [`OptimOutcome::new`].
pub fn run_lbfgs<'a, F, S>(
    theta0: Theta, opts: &LbfgsOptions, problem: ArgMinAdapter<'a, F>, solver: S,
) -> OptResult<OptimOutcome>
where
    F: Objective,
    S: Solver<ArgMinAdapter<'a, F>, IterState<Theta, Grad, (), (), (), f64>> + Send + 'static,
{
    #[cfg(feature = "obs_slog")]
    if opts.verbose {
        log_initial_state(&theta0, &problem)?;
    }
    let mut optimizer = Executor::new(problem, solver);
    optimizer = optimizer.configure(|state| state.param(theta0));
    #[cfg(feature = "obs_slog")]
    if opts.verbose {
        let observer = argmin_observer_slog::SlogLogger::term_noblock();
        optimizer = optimizer.add_observer(observer, argmin::core::observers::ObserverMode::Always);
    }
    if let Some(max_iter) = opts.tols.max_iter {
        optimizer = optimizer.configure(|state| state.max_iters(max_iter as u64));
    }

    let mut result = optimizer.run()?.state().clone();
    let iterations = result.get_iter();
    let function_counts = result.get_func_counts().clone();
    let termination = result.get_termination_status().clone();
    let grad = result.take_gradient();
    OptimOutcome::new(
        result.take_best_param(),
        result.get_best_cost(),
        termination,
        iterations,
        function_counts,
        grad,
    )
}

/// Run a Nelder–Mead optimization.
///
/// The solver already carries its initial simplex, so only the iteration cap
/// is configured on the executor. The outcome never carries a gradient norm.
///
/// # Errors
/// - Propagates any `argmin` runtime error via `From<argmin::core::Error>`.
/// - Propagates validation errors from [`OptimOutcome::new`]; in particular
///   a best cost of `+∞` (every vertex infeasible) is `NonFiniteCost`.
pub fn run_simplex<'a, F>(
    opts: &SimplexOptions, problem: SimplexAdapter<'a, F>, solver: Simplex,
) -> OptResult<OptimOutcome>
where
    F: Objective,
{
    let optimizer = Executor::new(problem, solver)
        .configure(|state| state.max_iters(opts.max_iter as u64));

    let mut result = optimizer.run()?.state().clone();
    let iterations = result.get_iter();
    let function_counts = result.get_func_counts().clone();
    let termination = result.get_termination_status().clone();
    OptimOutcome::new(
        result.take_best_param(),
        result.get_best_cost(),
        termination,
        iterations,
        function_counts,
        None,
    )
}

/// Salvage a quasi-Newton run whose line search broke down.
///
/// Returns an unconverged [`OptimOutcome`] at the lowest cost recorded in
/// `best`, with the breakdown carried in `status`. Iteration and evaluation
/// counts of the aborted run are not available and are reported as zero.
///
/// # Errors
/// Returns `err` unchanged when no finite cost was ever recorded.
pub fn recover_from_breakdown(best: &BestPoint, err: OptError) -> OptResult<OptimOutcome> {
    let Some((theta, cost)) = best.take() else {
        return Err(err);
    };
    let reason = TerminationReason::SolverExit(format!("line search breakdown: {err}"));
    OptimOutcome::new(
        Some(theta),
        cost,
        TerminationStatus::Terminated(reason),
        0,
        FnEvalMap::new(),
        None,
    )
}

// ---- Helper Methods ----

#[cfg(feature = "obs_slog")]
fn log_initial_state<F>(theta0: &Theta, problem: &ArgMinAdapter<'_, F>) -> OptResult<()>
where
    F: Objective,
{
    let c0 = problem.cost(theta0)?;
    let g0n = problem.gradient(theta0).ok().map(|g| g.l2_norm());

    eprintln!(
        "init: cost(theta0) = {:.6}{}",
        c0,
        g0n.map(|n| format!(", ||grad|| = {:.6}", n)).unwrap_or_default()
    );
    Ok(())
}
