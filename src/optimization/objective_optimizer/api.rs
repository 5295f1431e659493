//! High-level entry points for minimizing a user-provided [`Objective`].
//!
//! - [`minimize`] selects an L-BFGS solver with either Hager–Zhang or
//!   More–Thuente line search and delegates to `run_lbfgs`.
//! - [`minimize_simplex`] builds a Nelder–Mead simplex around the starting
//!   point and delegates to `run_simplex`.
use crate::optimization::{
    errors::OptResult,
    objective_optimizer::{
        OptimOutcome, Theta,
        adapter::{ArgMinAdapter, BestPoint, SimplexAdapter},
        builders::{build_optimizer_hager_zhang, build_optimizer_more_thuente, build_simplex},
        run::{recover_from_breakdown, run_lbfgs, run_simplex},
        traits::{LbfgsOptions, LineSearcher, Objective, SimplexOptions},
        validation::validate_theta0,
    },
};

/// Minimize a cost `c(θ)` using L-BFGS with the chosen line search.
///
/// # Behavior
/// - Validates the initial guess via `validate_theta0` and `f.check`.
/// - Wraps `(f, data)` in an `ArgMinAdapter`.
/// - Builds an L-BFGS solver based on `opts.line_searcher`.
/// - Calls `run_lbfgs` and returns its [`OptimOutcome`].
/// - If the line search breaks down mid-run (see
///   [`OptError::is_search_breakdown`]), returns an unconverged outcome at
///   the lowest cost evaluated so far instead of the error.
///
/// # Errors
/// - Propagates any error from the starting-point validation or `f.check`.
/// - Propagates builder errors from `build_optimizer_*`.
/// - Propagates runtime errors from `run_lbfgs` (objective faults raised
///   mid-run, non-finite costs) and line-search breakdowns that happen
///   before any finite cost was evaluated.
///
/// [`OptError::is_search_breakdown`]: crate::optimization::errors::OptError::is_search_breakdown
///
/// # Example
/// ```no_run
/// use ndarray::array;
/// use rust_caviar::optimization::errors::OptResult;
/// use rust_caviar::optimization::objective_optimizer::{
///     minimize, LbfgsOptions, Objective, Theta,
/// };
///
/// struct Bowl;
/// impl Objective for Bowl {
///     type Data = ();
///     fn cost(&self, theta: &Theta, _: &()) -> OptResult<f64> {
///         Ok(theta.dot(theta))
///     }
///     fn check(&self, _: &Theta, _: &()) -> OptResult<()> {
///         Ok(())
///     }
/// }
///
/// let out = minimize(&Bowl, array![0.1, -0.2, 0.3], &(), &LbfgsOptions::default())?;
/// println!("θ̂ = {:?}", out.theta_hat);
/// # Ok::<(), rust_caviar::optimization::errors::OptError>(())
/// ```
pub fn minimize<F: Objective>(
    f: &F, theta0: Theta, data: &F::Data, opts: &LbfgsOptions,
) -> OptResult<OptimOutcome> {
    validate_theta0(&theta0)?;
    f.check(&theta0, data)?;
    let best = BestPoint::new();
    let problem = ArgMinAdapter::new(f, data).tracking(&best);
    let result = match opts.line_searcher {
        LineSearcher::MoreThuente => {
            let solver = build_optimizer_more_thuente(opts)?;
            run_lbfgs(theta0, opts, problem, solver)
        }
        LineSearcher::HagerZhang => {
            let solver = build_optimizer_hager_zhang(opts)?;
            run_lbfgs(theta0, opts, problem, solver)
        }
    };
    match result {
        Err(e) if e.is_search_breakdown() => recover_from_breakdown(&best, e),
        other => other,
    }
}

/// Minimize a cost `c(θ)` with the Nelder–Mead simplex method.
///
/// Infeasible vertices are scored `+∞` (see [`SimplexAdapter`]), so the
/// starting point itself may sit next to an infeasible region.
///
/// # Errors
/// - Propagates any error from the starting-point validation or `f.check`.
/// - Propagates builder and runtime errors, including `NonFiniteCost` when
///   no feasible vertex was ever found.
pub fn minimize_simplex<F: Objective>(
    f: &F, theta0: Theta, data: &F::Data, opts: &SimplexOptions,
) -> OptResult<OptimOutcome> {
    validate_theta0(&theta0)?;
    f.check(&theta0, data)?;
    let solver = build_simplex(&theta0, opts)?;
    let problem = SimplexAdapter::new(f, data);
    run_simplex(opts, problem, solver)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::{
        errors::OptError,
        objective_optimizer::{Cost, Grad, traits::Tolerances},
    };
    use ndarray::array;

    // Rosenbrock-free smooth bowl with minimum 0.5 at (1, -2).
    struct Bowl;

    impl Objective for Bowl {
        type Data = ();

        fn cost(&self, theta: &Theta, _: &()) -> OptResult<Cost> {
            Ok((theta[0] - 1.0).powi(2) + (theta[1] + 2.0).powi(2) + 0.5)
        }

        fn check(&self, theta: &Theta, _: &()) -> OptResult<()> {
            if theta.len() != 2 {
                return Err(OptError::ThetaLengthMismatch { expected: 2, actual: theta.len() });
            }
            Ok(())
        }

        fn grad(&self, theta: &Theta, _: &()) -> OptResult<Grad> {
            Ok(array![2.0 * (theta[0] - 1.0), 2.0 * (theta[1] + 2.0)])
        }
    }

    #[test]
    // Purpose
    // -------
    // L-BFGS with either line search reaches the bowl minimum and reports the
    // minimized cost as the outcome value.
    //
    // Given
    // -----
    // - `Bowl` started from the origin.
    //
    // Expect
    // ------
    // - θ̂ ≈ (1, -2) and value ≈ 0.5 for both line searches.
    fn minimize_reaches_bowl_minimum() {
        for searcher in [LineSearcher::MoreThuente, LineSearcher::HagerZhang] {
            // Arrange
            let tols = Tolerances::new(Some(1e-10), None, Some(200)).unwrap();
            let opts = LbfgsOptions::new(tols, searcher, false, None).unwrap();

            // Act
            let out = minimize(&Bowl, array![0.0, 0.0], &(), &opts).unwrap();

            // Assert
            assert!((out.theta_hat[0] - 1.0).abs() < 1e-5);
            assert!((out.theta_hat[1] + 2.0).abs() < 1e-5);
            assert!((out.value - 0.5).abs() < 1e-8);
        }
    }

    #[test]
    // Purpose
    // -------
    // Nelder–Mead reaches the same minimum and reports convergence through
    // its standard-deviation test.
    fn minimize_simplex_reaches_bowl_minimum() {
        // Arrange
        let opts = SimplexOptions::new(1e-12, 5_000, 0.05, 0.00025).unwrap();

        // Act
        let out = minimize_simplex(&Bowl, array![0.5, 0.5], &(), &opts).unwrap();

        // Assert
        assert!((out.theta_hat[0] - 1.0).abs() < 1e-3);
        assert!((out.theta_hat[1] + 2.0).abs() < 1e-3);
        assert!((out.value - 0.5).abs() < 1e-6);
        assert!(out.converged);
        assert!(out.grad_norm.is_none());
    }

    #[test]
    // Purpose
    // -------
    // Starting points are validated before any solver is built.
    fn minimize_rejects_invalid_starting_points() {
        let opts = LbfgsOptions::default();
        assert_eq!(
            minimize(&Bowl, Theta::zeros(0), &(), &opts).unwrap_err(),
            OptError::EmptyTheta
        );
        assert_eq!(
            minimize_simplex(&Bowl, array![1.0, 2.0, 3.0], &(), &SimplexOptions::default())
                .unwrap_err(),
            OptError::ThetaLengthMismatch { expected: 2, actual: 3 }
        );
    }
}
