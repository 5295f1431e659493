//! Multi-start regression-quantile optimizer.
//!
//! Purpose
//! -------
//! Minimize the non-convex tick loss over β by random search followed by
//! local refinement of the most promising candidates.
//!
//! Key behaviors
//! -------------
//! - **Seeding** ([`draw_seeds`]): draw `n_draws` vectors from
//!   `U[0, 1]^d`, evaluate the loss of each and keep the `n_keep` best in a
//!   bounded best-of list. Draws whose loss cannot be evaluated (igarch
//!   radicand, non-finite loss) are not candidates.
//! - **Refinement** ([`refine_seed`]): alternate one Nelder–Mead pass and
//!   one L-BFGS pass until a pass improves the loss by less than `tol`, or
//!   `max_passes` is reached.
//! - **Selection** ([`multi_start`]): refine every retained seed and keep
//!   the smallest final loss; ties go to the lower seed index.
//!
//! Failure policy
//! --------------
//! - A simplex pass that errors or stops at its iteration cap fails the
//!   seed with `OptimizationFailure { seed, iteration }`.
//! - An L-BFGS pass that raises a model fault (e.g. an igarch radicand
//!   violation along the line search) fails the seed the same way.
//! - An L-BFGS pass whose line search fails on the non-smooth loss reports
//!   the best point it reached, which is kept if it improves the loss. A
//!   pass that breaks down with no usable point (non-finite cost) ends the
//!   refinement of that seed with the simplex optimum, reported as
//!   unconverged.
//! - Failed seeds are skipped with a `warn!` event; the fit fails with the
//!   last `OptimizationFailure` only when every seed failed.
//!
//! Invariants & assumptions
//! ------------------------
//! - All random numbers are drawn during seeding, in a fixed order, so the
//!   result is a pure function of the RNG state, data and options.
//! - [`refine_seed`] holds no shared state and may run seeds in any order.
use crate::{
    caviar::{
        core::{
            data::ReturnSeries,
            options::{RefineOptions, SeedingOptions},
        },
        errors::{CaviarError, CaviarResult},
        models::objectives::RqObjective,
    },
    optimization::{
        errors::OptResult,
        objective_optimizer::{OptimOutcome, minimize, minimize_simplex},
    },
};
use ndarray::Array1;
use rand::Rng;
use tracing::{debug, trace, warn};

/// A β vector and its tick loss.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub beta: Array1<f64>,
    pub loss: f64,
}

/// Outcome of refining one seed.
#[derive(Debug, Clone, PartialEq)]
pub struct RefinedSeed {
    pub seed: usize,
    pub beta: Array1<f64>,
    pub loss: f64,
    /// Local-optimizer passes performed.
    pub passes: usize,
    /// `true` when the improvement rule stopped the refinement, `false`
    /// when `max_passes` or a quasi-Newton breakdown did.
    pub converged: bool,
}

/// How one L-BFGS pass leaves the refinement of a seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PassVerdict {
    /// Improvement at least `tol`; run another simplex pass.
    Continue,
    /// Improvement below `tol`.
    Converged,
    /// Numerical breakdown with no usable point; the current optimum stands.
    BrokeDown,
}

/// Fold an L-BFGS pass into the running optimum `(beta, loss)`.
///
/// # Errors
/// Any non-numerical optimizer error, unchanged.
fn absorb_quasi_newton(
    result: OptResult<OptimOutcome>, beta: &mut Array1<f64>, loss: &mut f64, tol: f64,
) -> OptResult<PassVerdict> {
    match result {
        Ok(out) => {
            let improvement = *loss - out.value;
            if out.value <= *loss {
                *beta = out.theta_hat;
                *loss = out.value;
            }
            Ok(if improvement < tol { PassVerdict::Converged } else { PassVerdict::Continue })
        }
        Err(e) if e.is_numerical() => Ok(PassVerdict::BrokeDown),
        Err(e) => Err(e),
    }
}

/// Draw candidates uniformly from `[0, 1]^d` and keep the best `n_keep`.
///
/// The best-of list is kept sorted by loss; a stable sort leaves earlier
/// draws ahead of later ones with equal loss.
///
/// # Errors
/// `CaviarError::NoViableSeeds` when no draw produced a finite loss.
pub fn draw_seeds<R: Rng + ?Sized>(
    objective: &RqObjective, returns: &ReturnSeries, opts: &SeedingOptions, rng: &mut R,
) -> CaviarResult<Vec<Candidate>> {
    let dim = objective.recurrence.variant.beta_dim();
    let mut best: Vec<Candidate> = Vec::with_capacity(opts.n_keep + 1);
    let mut rejected = 0usize;

    for _ in 0..opts.n_draws {
        let beta: Array1<f64> = (0..dim).map(|_| rng.gen_range(0.0..1.0)).collect();
        let loss = match objective.loss(beta.view(), returns) {
            Ok(loss) if loss.is_finite() => loss,
            _ => {
                rejected += 1;
                continue;
            }
        };
        if best.len() == opts.n_keep && loss >= best[opts.n_keep - 1].loss {
            continue;
        }
        best.push(Candidate { beta, loss });
        best.sort_by(|a, b| a.loss.total_cmp(&b.loss));
        best.truncate(opts.n_keep);
    }

    debug!(
        draws = opts.n_draws,
        rejected,
        kept = best.len(),
        best_loss = best.first().map(|c| c.loss),
        "seeding finished"
    );
    if best.is_empty() {
        return Err(CaviarError::NoViableSeeds { draws: opts.n_draws });
    }
    Ok(best)
}

/// Alternate Nelder–Mead and L-BFGS passes from one seed.
///
/// `seed` only labels events and errors.
///
/// # Errors
/// `CaviarError::OptimizationFailure { seed, iteration, reason }` per the
/// failure policy in the module docs.
pub fn refine_seed(
    objective: &RqObjective, returns: &ReturnSeries, seed: usize, start: Candidate,
    opts: &RefineOptions,
) -> CaviarResult<RefinedSeed> {
    let failure = |iteration: usize, reason: String| CaviarError::OptimizationFailure {
        seed,
        iteration,
        reason,
    };
    let Candidate { mut beta, mut loss } = start;
    let mut passes = 0;

    while passes < opts.max_passes {
        // ---- Simplex pass ----
        passes += 1;
        let out = minimize_simplex(objective, beta.clone(), returns, &opts.simplex)
            .map_err(|e| failure(passes, e.to_string()))?;
        if !out.converged {
            return Err(failure(passes, format!("simplex did not converge ({})", out.status)));
        }
        let improvement = loss - out.value;
        trace!(seed, pass = passes, loss = out.value, improvement, "simplex pass");
        if out.value <= loss {
            beta = out.theta_hat;
            loss = out.value;
        }
        if improvement < opts.tol {
            return Ok(RefinedSeed { seed, beta, loss, passes, converged: true });
        }
        if passes == opts.max_passes {
            break;
        }

        // ---- Quasi-Newton pass ----
        passes += 1;
        let result = minimize(objective, beta.clone(), returns, &opts.lbfgs);
        let verdict = absorb_quasi_newton(result, &mut beta, &mut loss, opts.tol)
            .map_err(|e| failure(passes, e.to_string()))?;
        trace!(seed, pass = passes, loss, ?verdict, "quasi-Newton pass");
        match verdict {
            PassVerdict::Continue => {}
            PassVerdict::Converged => {
                return Ok(RefinedSeed { seed, beta, loss, passes, converged: true });
            }
            PassVerdict::BrokeDown => {
                debug!(seed, pass = passes, "quasi-Newton pass broke down; keeping simplex optimum");
                return Ok(RefinedSeed { seed, beta, loss, passes, converged: false });
            }
        }
    }

    debug!(seed, passes, loss, "refinement stopped at the pass cap");
    Ok(RefinedSeed { seed, beta, loss, passes, converged: false })
}

/// Seed, refine every retained candidate, and return the best.
///
/// # Errors
/// - `CaviarError::NoViableSeeds` from seeding.
/// - The last `CaviarError::OptimizationFailure` if every seed failed.
pub fn multi_start<R: Rng + ?Sized>(
    objective: &RqObjective, returns: &ReturnSeries, seeding: &SeedingOptions,
    refine: &RefineOptions, rng: &mut R,
) -> CaviarResult<RefinedSeed> {
    let seeds = draw_seeds(objective, returns, seeding, rng)?;
    let outcomes = seeds
        .into_iter()
        .enumerate()
        .map(|(index, seed)| refine_seed(objective, returns, index, seed, refine));
    select_best(outcomes, seeding.n_draws)
}

/// Keep the lowest-loss refined seed, skipping failures; ties go to the
/// earlier seed.
///
/// # Errors
/// - The last failure when no seed succeeded.
/// - `CaviarError::NoViableSeeds { draws }` for an empty input.
fn select_best(
    outcomes: impl IntoIterator<Item = CaviarResult<RefinedSeed>>, draws: usize,
) -> CaviarResult<RefinedSeed> {
    let mut best: Option<RefinedSeed> = None;
    let mut last_failure: Option<CaviarError> = None;

    for outcome in outcomes {
        match outcome {
            Ok(refined) => {
                debug!(seed = refined.seed, loss = refined.loss, passes = refined.passes, "seed refined");
                if best.as_ref().is_none_or(|b| refined.loss < b.loss) {
                    best = Some(refined);
                }
            }
            Err(err) => {
                warn!(error = %err, "seed failed; continuing with remaining seeds");
                last_failure = Some(err);
            }
        }
    }

    match (best, last_failure) {
        (Some(best), _) => Ok(best),
        (None, Some(err)) => Err(err),
        (None, None) => Err(CaviarError::NoViableSeeds { draws }),
    }
}
