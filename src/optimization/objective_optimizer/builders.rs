//! objective_optimizer::builders — solver construction helpers.
//!
//! Purpose
//! -------
//! Provide small, focused builders for the solvers used by the objective
//! optimizer. These helpers hide Argmin's generic wiring and apply
//! crate-level options (tolerances, memory size, initial simplex geometry)
//! so higher-level code can request a configured solver without touching
//! Argmin-specific types.
//!
//! Key behaviors
//! -------------
//! - Construct L-BFGS solvers with either Hager–Zhang or More–Thuente line
//!   search and apply optional tolerances from [`LbfgsOptions`] via a shared
//!   configuration helper.
//! - Construct a Nelder–Mead solver around a starting point, building the
//!   initial simplex from [`SimplexOptions`].
//! - Leave the initial parameter vector (L-BFGS) and maximum iterations to
//!   the runner layer.
//!
//! Invariants & assumptions
//! ------------------------
//! - All solvers operate on [`Theta`], [`Grad`] and [`Cost`].
//! - The L-BFGS memory (`m`) is either `opts.lbfgs_mem` or
//!   [`DEFAULT_LBFGS_MEM`].
//! - The initial simplex has `d + 1` vertices for a `d`-dimensional start:
//!   the start itself plus one perturbation per coordinate.
//!
//! Testing notes
//! -------------
//! - Unit tests cover builder construction and the initial simplex layout.
//!   Full solves are exercised by the runner and API tests.
use argmin::solver::quasinewton::LBFGS;

use crate::optimization::{
    errors::OptResult,
    objective_optimizer::{
        traits::{LbfgsOptions, SimplexOptions},
        types::{
            Cost, DEFAULT_LBFGS_MEM, Grad, HagerZhangLS, LbfgsHagerZhang, LbfgsMoreThuente,
            MoreThuenteLS, Simplex, Theta,
        },
    },
};

/// Build an [`LbfgsHagerZhang`] solver configured with optional tolerances
/// from [`LbfgsOptions`].
///
/// # Errors
/// Returns `OptError` (via `From<argmin::core::Error>`) when Argmin rejects a
/// tolerance.
pub fn build_optimizer_hager_zhang(opts: &LbfgsOptions) -> OptResult<LbfgsHagerZhang> {
    let hager_zhang = HagerZhangLS::new();
    let mem = opts.lbfgs_mem.unwrap_or(DEFAULT_LBFGS_MEM);
    let lbfgs = LbfgsHagerZhang::new(hager_zhang, mem);
    configure_lbfgs(lbfgs, opts)
}

/// Build an [`LbfgsMoreThuente`] solver configured with optional tolerances
/// from [`LbfgsOptions`].
///
/// # Errors
/// Returns `OptError` (via `From<argmin::core::Error>`) when Argmin rejects a
/// tolerance.
pub fn build_optimizer_more_thuente(opts: &LbfgsOptions) -> OptResult<LbfgsMoreThuente> {
    let more_thuente = MoreThuenteLS::new();
    let mem = opts.lbfgs_mem.unwrap_or(DEFAULT_LBFGS_MEM);
    let lbfgs = LbfgsMoreThuente::new(more_thuente, mem);
    configure_lbfgs(lbfgs, opts)
}

/// Apply optional gradient and cost-change tolerances to an L-BFGS solver,
/// regardless of its line-search type.
///
/// When a tolerance is `None`, Argmin's default remains in effect.
///
/// # Errors
/// Returns `OptError` when `with_tolerance_grad` or `with_tolerance_cost`
/// rejects a value.
pub fn configure_lbfgs<L>(
    mut solver: LBFGS<L, Theta, Grad, Cost>, opts: &LbfgsOptions,
) -> OptResult<LBFGS<L, Theta, Grad, Cost>> {
    if let Some(g) = opts.tols.tol_grad {
        solver = solver.with_tolerance_grad(g)?;
    }
    if let Some(c) = opts.tols.tol_cost {
        solver = solver.with_tolerance_cost(c)?;
    }
    Ok(solver)
}

/// Build a Nelder–Mead solver whose initial simplex surrounds `theta0`.
///
/// # Errors
/// Returns `OptError` when Argmin rejects the standard-deviation tolerance.
pub fn build_simplex(theta0: &Theta, opts: &SimplexOptions) -> OptResult<Simplex> {
    let vertices = initial_simplex(theta0, opts);
    Ok(Simplex::new(vertices).with_sd_tolerance(opts.sd_tolerance)?)
}

/// Vertices of the starting simplex: `theta0` followed by one vertex per
/// coordinate. A non-zero coordinate `x` moves to `x·(1 + nonzero_step)`;
/// a zero coordinate moves to `zero_step`.
pub fn initial_simplex(theta0: &Theta, opts: &SimplexOptions) -> Vec<Theta> {
    let mut vertices = Vec::with_capacity(theta0.len() + 1);
    vertices.push(theta0.clone());
    for i in 0..theta0.len() {
        let mut vertex = theta0.clone();
        vertex[i] = if vertex[i] != 0.0 {
            vertex[i] * (1.0 + opts.nonzero_step)
        } else {
            opts.zero_step
        };
        vertices.push(vertex);
    }
    vertices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::objective_optimizer::traits::{LineSearcher, Tolerances};
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Basic construction of L-BFGS solvers with both line searches.
    // - Application of tolerances via `configure_lbfgs`.
    // - Geometry of the Nelder–Mead starting simplex.
    //
    // They intentionally DO NOT cover:
    // - End-to-end executor behavior, which is tested in `api`.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Both L-BFGS builders succeed with and without an explicit memory.
    fn lbfgs_builders_accept_default_and_explicit_memory() {
        // Arrange
        let tols = Tolerances::new(Some(1e-6), Some(1e-8), Some(50)).unwrap();
        let default_mem = LbfgsOptions::new(tols, LineSearcher::HagerZhang, false, None).unwrap();
        let explicit_mem =
            LbfgsOptions::new(tols, LineSearcher::MoreThuente, false, Some(11)).unwrap();

        // Act / Assert
        assert!(build_optimizer_hager_zhang(&default_mem).is_ok());
        assert!(build_optimizer_more_thuente(&explicit_mem).is_ok());
    }

    #[test]
    // Purpose
    // -------
    // `configure_lbfgs` keeps Argmin defaults when no tolerances are set.
    fn configure_lbfgs_respects_absent_tolerances() {
        // Arrange
        let raw = LBFGS::new(MoreThuenteLS::new(), DEFAULT_LBFGS_MEM);
        let tols = Tolerances::new(None, None, Some(50)).unwrap();
        let opts = LbfgsOptions::new(tols, LineSearcher::MoreThuente, false, None).unwrap();

        // Act
        let configured = configure_lbfgs(raw, &opts);

        // Assert
        assert!(configured.is_ok());
    }

    #[test]
    // Purpose
    // -------
    // The starting simplex perturbs one coordinate per vertex, using a
    // relative step for non-zero entries and an absolute step for zeros.
    //
    // Given
    // -----
    // - θ₀ = (2, 0) with default simplex options.
    //
    // Expect
    // ------
    // - Vertices (2, 0), (2.1, 0), (2, 0.00025).
    fn initial_simplex_uses_relative_and_absolute_steps() {
        // Arrange
        let opts = SimplexOptions::default();

        // Act
        let vertices = initial_simplex(&array![2.0, 0.0], &opts);

        // Assert
        assert_eq!(vertices.len(), 3);
        assert_eq!(vertices[0], array![2.0, 0.0]);
        assert!((vertices[1][0] - 2.1).abs() < 1e-12);
        assert_eq!(vertices[1][1], 0.0);
        assert_eq!(vertices[2], array![2.0, 0.00025]);
        assert!(build_simplex(&array![2.0, 0.0], &opts).is_ok());
    }
}
