//! CAViaR options — configuration for the estimation workflows.
//!
//! Purpose
//! -------
//! Collect the tuning knobs of CAViaR estimation in one place:
//! random seeding of the multi-start search ([`SeedingOptions`]), the
//! alternating simplex/quasi-Newton refinement ([`RefineOptions`]) and the
//! Asymmetric-Laplace retry loop ([`MleFitOptions`]). [`CaviarOptions`]
//! bundles the three.
//!
//! Invariants & assumptions
//! ------------------------
//! - Every counter is at least one and every tolerance is finite and
//!   strictly positive; constructors enforce this.
//! - Optimizer sub-options ([`SimplexOptions`], [`LbfgsOptions`]) are
//!   validated by their own builders and stored as-is.
//! - When no seeding options are supplied, the per-variant defaults of
//!   [`SeedingOptions::for_variant`] apply.
use crate::{
    caviar::{
        core::spec::Variant,
        errors::{CaviarError, CaviarResult},
    },
    optimization::objective_optimizer::{LbfgsOptions, LineSearcher, SimplexOptions, Tolerances},
};

/// Random-search stage of the multi-start optimizer.
///
/// - `n_draws`: number of uniform `[0, 1]^d` candidates evaluated.
/// - `n_keep`: number of best candidates carried into refinement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedingOptions {
    pub n_draws: usize,
    pub n_keep: usize,
}

impl SeedingOptions {
    /// # Errors
    /// `CaviarError::InvalidOption` unless `1 <= n_keep <= n_draws`.
    pub fn new(n_draws: usize, n_keep: usize) -> CaviarResult<Self> {
        if n_keep == 0 {
            return Err(CaviarError::InvalidOption {
                name: "n_keep",
                reason: "at least one seed must be retained",
            });
        }
        if n_draws < n_keep {
            return Err(CaviarError::InvalidOption {
                name: "n_draws",
                reason: "must be at least n_keep",
            });
        }
        Ok(Self { n_draws, n_keep })
    }

    /// Engle–Manganelli style pool sizes per variant.
    pub fn for_variant(variant: Variant) -> Self {
        match variant {
            Variant::Adaptive => Self { n_draws: 10_000, n_keep: 5 },
            Variant::Symmetric => Self { n_draws: 10_000, n_keep: 10 },
            Variant::Asymmetric => Self { n_draws: 100_000, n_keep: 15 },
            Variant::Igarch => Self { n_draws: 10_000, n_keep: 10 },
        }
    }
}

/// Alternating refinement of one seed.
///
/// - `tol`: stop once a pass improves the loss by less than this (ε).
/// - `max_passes`: hard cap on simplex + quasi-Newton passes per seed.
/// - `simplex`: Nelder–Mead settings.
/// - `lbfgs`: quasi-Newton settings.
#[derive(Debug, Clone, PartialEq)]
pub struct RefineOptions {
    pub tol: f64,
    pub max_passes: usize,
    pub simplex: SimplexOptions,
    pub lbfgs: LbfgsOptions,
}

impl RefineOptions {
    /// # Errors
    /// `CaviarError::InvalidOption` for a non-positive `tol` or zero
    /// `max_passes`.
    pub fn new(
        tol: f64, max_passes: usize, simplex: SimplexOptions, lbfgs: LbfgsOptions,
    ) -> CaviarResult<Self> {
        if !tol.is_finite() || tol <= 0.0 {
            return Err(CaviarError::InvalidOption {
                name: "tol",
                reason: "must be finite and strictly positive",
            });
        }
        if max_passes == 0 {
            return Err(CaviarError::InvalidOption {
                name: "max_passes",
                reason: "at least one pass is required",
            });
        }
        Ok(Self { tol, max_passes, simplex, lbfgs })
    }
}

impl Default for RefineOptions {
    fn default() -> Self {
        Self {
            tol: 1e-10,
            max_passes: 50,
            simplex: SimplexOptions::default(),
            lbfgs: LbfgsOptions {
                tols: Tolerances { tol_grad: Some(1e-8), tol_cost: Some(1e-12), max_iter: Some(200) },
                line_searcher: LineSearcher::MoreThuente,
                verbose: false,
                lbfgs_mem: None,
            },
        }
    }
}

/// Asymmetric-Laplace retry loop.
///
/// - `max_attempts`: local minimizations per starting point before the last
///   result is accepted unconverged.
/// - `max_resamples`: fresh random starts allowed after numerical breakdowns.
/// - `lbfgs`: quasi-Newton settings for each attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct MleFitOptions {
    pub max_attempts: usize,
    pub max_resamples: usize,
    pub lbfgs: LbfgsOptions,
}

impl MleFitOptions {
    /// # Errors
    /// `CaviarError::InvalidOption` for `max_attempts == 0`.
    pub fn new(max_attempts: usize, max_resamples: usize, lbfgs: LbfgsOptions) -> CaviarResult<Self> {
        if max_attempts == 0 {
            return Err(CaviarError::InvalidOption {
                name: "max_attempts",
                reason: "at least one attempt is required",
            });
        }
        Ok(Self { max_attempts, max_resamples, lbfgs })
    }
}

impl Default for MleFitOptions {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            max_resamples: 5,
            lbfgs: LbfgsOptions {
                tols: Tolerances { tol_grad: Some(1e-6), tol_cost: Some(1e-12), max_iter: Some(500) },
                line_searcher: LineSearcher::MoreThuente,
                verbose: false,
                lbfgs_mem: None,
            },
        }
    }
}

/// Bundle of all CAViaR estimation options.
///
/// `seeding = None` selects [`SeedingOptions::for_variant`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CaviarOptions {
    pub seeding: Option<SeedingOptions>,
    pub refine: RefineOptions,
    pub mle: MleFitOptions,
}

impl CaviarOptions {
    pub fn new(seeding: Option<SeedingOptions>, refine: RefineOptions, mle: MleFitOptions) -> Self {
        Self { seeding, refine, mle }
    }

    /// Seeding options in effect for `variant`.
    pub fn seeding_for(&self, variant: Variant) -> SeedingOptions {
        self.seeding.unwrap_or_else(|| SeedingOptions::for_variant(variant))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // Constructors reject empty pools, zero caps and bad tolerances.
    fn constructors_reject_degenerate_settings() {
        assert!(SeedingOptions::new(10, 0).is_err());
        assert!(SeedingOptions::new(3, 5).is_err());
        assert!(SeedingOptions::new(100, 5).is_ok());
        let refine = RefineOptions::default();
        assert!(RefineOptions::new(0.0, 5, refine.simplex, refine.lbfgs.clone()).is_err());
        assert!(RefineOptions::new(1e-10, 0, refine.simplex, refine.lbfgs.clone()).is_err());
        assert!(MleFitOptions::new(0, 5, LbfgsOptions::default()).is_err());
    }

    #[test]
    // Purpose
    // -------
    // Without explicit seeding, the per-variant pool sizes apply.
    //
    // Expect
    // ------
    // - asymmetric → (100_000, 15); an explicit choice overrides it.
    fn seeding_defaults_follow_variant() {
        let opts = CaviarOptions::default();
        assert_eq!(
            opts.seeding_for(Variant::Asymmetric),
            SeedingOptions { n_draws: 100_000, n_keep: 15 }
        );
        assert_eq!(opts.seeding_for(Variant::Adaptive).n_keep, 5);

        let custom = CaviarOptions { seeding: Some(SeedingOptions::new(50, 2).unwrap()), ..opts };
        assert_eq!(custom.seeding_for(Variant::Asymmetric).n_draws, 50);
    }
}
