//! CAViaR model facade.
//!
//! Purpose
//! -------
//! Tie a [`CaviarSpec`] and [`CaviarOptions`] to the two estimators:
//! regression quantiles via [`multi_start`] and Asymmetric-Laplace maximum
//! likelihood via [`fit_ald`]. A fit returns an immutable [`FitResult`];
//! the model itself holds no fitted state and may be reused.
//!
//! Key behaviors
//! -------------
//! - Resolve VaR₀ (fixed or data-derived) once per fit.
//! - Dispatch on [`Method`].
//! - Recompute the VaR path at the estimate, together with the carry value
//!   `var0_out` for out-of-sample continuation.
//!
//! Invariants & assumptions
//! ------------------------
//! - The RNG is supplied by the caller; with a seeded generator the fit is
//!   deterministic.
//! - Estimates are never clamped after the fact. If the recurrence rejects
//!   the final β, the fit fails with that error.
use crate::caviar::{
    core::{
        data::ReturnSeries,
        options::CaviarOptions,
        recurrence::CaviarRecurrence,
        spec::{CaviarSpec, Method},
    },
    errors::CaviarResult,
    models::{
        ald_mle::fit_ald,
        fit::FitResult,
        multi_start::multi_start,
        objectives::{AldObjective, RqObjective},
    },
};
use ndarray::Array1;
use rand::Rng;
use tracing::debug;

/// CAViaR model: what to estimate and how.
#[derive(Debug, Clone, PartialEq)]
pub struct CaviarModel {
    pub spec: CaviarSpec,
    pub options: CaviarOptions,
}

impl CaviarModel {
    pub fn new(spec: CaviarSpec, options: CaviarOptions) -> Self {
        Self { spec, options }
    }

    /// Model with default options.
    pub fn with_spec(spec: CaviarSpec) -> Self {
        Self::new(spec, CaviarOptions::default())
    }

    /// Estimate the model on `returns`.
    ///
    /// ## Steps
    /// 1. Resolve VaR₀ from the spec (fixed, or the empirical quantile of
    ///    the leading window).
    /// 2. `Method::Rq`: seed, refine and select β by tick loss;
    ///    `Method::Mle`: fit `[τ, β]` by ALD likelihood with retries.
    /// 3. Run the recurrence once more at the estimate to obtain the
    ///    in-sample path and `var0_out`.
    ///
    /// # Errors
    /// - `NoViableSeeds` / `OptimizationFailure` from the RQ estimator.
    /// - `NumericalInstability` from the MLE retry loop.
    /// - `InvalidParameterDimension` / `NonPositiveVariance` from the
    ///   recurrence, at any stage.
    pub fn fit<R: Rng + ?Sized>(&self, returns: &ReturnSeries, rng: &mut R) -> CaviarResult<FitResult> {
        let var0 = self.spec.resolve_var0(returns);
        let recurrence = CaviarRecurrence::from_spec(&self.spec);
        debug!(
            variant = %self.spec.variant,
            quantile = self.spec.quantile,
            method = ?self.spec.method,
            len = returns.len(),
            var0,
            "fitting CAViaR"
        );

        let (beta, tau, objective, converged, attempts): (Array1<f64>, Option<f64>, f64, bool, usize) =
            match self.spec.method {
                Method::Rq => {
                    let objective = RqObjective::new(recurrence, var0);
                    let seeding = self.options.seeding_for(self.spec.variant);
                    let best =
                        multi_start(&objective, returns, &seeding, &self.options.refine, rng)?;
                    (best.beta, None, best.loss, best.converged, best.passes)
                }
                Method::Mle => {
                    let objective = AldObjective::new(recurrence, var0);
                    let est = fit_ald(&objective, returns, &self.options.mle, rng)?;
                    (est.beta, Some(est.tau), est.nll, est.converged, est.attempts)
                }
            };

        let (var_in, var0_out) = recurrence.compute_var_with_carry(beta.view(), returns.view(), var0)?;
        debug!(objective, converged, attempts, var0_out, "CAViaR fit finished");

        Ok(FitResult {
            beta,
            tau,
            objective,
            converged,
            var_in,
            var0,
            var0_out,
            attempts,
            spec: self.spec,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::caviar::core::{
        options::{MleFitOptions, RefineOptions, SeedingOptions},
        spec::Variant,
    };
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn alternating(len: usize) -> ReturnSeries {
        let data: Array1<f64> = (0..len).map(|t| if t % 2 == 0 { 1.0 } else { -1.0 }).collect();
        ReturnSeries::new(data).unwrap()
    }

    fn small_options() -> CaviarOptions {
        CaviarOptions::new(
            Some(SeedingOptions::new(100, 2).unwrap()),
            RefineOptions::default(),
            MleFitOptions::default(),
        )
    }

    #[test]
    // Purpose
    // -------
    // An RQ fit returns a consistent, self-describing result.
    //
    // Given
    // -----
    // - symmetric, q = 0.05, fixed VaR₀ = -1, 60 alternating returns.
    //
    // Expect
    // ------
    // - β of length 3, no τ, `var_in` aligned and starting at VaR₀.
    // - `var_in` and `var0_out` match a fresh recurrence run at β̂.
    fn rq_fit_returns_aligned_var_path_and_carry() {
        // Arrange
        let spec = CaviarSpec::new(Variant::Symmetric, 0.05, Method::Rq, 10.0, Some(-1.0)).unwrap();
        let model = CaviarModel::new(spec, small_options());
        let returns = alternating(60);
        let mut rng = ChaCha8Rng::seed_from_u64(17);

        // Act
        let fit = model.fit(&returns, &mut rng).unwrap();

        // Assert
        assert_eq!(fit.beta.len(), 3);
        assert!(fit.tau.is_none());
        assert_eq!(fit.var_in.len(), 60);
        assert_eq!(fit.var_in[0], -1.0);
        let (path, carry) = CaviarRecurrence::from_spec(&spec)
            .compute_var_with_carry(fit.beta.view(), returns.view(), -1.0)
            .unwrap();
        assert_eq!(fit.var_in, path);
        assert_eq!(fit.var0_out, carry);
    }

    #[test]
    // Purpose
    // -------
    // An MLE fit reports τ and stays within the attempt cap; a missing VaR₀
    // is derived from the data.
    //
    // Given
    // -----
    // - adaptive, q = 0.05, no VaR₀, 40 alternating returns.
    //
    // Expect
    // ------
    // - `tau > 0`, `attempts <= 5`, `var0` equals the empirical 5% quantile
    //   of the series (-1).
    fn mle_fit_reports_tau_and_derived_var0() {
        // Arrange
        let spec = CaviarSpec::with_defaults(Variant::Adaptive, 0.05, Method::Mle).unwrap();
        let model = CaviarModel::with_spec(spec);
        let mut rng = ChaCha8Rng::seed_from_u64(4);

        // Act
        let fit = model.fit(&alternating(40), &mut rng).unwrap();

        // Assert
        assert!(fit.tau.unwrap() > 0.0);
        assert!(fit.attempts <= 5);
        assert_eq!(fit.var0, -1.0);
        assert_eq!(fit.var_in[0], -1.0);
    }
}
