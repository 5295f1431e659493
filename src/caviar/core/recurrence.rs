//! CAViaR VaR recurrences.
//!
//! Purpose
//! -------
//! Turn a parameter vector β and a return series into the VaR path for one
//! of the four CAViaR variants. This is the innermost routine of every
//! objective evaluation, so it is a single O(T) pass with one output
//! allocation and no randomness.
//!
//! Key behaviors
//! -------------
//! For `t = 1..T-1`, with `VaR[0] = VaR₀`:
//! - adaptive:   `VaR[t] = VaR[t-1] + β₁·(1/(1+exp(G·(y[t-1]-VaR[t-1]))) - q)`
//! - symmetric:  `VaR[t] = β₀ + β₁·VaR[t-1] + β₂·|y[t-1]|`
//! - asymmetric: `VaR[t] = β₀ + β₁·VaR[t-1] + β₂·max(y[t-1],0) + β₃·min(y[t-1],0)`
//! - igarch:     `VaR[t] = ±sqrt(β₀ + β₁·VaR[t-1]² + β₂·y[t-1]²)`
//!
//! Invariants & assumptions
//! ------------------------
//! - `β.len()` must equal [`Variant::beta_dim`].
//! - The igarch radicand must be finite and strictly positive at every step;
//!   the root takes the sign of the quantile's tail (negative for `q < 0.5`)
//!   so the path stays on the return scale used by the violation rule
//!   `y < VaR`.
//! - The adaptive sigmoid is evaluated through [`safe_logistic`], so large
//!   `G·(y - VaR)` never overflows.
use crate::{
    caviar::{
        core::spec::{CaviarSpec, Variant},
        errors::{CaviarError, CaviarResult},
    },
    optimization::numerical_stability::safe_logistic,
};
use ndarray::{Array1, ArrayView1};

/// Fixed part of a CAViaR recurrence: everything except β, the data and
/// the starting value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaviarRecurrence {
    pub variant: Variant,
    pub quantile: f64,
    pub smoothing: f64,
}

impl CaviarRecurrence {
    pub fn new(variant: Variant, quantile: f64, smoothing: f64) -> Self {
        Self { variant, quantile, smoothing }
    }

    pub fn from_spec(spec: &CaviarSpec) -> Self {
        Self::new(spec.variant, spec.quantile, spec.smoothing)
    }

    /// Check `β.len()` against the variant.
    ///
    /// # Errors
    /// `CaviarError::InvalidParameterDimension` on a mismatch.
    pub fn check_beta(&self, beta: ArrayView1<f64>) -> CaviarResult<()> {
        let expected = self.variant.beta_dim();
        if beta.len() != expected {
            return Err(CaviarError::InvalidParameterDimension { expected, actual: beta.len() });
        }
        Ok(())
    }

    /// One step of the recurrence: `VaR[t]` from `VaR[t-1]` and `y[t-1]`.
    ///
    /// `t` only labels errors. `beta` must already have the right length.
    ///
    /// # Errors
    /// `CaviarError::NonPositiveVariance` when the igarch radicand is not
    /// strictly positive or not finite.
    pub fn step(&self, beta: ArrayView1<f64>, prev_var: f64, prev_y: f64, t: usize) -> CaviarResult<f64> {
        match self.variant {
            Variant::Adaptive => {
                let indicator = safe_logistic(-self.smoothing * (prev_y - prev_var));
                Ok(prev_var + beta[0] * (indicator - self.quantile))
            }
            Variant::Symmetric => Ok(beta[0] + beta[1] * prev_var + beta[2] * prev_y.abs()),
            Variant::Asymmetric => Ok(beta[0]
                + beta[1] * prev_var
                + beta[2] * prev_y.max(0.0)
                + beta[3] * prev_y.min(0.0)),
            Variant::Igarch => {
                let radicand = beta[0] + beta[1] * prev_var * prev_var + beta[2] * prev_y * prev_y;
                if !radicand.is_finite() || radicand <= 0.0 {
                    return Err(CaviarError::NonPositiveVariance { t, value: radicand });
                }
                let root = radicand.sqrt();
                Ok(if self.quantile < 0.5 { -root } else { root })
            }
        }
    }

    /// Full VaR path aligned with `returns`; `VaR[0] = var0`.
    ///
    /// Only the in-sample steps `t = 1..T-1` run, so an igarch radicand is
    /// checked exactly at the indices of the returned path.
    ///
    /// # Errors
    /// - `CaviarError::InvalidParameterDimension` if β has the wrong length.
    /// - `CaviarError::NonPositiveVariance` from any igarch step.
    pub fn compute_var(
        &self, beta: ArrayView1<f64>, returns: ArrayView1<f64>, var0: f64,
    ) -> CaviarResult<Array1<f64>> {
        self.check_beta(beta)?;
        let n = returns.len();
        let mut var = Array1::zeros(n);
        if n == 0 {
            return Ok(var);
        }
        var[0] = var0;
        for t in 1..n {
            var[t] = self.step(beta, var[t - 1], returns[t - 1], t)?;
        }
        Ok(var)
    }

    /// Full VaR path plus the carry value `VaR[T]`, i.e. one more step after
    /// the last observation. The carry seeds an out-of-sample continuation.
    ///
    /// An empty `returns` yields an empty path and carries `var0` unchanged.
    ///
    /// # Errors
    /// Same as [`compute_var`](Self::compute_var); the carry step reports
    /// `NonPositiveVariance { t: T, .. }`.
    pub fn compute_var_with_carry(
        &self, beta: ArrayView1<f64>, returns: ArrayView1<f64>, var0: f64,
    ) -> CaviarResult<(Array1<f64>, f64)> {
        let var = self.compute_var(beta, returns, var0)?;
        let n = var.len();
        if n == 0 {
            return Ok((var, var0));
        }
        let carry = self.step(beta, var[n - 1], returns[n - 1], n)?;
        Ok((var, carry))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn returns() -> Array1<f64> {
        array![0.5, -1.2, 2.0, -0.3, 0.0, 1.1]
    }

    #[test]
    // Purpose
    // -------
    // Every variant returns a path aligned with the data and starting at
    // VaR₀.
    //
    // Given
    // -----
    // - Six returns, VaR₀ = -1.5, a valid β per variant.
    //
    // Expect
    // ------
    // - Length 6 and `VaR[0] == -1.5` for all four variants.
    fn compute_var_aligns_with_returns_and_starts_at_var0() {
        // Arrange
        let cases = [
            (Variant::Adaptive, array![0.4]),
            (Variant::Symmetric, array![-0.1, 0.8, -0.2]),
            (Variant::Asymmetric, array![-0.1, 0.8, 0.1, 0.3]),
            (Variant::Igarch, array![0.2, 0.7, 0.2]),
        ];
        for (variant, beta) in cases {
            let rec = CaviarRecurrence::new(variant, 0.05, 10.0);

            // Act
            let var = rec.compute_var(beta.view(), returns().view(), -1.5).unwrap();

            // Assert
            assert_eq!(var.len(), 6, "{variant}");
            assert_eq!(var[0], -1.5, "{variant}");
        }
    }

    #[test]
    // Purpose
    // -------
    // Check the symmetric and asymmetric updates against hand computation.
    fn linear_variants_match_hand_computation() {
        // Arrange
        let y = array![-2.0, 3.0];
        let sym = CaviarRecurrence::new(Variant::Symmetric, 0.05, 10.0);
        let asym = CaviarRecurrence::new(Variant::Asymmetric, 0.05, 10.0);

        // Act
        let v_sym = sym.compute_var(array![0.1, 0.5, -0.3].view(), y.view(), -1.0).unwrap();
        let v_asym =
            asym.compute_var(array![0.1, 0.5, -0.3, 0.4].view(), y.view(), -1.0).unwrap();

        // Assert
        // 0.1 + 0.5·(-1) - 0.3·2 = -1.0
        assert!((v_sym[1] + 1.0).abs() < 1e-12);
        // 0.1 + 0.5·(-1) - 0.3·0 + 0.4·(-2) = -1.2
        assert!((v_asym[1] + 1.2).abs() < 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // `β = [c, 0, 0]` removes feedback and shocks from the symmetric model.
    //
    // Expect
    // ------
    // - `VaR[t] == c` for every t ≥ 1.
    fn symmetric_without_feedback_is_constant() {
        let rec = CaviarRecurrence::new(Variant::Symmetric, 0.01, 10.0);
        let var = rec.compute_var(array![-2.5, 0.0, 0.0].view(), returns().view(), 7.0).unwrap();
        assert!(var.iter().skip(1).all(|&v| v == -2.5));
    }

    #[test]
    // Purpose
    // -------
    // The adaptive update moves VaR by `β₁·(indicator - q)` and stays
    // finite for extreme `G·(y - VaR)`.
    fn adaptive_step_uses_smoothed_indicator() {
        // Arrange
        let rec = CaviarRecurrence::new(Variant::Adaptive, 0.05, 10.0);
        let beta = array![1.0];

        // Act
        let at_var = rec.step(beta.view(), -1.0, -1.0, 1).unwrap();
        let far_above = rec.step(beta.view(), -1.0, 1e6, 1).unwrap();
        let far_below = rec.step(beta.view(), -1.0, -1e6, 1).unwrap();

        // Assert
        assert!((at_var - (-1.0 + 0.45)).abs() < 1e-12);
        assert!((far_above - (-1.05)).abs() < 1e-12);
        assert!((far_below - (-1.0 + 0.95)).abs() < 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // igarch raises on a non-positive radicand and not otherwise.
    //
    // Given
    // -----
    // - β = [-1, 0, 0]: the radicand is -1 at t = 1.
    // - β = [0.5, 0.2, 0.1] on constant returns: always positive.
    //
    // Expect
    // ------
    // - `NonPositiveVariance { t: 1, value: -1 }` for the first.
    // - A negative, finite path for the second (q < 0.5).
    fn igarch_rejects_non_positive_radicand() {
        // Arrange
        let rec = CaviarRecurrence::new(Variant::Igarch, 0.05, 10.0);
        let constant = array![0.3, 0.3, 0.3, 0.3];

        // Act
        let err = rec.compute_var(array![-1.0, 0.0, 0.0].view(), constant.view(), -1.0);
        let ok = rec.compute_var(array![0.5, 0.2, 0.1].view(), constant.view(), -1.0).unwrap();

        // Assert
        assert_eq!(err.unwrap_err(), CaviarError::NonPositiveVariance { t: 1, value: -1.0 });
        assert!(ok.iter().all(|v| v.is_finite() && *v < 0.0));
        let upper = CaviarRecurrence::new(Variant::Igarch, 0.95, 10.0);
        let pos = upper.compute_var(array![0.5, 0.2, 0.1].view(), constant.view(), 1.0).unwrap();
        assert!(pos.iter().skip(1).all(|&v| v > 0.0));
    }

    #[test]
    // Purpose
    // -------
    // Wrong β length is rejected before any step runs.
    fn compute_var_rejects_wrong_dimension() {
        let rec = CaviarRecurrence::new(Variant::Asymmetric, 0.05, 10.0);
        assert_eq!(
            rec.compute_var(array![0.1, 0.2].view(), returns().view(), -1.0).unwrap_err(),
            CaviarError::InvalidParameterDimension { expected: 4, actual: 2 }
        );
    }

    #[test]
    // Purpose
    // -------
    // The carry value is one more step past the last observation, so a
    // continuation from it reproduces the in-sample path on the full data.
    //
    // Given
    // -----
    // - A symmetric model fitted on the first four returns, then continued
    //   on the last two starting from the carry.
    //
    // Expect
    // ------
    // - The continuation equals the tail of the full-series path.
    fn carry_continues_the_path() {
        // Arrange
        let rec = CaviarRecurrence::new(Variant::Symmetric, 0.05, 10.0);
        let beta = array![-0.2, 0.6, -0.4];
        let y = returns();

        // Act
        let full = rec.compute_var(beta.view(), y.view(), -1.0).unwrap();
        let (_, carry) = rec.compute_var_with_carry(beta.view(), y.slice(ndarray::s![..4]), -1.0).unwrap();
        let tail = rec.compute_var(beta.view(), y.slice(ndarray::s![4..]), carry).unwrap();

        // Assert
        assert!((tail[0] - full[4]).abs() < 1e-12);
        assert!((tail[1] - full[5]).abs() < 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // The in-sample path never evaluates the step past the last return.
    //
    // Given
    // -----
    // - igarch, q = 0.05, β = [-1, 1, 0], VaR₀ = -2, four zero returns: the
    //   radicands are 3, 2, 1 in sample and 0 at t = 4.
    //
    // Expect
    // ------
    // - `compute_var` returns `[-2, -√3, -√2, -1]`.
    // - `compute_var_with_carry` reports the carry step at `t = 4`.
    fn igarch_path_ignores_the_carry_step() {
        // Arrange
        let rec = CaviarRecurrence::new(Variant::Igarch, 0.05, 10.0);
        let beta = array![-1.0, 1.0, 0.0];
        let zeros = Array1::<f64>::zeros(4);

        // Act
        let var = rec.compute_var(beta.view(), zeros.view(), -2.0).unwrap();
        let carried = rec.compute_var_with_carry(beta.view(), zeros.view(), -2.0);

        // Assert
        let expected = [-2.0, -3f64.sqrt(), -2f64.sqrt(), -1.0];
        for (v, e) in var.iter().zip(expected) {
            assert!((v - e).abs() < 1e-12);
        }
        assert!(matches!(carried, Err(CaviarError::NonPositiveVariance { t: 4, .. })));
    }
}
