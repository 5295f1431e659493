//! Hit indicator and hit rate consumed by external VaR backtests.
//!
//! A *violation* (hit) at `t` is `y[t] < VaR[t]`. Backtests such as Kupiec
//! or Christoffersen live outside this crate and start from these values.
use crate::caviar::errors::{CaviarError, CaviarResult};
use ndarray::{Array1, ArrayView1};

fn check_aligned(returns: ArrayView1<f64>, var: ArrayView1<f64>) -> CaviarResult<()> {
    if returns.len() != var.len() {
        return Err(CaviarError::LengthMismatch { expected: returns.len(), actual: var.len() });
    }
    Ok(())
}

/// `1` where the return falls below VaR, `0` otherwise.
///
/// # Errors
/// `CaviarError::LengthMismatch` if the series are not aligned.
pub fn violations(returns: ArrayView1<f64>, var: ArrayView1<f64>) -> CaviarResult<Array1<u8>> {
    check_aligned(returns, var)?;
    Ok(returns.iter().zip(var.iter()).map(|(&y, &v)| u8::from(y < v)).collect())
}

/// Share of violations. An empty pair of series has hit rate `0`.
///
/// # Errors
/// `CaviarError::LengthMismatch` if the series are not aligned.
pub fn hit_rate(returns: ArrayView1<f64>, var: ArrayView1<f64>) -> CaviarResult<f64> {
    let hits = violations(returns, var)?;
    if hits.is_empty() {
        return Ok(0.0);
    }
    let count: usize = hits.iter().map(|&h| h as usize).sum();
    Ok(count as f64 / hits.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    // Purpose
    // -------
    // Violations are strict (`y < VaR`) and the hit rate is their mean.
    //
    // Given
    // -----
    // - Returns `[-2, -1, 0, 1]` against a flat VaR of -1.
    //
    // Expect
    // ------
    // - Only the first point is a hit (equality is not), so the rate is 0.25.
    fn violations_are_strict_and_hit_rate_is_their_mean() {
        // Arrange
        let y = array![-2.0, -1.0, 0.0, 1.0];
        let var = Array1::from_elem(4, -1.0);

        // Act
        let hits = violations(y.view(), var.view()).unwrap();
        let rate = hit_rate(y.view(), var.view()).unwrap();

        // Assert
        assert_eq!(hits, array![1u8, 0, 0, 0]);
        assert_eq!(rate, 0.25);
    }

    #[test]
    // Purpose
    // -------
    // Misaligned inputs are rejected.
    fn misaligned_series_are_rejected() {
        let err = hit_rate(array![0.0, 1.0].view(), array![0.0].view()).unwrap_err();
        assert_eq!(err, CaviarError::LengthMismatch { expected: 2, actual: 1 });
    }
}
