//! News-impact curve: next-period VaR as a function of the lagged return,
//! holding the lagged VaR fixed.
use crate::caviar::{core::recurrence::CaviarRecurrence, errors::CaviarResult};
use ndarray::{Array1, ArrayView1};

/// Evenly spaced grid of lagged returns on `[-10, 10]` with 100 points.
pub fn default_grid() -> Array1<f64> {
    Array1::linspace(-10.0, 10.0, 100)
}

/// `VaR[t]` for every lagged return in `grid`, with `VaR[t-1] = var_level`.
///
/// # Errors
/// - `CaviarError::InvalidParameterDimension` if β has the wrong length.
/// - `CaviarError::NonPositiveVariance` from igarch at any grid point; `t`
///   is the grid index.
pub fn news_impact(
    recurrence: &CaviarRecurrence, beta: ArrayView1<f64>, var_level: f64, grid: ArrayView1<f64>,
) -> CaviarResult<Array1<f64>> {
    recurrence.check_beta(beta)?;
    grid.iter()
        .enumerate()
        .map(|(i, &y)| recurrence.step(beta, var_level, y, i))
        .collect::<CaviarResult<Vec<f64>>>()
        .map(Array1::from)
}
