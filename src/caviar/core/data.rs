//! Return-series container for CAViaR and ARCH models.
//!
//! Purpose
//! -------
//! Provide a small, validated container for a financial return series so the
//! recurrences, objectives and fit drivers can assume clean input.
//!
//! Key behaviors
//! -------------
//! - [`ReturnSeries`] enforces a minimum length of two and finite entries.
//! - [`ReturnSeries::empirical_quantile`] computes the sample quantile used
//!   to seed VaR₀ when the caller does not supply one.
//!
//! Invariants & assumptions
//! ------------------------
//! - `len() >= 2` and every value is finite.
//! - Returns are caller-scaled (typically percentage log-returns); nothing
//!   here rescales them.
//!
//! Testing notes
//! -------------
//! - Unit tests cover construction failures and the interpolation rule of
//!   the empirical quantile.
use crate::caviar::errors::{CaviarError, CaviarResult};
use ndarray::{Array1, ArrayView1};

/// Minimum number of observations accepted by [`ReturnSeries::new`].
pub const MIN_SERIES_LEN: usize = 2;

/// Validated, immutable return series.
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnSeries {
    data: Array1<f64>,
}

impl ReturnSeries {
    /// Construct a validated [`ReturnSeries`].
    ///
    /// # Errors
    /// - `CaviarError::SeriesTooShort` when fewer than two observations are
    ///   supplied.
    /// - `CaviarError::NonFiniteData` for the first NaN/±∞ entry.
    pub fn new(data: Array1<f64>) -> CaviarResult<Self> {
        if data.len() < MIN_SERIES_LEN {
            return Err(CaviarError::SeriesTooShort { len: data.len(), min: MIN_SERIES_LEN });
        }
        for (index, &value) in data.iter().enumerate() {
            if !value.is_finite() {
                return Err(CaviarError::NonFiniteData { index, value });
            }
        }
        Ok(ReturnSeries { data })
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn view(&self) -> ArrayView1<'_, f64> {
        self.data.view()
    }

    pub fn as_array(&self) -> &Array1<f64> {
        &self.data
    }

    /// Sample `q`-quantile of the first `min(window, len)` observations.
    ///
    /// Uses linear interpolation between order statistics at position
    /// `q·(n - 1)`, the default rule of most numerical libraries.
    ///
    /// `q` is assumed to lie in `[0, 1]`; callers validate it upstream.
    pub fn empirical_quantile(&self, q: f64, window: usize) -> f64 {
        let n = window.clamp(1, self.data.len());
        let mut sorted: Vec<f64> = self.data.iter().take(n).copied().collect();
        sorted.sort_by(f64::total_cmp);
        let pos = q * (n - 1) as f64;
        let lo = pos.floor() as usize;
        let hi = pos.ceil() as usize;
        let frac = pos - lo as f64;
        sorted[lo] + frac * (sorted[hi] - sorted[lo])
    }
}
