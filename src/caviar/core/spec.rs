//! Model specification for CAViaR fits.
//!
//! Purpose
//! -------
//! Describe *what* is being estimated: the recurrence variant, the target
//! quantile, the estimation method and the recurrence's fixed constants
//! (smoothing `G`, optional VaR₀). Tuning of the optimizers lives in
//! [`options`](crate::caviar::core::options) instead.
//!
//! Key behaviors
//! -------------
//! - [`Variant`] and [`Method`] parse case-insensitively from strings.
//! - [`CaviarSpec::new`] validates the quantile, `G` and VaR₀.
//! - [`CaviarSpec::resolve_var0`] supplies VaR₀ from the data when the
//!   caller did not fix one.
use crate::caviar::{
    core::data::ReturnSeries,
    errors::{CaviarError, CaviarResult},
};
use std::str::FromStr;

/// Default smoothing constant for the adaptive variant.
pub const DEFAULT_SMOOTHING: f64 = 10.0;

/// Number of leading observations used to derive VaR₀ from the data.
pub const VAR0_WINDOW: usize = 300;

/// CAViaR recurrence family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    Adaptive,
    Symmetric,
    Asymmetric,
    Igarch,
}

impl Variant {
    /// Length of β (τ excluded) expected by the recurrence.
    pub fn beta_dim(&self) -> usize {
        match self {
            Variant::Adaptive => 1,
            Variant::Symmetric => 3,
            Variant::Asymmetric => 4,
            Variant::Igarch => 3,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Variant::Adaptive => "adaptive",
            Variant::Symmetric => "symmetric",
            Variant::Asymmetric => "asymmetric",
            Variant::Igarch => "igarch",
        }
    }
}

impl FromStr for Variant {
    type Err = CaviarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "adaptive" => Ok(Variant::Adaptive),
            "symmetric" => Ok(Variant::Symmetric),
            "asymmetric" => Ok(Variant::Asymmetric),
            "igarch" => Ok(Variant::Igarch),
            _ => Err(CaviarError::UnsupportedModel { name: s.to_string() }),
        }
    }
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Estimation method.
///
/// - `Rq`: minimize the tick loss over β with the multi-start optimizer.
/// - `Mle`: maximize the Asymmetric-Laplace likelihood over `(τ, β)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Mle,
    Rq,
}

impl FromStr for Method {
    type Err = CaviarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mle" => Ok(Method::Mle),
            "rq" | "numeric" => Ok(Method::Rq),
            _ => Err(CaviarError::UnsupportedMethod { name: s.to_string() }),
        }
    }
}

/// Validated CAViaR model specification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaviarSpec {
    pub variant: Variant,
    pub quantile: f64,
    pub method: Method,
    /// Smoothing constant `G` of the adaptive sigmoid (ignored otherwise).
    pub smoothing: f64,
    /// Fixed VaR₀; `None` derives it from the data.
    pub var0: Option<f64>,
}

impl CaviarSpec {
    /// Construct a validated specification.
    ///
    /// # Errors
    /// - `InvalidQuantile` unless `0 < quantile < 1`.
    /// - `InvalidSmoothing` unless `smoothing` is finite and > 0.
    /// - `InvalidVar0` if a supplied VaR₀ is not finite.
    pub fn new(
        variant: Variant, quantile: f64, method: Method, smoothing: f64, var0: Option<f64>,
    ) -> CaviarResult<Self> {
        validate_quantile(quantile)?;
        if !smoothing.is_finite() || smoothing <= 0.0 {
            return Err(CaviarError::InvalidSmoothing { value: smoothing });
        }
        if let Some(value) = var0 {
            if !value.is_finite() {
                return Err(CaviarError::InvalidVar0 { value });
            }
        }
        Ok(CaviarSpec { variant, quantile, method, smoothing, var0 })
    }

    /// Specification with the default smoothing and a data-derived VaR₀.
    pub fn with_defaults(variant: Variant, quantile: f64, method: Method) -> CaviarResult<Self> {
        Self::new(variant, quantile, method, DEFAULT_SMOOTHING, None)
    }

    /// VaR₀ for a fit on `returns`: the fixed value if one was supplied,
    /// otherwise the empirical `quantile` of the first [`VAR0_WINDOW`]
    /// observations.
    pub fn resolve_var0(&self, returns: &ReturnSeries) -> f64 {
        self.var0.unwrap_or_else(|| returns.empirical_quantile(self.quantile, VAR0_WINDOW))
    }
}

/// Check that a quantile lies strictly in (0, 1).
///
/// # Errors
/// `CaviarError::InvalidQuantile` otherwise (including NaN).
pub fn validate_quantile(quantile: f64) -> CaviarResult<()> {
    if !(quantile > 0.0 && quantile < 1.0) {
        return Err(CaviarError::InvalidQuantile { value: quantile });
    }
    Ok(())
}
