//! PyO3 input helpers: array extraction and option building for the
//! Python-facing classes in `lib.rs`.
#[cfg(feature = "python-bindings")]
use ndarray::Array1;

#[cfg(feature = "python-bindings")]
use pyo3::{prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::{
    caviar::{
        core::{
            data::ReturnSeries,
            options::{CaviarOptions, SeedingOptions},
            spec::{CaviarSpec, DEFAULT_SMOOTHING, Method, Variant},
        },
        errors::CaviarError,
    },
    optimization::objective_optimizer::{LbfgsOptions, LineSearcher, Tolerances},
};

#[cfg(feature = "python-bindings")]
use numpy::{
    IntoPyArray,    // Vec → PyArray
    PyArrayMethods, // .readonly()
    PyReadonlyArray1,
};

#[cfg(feature = "python-bindings")]
#[inline]
pub fn extract_f64_array<'py>(
    py: Python<'py>, raw_data: &Bound<'py, PyAny>,
) -> PyResult<PyReadonlyArray1<'py, f64>> {
    if let Ok(arr_ro) = raw_data.extract::<PyReadonlyArray1<f64>>() {
        if arr_ro.as_slice().is_ok() {
            return Ok(arr_ro);
        }
    }

    if let Ok(obj) = raw_data.call_method("to_numpy", (false,), None) {
        if let Ok(series_ro) = obj.extract::<PyReadonlyArray1<f64>>() {
            if series_ro.as_slice().is_ok() {
                return Ok(series_ro);
            }
        }
    }

    let vec: Vec<f64> = raw_data.extract().map_err(|_| {
        pyo3::exceptions::PyTypeError::new_err(
            "expected a 1-D numpy.ndarray, pandas.Series, or sequence of float64",
        )
    })?;
    Ok(vec.into_pyarray(py).readonly())
}

/// Copy a Python array-like into an owned `Array1<f64>`.
#[cfg(feature = "python-bindings")]
pub fn extract_owned_array<'py>(py: Python<'py>, raw_data: &Bound<'py, PyAny>) -> PyResult<Array1<f64>> {
    let arr = extract_f64_array(py, raw_data)?;
    Ok(arr.as_array().to_owned())
}

/// Validated [`ReturnSeries`] from a Python array-like.
#[cfg(feature = "python-bindings")]
pub fn extract_returns<'py>(py: Python<'py>, raw_data: &Bound<'py, PyAny>) -> PyResult<ReturnSeries> {
    Ok(ReturnSeries::new(extract_owned_array(py, raw_data)?)?)
}

/// Build a [`CaviarSpec`] from Python-friendly names.
///
/// `method` accepts `"mle"`, `"rq"` or `"numeric"`; `smoothing` defaults to
/// [`DEFAULT_SMOOTHING`].
#[cfg(feature = "python-bindings")]
pub fn build_caviar_spec(
    quantile: f64, model: &str, method: &str, smoothing: Option<f64>, var0: Option<f64>,
) -> PyResult<CaviarSpec> {
    let variant: Variant = model.parse()?;
    let method: Method = method.parse()?;
    let smoothing = smoothing.unwrap_or(DEFAULT_SMOOTHING);
    Ok(CaviarSpec::new(variant, quantile, method, smoothing, var0)?)
}

/// Build [`CaviarOptions`] with optional seeding overrides.
///
/// Both `n_draws` and `n_keep` must be given to override the per-variant
/// pool sizes.
#[cfg(feature = "python-bindings")]
pub fn build_caviar_options(n_draws: Option<usize>, n_keep: Option<usize>) -> PyResult<CaviarOptions> {
    let seeding = match (n_draws, n_keep) {
        (Some(n_draws), Some(n_keep)) => Some(SeedingOptions::new(n_draws, n_keep)?),
        (None, None) => None,
        _ => {
            return Err(CaviarError::InvalidOption {
                name: "n_draws/n_keep",
                reason: "must be given together",
            }
            .into());
        }
    };
    Ok(CaviarOptions { seeding, ..CaviarOptions::default() })
}

/// L-BFGS options from optional Python keyword arguments.
#[cfg(feature = "python-bindings")]
pub fn extract_lbfgs_opts(
    tol_grad: Option<f64>, tol_cost: Option<f64>, max_iter: Option<usize>,
    line_searcher: Option<&str>, lbfgs_mem: Option<usize>,
) -> PyResult<LbfgsOptions> {
    use std::str::FromStr;

    let defaults = LbfgsOptions::default();
    let tols = if tol_grad.is_none() && tol_cost.is_none() && max_iter.is_none() {
        defaults.tols
    } else {
        Tolerances::new(tol_grad, tol_cost, max_iter).map_err(CaviarError::from)?
    };
    let ls = match line_searcher {
        Some(name) => LineSearcher::from_str(name).map_err(CaviarError::from)?,
        None => defaults.line_searcher,
    };
    let opts = LbfgsOptions::new(tols, ls, false, lbfgs_mem).map_err(CaviarError::from)?;
    Ok(opts)
}
