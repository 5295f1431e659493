//! rust_caviar — CAViaR and ARCH Value-at-Risk estimation with Python bindings.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers and as the PyO3 bridge that
//! exposes the estimators to Python via the `_rust_caviar` extension module.
//! When the `python-bindings` feature is enabled, this module defines the
//! Python-facing classes used by the `rust_caviar` package.
//!
//! Key behaviors
//! -------------
//! - Re-export the core Rust modules: [`caviar`] (CAViaR recurrences,
//!   regression-quantile and ALD estimators), [`arch`] (Gaussian ARCH
//!   baseline) and [`optimization`] (argmin-backed L-BFGS / Nelder–Mead
//!   layer).
//! - Define `#[pyclass]` wrappers and the `#[pymodule]` initializer for the
//!   `_rust_caviar` Python extension.
//!
//! Invariants & assumptions
//! ------------------------
//! - All numerical work happens in the inner Rust modules; this file performs
//!   only FFI glue, input validation and error mapping.
//! - Python fits take an integer seed and build a `ChaCha8Rng` from it, so
//!   the same seed gives the same estimate on every platform.
//!
//! Conventions
//! -----------
//! - Errors from core Rust code are propagated as rich error types internally
//!   and converted to `ValueError` at the PyO3 boundary.
//! - VaR values are on the return scale; a violation is `return < VaR`.
//!
//! Downstream usage
//! ----------------
//! - Native Rust code should depend directly on the inner modules and can
//!   ignore the PyO3 items guarded by the `python-bindings` feature.
//! - The Python packaging layer imports `_rust_caviar` and wraps its classes
//!   in user-facing APIs.

pub mod arch;
pub mod caviar;
pub mod optimization;
pub mod utils;

#[cfg(feature = "python-bindings")]
use pyo3::{prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use rand::SeedableRng;

#[cfg(feature = "python-bindings")]
use rand_chacha::ChaCha8Rng;

#[cfg(feature = "python-bindings")]
use crate::{
    arch::model::{ArchFit, ArchModel},
    caviar::{
        core::diagnostics,
        models::{caviar::CaviarModel, fit::FitResult},
    },
    utils::{
        build_caviar_options, build_caviar_spec, extract_lbfgs_opts, extract_owned_array,
        extract_returns,
    },
};

/// CAViaR — Python-facing wrapper for a CAViaR specification.
///
/// Purpose
/// -------
/// Hold a validated [`CaviarModel`] and fit it on Python array-likes. Each
/// call to `fit` returns a fresh [`CaviarFit`]; the model keeps no fitted
/// state.
///
/// Parameters
/// ----------
/// Constructed from Python via
/// `CAViaR(quantile, model, method="rq", G=10, var0=None, n_draws=None, n_keep=None)`:
/// - `quantile`: VaR level in (0, 1).
/// - `model`: `"adaptive"`, `"symmetric"`, `"asymmetric"` or `"igarch"`.
/// - `method`: `"rq"` (alias `"numeric"`) or `"mle"`.
/// - `G`: adaptive smoothing constant.
/// - `var0`: fixed starting VaR; by default the empirical quantile of the
///   first 300 returns.
/// - `n_draws`, `n_keep`: seeding pool override (both or neither).
#[cfg(feature = "python-bindings")]
#[pyclass(name = "CAViaR", module = "rust_caviar")]
pub struct PyCaviar {
    inner: CaviarModel,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl PyCaviar {
    #[new]
    #[pyo3(
        signature = (quantile, model, method = "rq", g = None, var0 = None, n_draws = None, n_keep = None),
        text_signature = "(quantile, model, /, method='rq', g=10.0, var0=None, n_draws=None, n_keep=None)"
    )]
    pub fn new(
        quantile: f64, model: &str, method: &str, g: Option<f64>, var0: Option<f64>,
        n_draws: Option<usize>, n_keep: Option<usize>,
    ) -> PyResult<Self> {
        let spec = build_caviar_spec(quantile, model, method, g, var0)?;
        let options = build_caviar_options(n_draws, n_keep)?;
        Ok(PyCaviar { inner: CaviarModel::new(spec, options) })
    }

    #[pyo3(signature = (returns, seed = 0), text_signature = "(self, returns, /, seed=0)")]
    pub fn fit<'py>(&self, py: Python<'py>, returns: &Bound<'py, PyAny>, seed: u64) -> PyResult<CaviarFit> {
        let series = extract_returns(py, returns)?;
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let inner = self.inner.fit(&series, &mut rng)?;
        Ok(CaviarFit { inner })
    }
}

/// CaviarFit — read-only view of a [`FitResult`] for Python.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "rust_caviar")]
pub struct CaviarFit {
    pub inner: FitResult,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl CaviarFit {
    #[getter]
    pub fn beta(&self) -> Vec<f64> {
        self.inner.beta.to_vec()
    }

    #[getter]
    pub fn tau(&self) -> Option<f64> {
        self.inner.tau
    }

    #[getter]
    pub fn objective(&self) -> f64 {
        self.inner.objective
    }

    #[getter]
    pub fn converged(&self) -> bool {
        self.inner.converged
    }

    #[getter]
    pub fn attempts(&self) -> usize {
        self.inner.attempts
    }

    #[getter]
    pub fn var_in(&self) -> Vec<f64> {
        self.inner.var_in.to_vec()
    }

    #[getter]
    pub fn var0(&self) -> f64 {
        self.inner.var0
    }

    #[getter]
    pub fn var0_out(&self) -> f64 {
        self.inner.var0_out
    }

    /// Continue the fitted recurrence on new returns; `var0` defaults to
    /// the in-sample carry value.
    #[pyo3(signature = (returns, var0 = None), text_signature = "(self, returns, /, var0=None)")]
    pub fn predict<'py>(
        &self, py: Python<'py>, returns: &Bound<'py, PyAny>, var0: Option<f64>,
    ) -> PyResult<Vec<f64>> {
        let data = extract_owned_array(py, returns)?;
        let var0 = var0.unwrap_or(self.inner.var0_out);
        Ok(self.inner.predict(data.view(), var0)?.to_vec())
    }

    /// News-impact curve on the default `[-10, 10]` grid at a lagged VaR of
    /// `var_level` (default: the in-sample carry value).
    #[pyo3(signature = (var_level = None), text_signature = "(self, /, var_level=None)")]
    pub fn news_impact(&self, var_level: Option<f64>) -> PyResult<(Vec<f64>, Vec<f64>)> {
        let grid = crate::caviar::core::news_impact::default_grid();
        let level = var_level.unwrap_or(self.inner.var0_out);
        let curve = self.inner.news_impact(level, grid.view())?;
        Ok((grid.to_vec(), curve.to_vec()))
    }
}

/// ARCH — Python-facing wrapper for the Gaussian ARCH(p) baseline.
#[cfg(feature = "python-bindings")]
#[pyclass(name = "ARCH", module = "rust_caviar")]
pub struct PyArch {
    inner: ArchModel,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl PyArch {
    #[new]
    #[pyo3(
        signature = (p, q = 0, tol_grad = None, tol_cost = None, max_iter = None, line_searcher = None, lbfgs_mem = None),
        text_signature = "(p, /, q=0, tol_grad=None, tol_cost=None, max_iter=None, \
                          line_searcher=None, lbfgs_mem=None)"
    )]
    pub fn new(
        p: usize, q: usize, tol_grad: Option<f64>, tol_cost: Option<f64>, max_iter: Option<usize>,
        line_searcher: Option<&str>, lbfgs_mem: Option<usize>,
    ) -> PyResult<Self> {
        let options = extract_lbfgs_opts(tol_grad, tol_cost, max_iter, line_searcher, lbfgs_mem)?;
        Ok(PyArch { inner: ArchModel::with_options(p, q, options)? })
    }

    #[pyo3(signature = (returns, seed = 0), text_signature = "(self, returns, /, seed=0)")]
    pub fn fit<'py>(&self, py: Python<'py>, returns: &Bound<'py, PyAny>, seed: u64) -> PyResult<ArchResultPy> {
        let series = extract_returns(py, returns)?;
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let inner = self.inner.fit(&series, &mut rng)?;
        Ok(ArchResultPy { inner })
    }
}

/// ArchFit — read-only view of a fitted ARCH model for Python.
#[cfg(feature = "python-bindings")]
#[pyclass(name = "ArchFit", module = "rust_caviar")]
pub struct ArchResultPy {
    pub inner: ArchFit,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl ArchResultPy {
    #[getter]
    pub fn omega(&self) -> f64 {
        self.inner.omega
    }

    #[getter]
    pub fn alpha(&self) -> Vec<f64> {
        self.inner.alpha.to_vec()
    }

    #[getter]
    pub fn nll(&self) -> f64 {
        self.inner.nll
    }

    #[getter]
    pub fn converged(&self) -> bool {
        self.inner.converged
    }

    #[getter]
    pub fn sigma2(&self) -> Vec<f64> {
        self.inner.sigma2.to_vec()
    }

    pub fn value_at_risk(&self, quantile: f64) -> PyResult<Vec<f64>> {
        Ok(self.inner.value_at_risk(quantile)?.to_vec())
    }

    pub fn forecast_value_at_risk(&self, quantile: f64) -> PyResult<f64> {
        Ok(self.inner.forecast_value_at_risk(quantile)?)
    }
}

/// Share of returns below their VaR.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(text_signature = "(returns, var, /)")]
pub fn hit_rate<'py>(
    py: Python<'py>, returns: &Bound<'py, PyAny>, var: &Bound<'py, PyAny>,
) -> PyResult<f64> {
    let returns = extract_owned_array(py, returns)?;
    let var = extract_owned_array(py, var)?;
    Ok(diagnostics::hit_rate(returns.view(), var.view())?)
}

/// _rust_caviar — PyO3 module initializer for the Python extension.
///
/// Registers the `CAViaR`, `CaviarFit`, `ARCH` and `ArchFit` classes and
/// the `hit_rate` function. Invoked by Python on import.
#[cfg(feature = "python-bindings")]
#[pymodule]
fn _rust_caviar<'py>(_py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    m.add_class::<PyCaviar>()?;
    m.add_class::<CaviarFit>()?;
    m.add_class::<PyArch>()?;
    m.add_class::<ArchResultPy>()?;
    m.add_function(wrap_pyfunction!(hit_rate, m)?)?;
    Ok(())
}
