//! Integration tests for CAViaR and ARCH Value-at-Risk estimation.
//!
//! Purpose
//! -------
//! - Validate the end-to-end CAViaR pipeline: from a validated return
//!   series and specification, through multi-start regression-quantile or
//!   ALD maximum-likelihood fitting, to the in-sample VaR path, hit
//!   diagnostics and out-of-sample continuation.
//! - Check the ARCH baseline against the closed-form behavior of its
//!   variance recurrence.
//!
//! Coverage
//! --------
//! - `caviar::core`: `ReturnSeries`, `CaviarSpec`, `CaviarRecurrence`,
//!   `hit_rate`.
//! - `caviar::models`: `CaviarModel::fit`, `FitResult::predict`.
//! - `arch::model`: `ArchModel::variance`, `ArchModel::fit`.
//!
//! Exclusions
//! ----------
//! - Low-level building blocks (bounds, transforms, tick loss, optimizer
//!   adapters) are covered by unit tests.
//! - Python bindings are exercised at the Python package level.
use ndarray::{Array1, array, s};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rust_caviar::{
    arch::{ArchError, ArchModel},
    caviar::{
        CaviarError, CaviarModel, CaviarOptions, CaviarRecurrence, CaviarSpec, Method,
        MleFitOptions, RefineOptions, ReturnSeries, SeedingOptions, Variant, hit_rate,
    },
};

/// Purpose
/// -------
/// Alternating `[1, -1, 1, -1, ...]` series of length `n`.
fn alternating(n: usize) -> ReturnSeries {
    let data = Array1::from_iter((0..n).map(|t| if t % 2 == 0 { 1.0 } else { -1.0 }));
    ReturnSeries::new(data).expect("alternating series is finite and long enough")
}

/// Purpose
/// -------
/// Deterministic, mildly heteroskedastic series for MLE fits.
fn noisy(n: usize, seed: u64) -> ReturnSeries {
    use rand::Rng;
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let data = Array1::from_iter((0..n).map(|t| {
        let scale = if (t / 25) % 2 == 0 { 1.0 } else { 2.0 };
        scale * rng.gen_range(-1.0..1.0)
    }));
    ReturnSeries::new(data).expect("noisy series is finite and long enough")
}

/// Purpose
/// -------
/// Options with a small seeding pool so integration tests stay fast.
fn small_pool(n_draws: usize, n_keep: usize) -> CaviarOptions {
    CaviarOptions::new(
        Some(SeedingOptions::new(n_draws, n_keep).expect("valid pool")),
        RefineOptions::default(),
        MleFitOptions::default(),
    )
}

#[test]
// Purpose
// -------
// End-to-end adaptive CAViaR on an alternating series.
//
// Given
// -----
// - returns = [1, -1, ...] of length 100, q = 0.05, adaptive, VaR₀ = -1,
//   G = 10, RQ estimation with 200 draws / 3 kept seeds.
//
// Expect
// ------
// - Every VaR[t] lies in [-10, 0].
// - The violation rate over t = 1..99 lies in [0, 0.15].
fn adaptive_rq_fit_on_alternating_series_stays_in_band() {
    // Arrange
    let spec = CaviarSpec::new(Variant::Adaptive, 0.05, Method::Rq, 10.0, Some(-1.0)).unwrap();
    let model = CaviarModel::new(spec, small_pool(200, 3));
    let returns = alternating(100);
    let mut rng = ChaCha8Rng::seed_from_u64(2023);

    // Act
    let fit = model.fit(&returns, &mut rng).unwrap();
    let rate = hit_rate(returns.view().slice(s![1..]), fit.var_in.slice(s![1..])).unwrap();

    // Assert
    assert_eq!(fit.var_in.len(), 100);
    assert_eq!(fit.var_in[0], -1.0);
    assert!(fit.var_in.iter().all(|&v| (-10.0..=0.0).contains(&v)), "VaR left [-10, 0]");
    assert!((0.0..=0.15).contains(&rate), "hit rate {rate}");
}

#[test]
// Purpose
// -------
// Two fits with the same RNG seed are bit-identical.
//
// Given
// -----
// - symmetric CAViaR, q = 0.01, 120 noisy returns, pool 300 / 4.
//
// Expect
// ------
// - Equal β, objective bits and VaR paths.
fn rq_fit_is_reproducible_under_a_fixed_seed() {
    // Arrange
    let spec = CaviarSpec::with_defaults(Variant::Symmetric, 0.01, Method::Rq).unwrap();
    let model = CaviarModel::new(spec, small_pool(300, 4));
    let returns = noisy(120, 8);

    // Act
    let a = model.fit(&returns, &mut ChaCha8Rng::seed_from_u64(99)).unwrap();
    let b = model.fit(&returns, &mut ChaCha8Rng::seed_from_u64(99)).unwrap();

    // Assert
    assert_eq!(a.beta, b.beta);
    assert_eq!(a.objective.to_bits(), b.objective.to_bits());
    assert_eq!(a.var_in, b.var_in);
}

#[test]
// Purpose
// -------
// The ALD maximum-likelihood loop always returns within its attempt cap.
//
// Given
// -----
// - symmetric and asymmetric CAViaR, q = 0.05, 150 noisy returns, default
//   MLE options (5 attempts).
//
// Expect
// ------
// - `Ok` with `1 <= attempts <= 5`, τ > 0, finite objective, and β of the
//   variant's length.
fn mle_fit_returns_within_attempt_cap() {
    for variant in [Variant::Symmetric, Variant::Asymmetric] {
        // Arrange
        let spec = CaviarSpec::with_defaults(variant, 0.05, Method::Mle).unwrap();
        let model = CaviarModel::with_spec(spec);
        let mut rng = ChaCha8Rng::seed_from_u64(31);

        // Act
        let fit = model.fit(&noisy(150, 5), &mut rng).unwrap();

        // Assert
        assert!((1..=5).contains(&fit.attempts));
        assert!(fit.tau.unwrap() > 0.0);
        assert!(fit.objective.is_finite());
        assert_eq!(fit.beta.len(), variant.beta_dim());
    }
}

#[test]
// Purpose
// -------
// The out-of-sample carry continues the in-sample path exactly.
//
// Given
// -----
// - An RQ fit on the first 80 of 100 noisy returns.
//
// Expect
// ------
// - `predict(last 20, var0_out)` equals the tail of a single recurrence run
//   over all 100 returns with the same β and VaR₀.
fn predict_with_carry_continues_in_sample_path() {
    // Arrange
    let all = noisy(100, 12);
    let head = ReturnSeries::new(all.as_array().slice(s![..80]).to_owned()).unwrap();
    let spec = CaviarSpec::new(Variant::Symmetric, 0.05, Method::Rq, 10.0, Some(-1.5)).unwrap();
    let fit = CaviarModel::new(spec, small_pool(200, 2))
        .fit(&head, &mut ChaCha8Rng::seed_from_u64(6))
        .unwrap();

    // Act
    let continued = fit.predict(all.view().slice(s![80..]), fit.var0_out).unwrap();
    let full = CaviarRecurrence::from_spec(&spec).compute_var(fit.beta.view(), all.view(), -1.5).unwrap();

    // Assert
    for (a, b) in continued.iter().zip(full.slice(s![80..]).iter()) {
        assert!((a - b).abs() < 1e-12);
    }
}

#[test]
// Purpose
// -------
// Closed-form recurrence behavior through the public API.
//
// Expect
// ------
// - symmetric β = [c, 0, 0] gives VaR[t] = c for t ≥ 1.
// - igarch with a negative intercept raises `NonPositiveVariance` instead
//   of clamping.
fn recurrence_closed_forms_and_igarch_domain_error() {
    // Arrange
    let returns = noisy(30, 3);
    let symmetric = CaviarRecurrence::new(Variant::Symmetric, 0.05, 10.0);
    let igarch = CaviarRecurrence::new(Variant::Igarch, 0.05, 10.0);

    // Act
    let flat = symmetric.compute_var(array![-0.7, 0.0, 0.0].view(), returns.view(), -2.0).unwrap();
    let err = igarch.compute_var(array![-1.0, 0.0, 0.0].view(), returns.view(), -1.0).unwrap_err();

    // Assert
    assert_eq!(flat[0], -2.0);
    assert!(flat.slice(s![1..]).iter().all(|&v| v == -0.7));
    assert!(matches!(err, CaviarError::NonPositiveVariance { t: 1, .. }));
}

#[test]
// Purpose
// -------
// ARCH baseline: closed form on zero returns, order validation, and a
// fit that produces a usable VaR.
//
// Given
// -----
// - ARCH(1) with ω = 0.4, α = 0.3 on 10 zero returns.
// - ARCH(1) fitted on 300 noisy returns.
//
// Expect
// ------
// - σ²[t] = 0.4 for t ≥ 1.
// - q = 1 is rejected with `UnsupportedModel`.
// - The fitted 1% VaR is negative throughout.
fn arch_baseline_behaves_as_documented() {
    // Arrange
    let model = ArchModel::new(1, 0).unwrap();
    let zeros = Array1::<f64>::zeros(10);

    // Act
    let sigma2 = model.variance(array![0.4, 0.3].view(), zeros.view()).unwrap();
    let fit = model.fit(&noisy(300, 17), &mut ChaCha8Rng::seed_from_u64(1)).unwrap();

    // Assert
    assert!(sigma2.slice(s![1..]).iter().all(|&v| v == 0.4));
    assert_eq!(ArchModel::new(1, 1).unwrap_err(), ArchError::UnsupportedModel { q: 1 });
    let var = fit.value_at_risk(0.01).unwrap();
    assert!(var.iter().all(|&v| v < 0.0));
}
