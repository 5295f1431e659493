//! Parameter bounds for Asymmetric-Laplace maximum likelihood.
//!
//! The MLE parameter vector is `[τ, β...]`. Each coordinate gets a
//! [`ParamBound`] so the optimizer can work in an unconstrained θ-space:
//!
//! | variant    | τ      | β₀     | β₁      | β₂      | β₃      |
//! |------------|--------|--------|---------|---------|---------|
//! | adaptive   | (ε,∞)  | free   |         |         |         |
//! | symmetric  | (ε,∞)  | free   | [-1,1]  | [-1,1]  |         |
//! | asymmetric | (ε,∞)  | free   | [-1,1]  | [-1,1]  | [-1,1]  |
//! | igarch     | (ε,∞)  | (ε,∞)  | (ε,1)   | (ε,1)   |         |
//!
//! with ε = [`BOUND_EPS`].
use crate::{
    caviar::core::spec::Variant,
    optimization::numerical_stability::{BOUND_EPS, ParamBound},
};

/// Bound on the ALD scale τ.
pub const TAU_BOUND: ParamBound = ParamBound::Positive { floor: BOUND_EPS };

const COEF_BOUND: ParamBound = ParamBound::Interval { lower: -1.0, upper: 1.0 };
const UNIT_BOUND: ParamBound = ParamBound::Interval { lower: BOUND_EPS, upper: 1.0 };

/// Bounds on β alone (τ excluded), one entry per coordinate.
pub fn beta_bounds(variant: Variant) -> Vec<ParamBound> {
    match variant {
        Variant::Adaptive => vec![ParamBound::Free],
        Variant::Symmetric => vec![ParamBound::Free, COEF_BOUND, COEF_BOUND],
        Variant::Asymmetric => vec![ParamBound::Free, COEF_BOUND, COEF_BOUND, COEF_BOUND],
        Variant::Igarch => vec![TAU_BOUND, UNIT_BOUND, UNIT_BOUND],
    }
}

/// Bounds on the full MLE vector `[τ, β...]`.
pub fn mle_bounds(variant: Variant) -> Vec<ParamBound> {
    let mut bounds = Vec::with_capacity(1 + variant.beta_dim());
    bounds.push(TAU_BOUND);
    bounds.extend(beta_bounds(variant));
    bounds
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // Bound tables line up with the β dimension of every variant.
    fn bounds_match_variant_dimensions() {
        for variant in [Variant::Adaptive, Variant::Symmetric, Variant::Asymmetric, Variant::Igarch]
        {
            assert_eq!(beta_bounds(variant).len(), variant.beta_dim());
            assert_eq!(mle_bounds(variant).len(), variant.beta_dim() + 1);
            assert_eq!(mle_bounds(variant)[0], TAU_BOUND);
        }
    }

    #[test]
    // Purpose
    // -------
    // igarch keeps its intercept positive and its loadings in (ε, 1).
    fn igarch_bounds_keep_radicand_terms_positive() {
        let bounds = beta_bounds(Variant::Igarch);
        for theta in [-40.0, 0.0, 40.0] {
            assert!(bounds[0].to_model(theta) > 0.0);
            let loading = bounds[1].to_model(theta);
            assert!(loading >= BOUND_EPS && loading <= 1.0);
        }
    }
}
