//! End-to-end behaviour of the operator suite through the public API.

use approx::assert_relative_eq;

use subj_algebra::operators::{self, abf, cbf, cbf2, cc, doc, pd, td};
use subj_algebra::{BinomialOpinion, DirichletPdf, MultinomialOpinion, OpinionAlgebra};
use subj_core::config::NumericConfig;
use subj_core::errors::{OperatorError, SubjErrorCode};
use subj_core::SubjResult;

fn op(belief: &[f64], uncertainty: f64, base_rate: &[f64]) -> MultinomialOpinion {
    MultinomialOpinion::new(belief, uncertainty, base_rate).unwrap()
}

#[test]
fn test_projection_of_binomial_shaped_opinion() {
    let a = op(&[0.1, 0.5], 0.4, &[0.5, 0.5]);
    let p = a.projection();
    assert_relative_eq!(p[0], 0.3, epsilon = 1e-12);
    assert_relative_eq!(p[1], 0.7, epsilon = 1e-12);
}

#[test]
fn test_trust_discount_moves_mass_to_uncertainty() {
    // 0.4 is corrected to 1 - 0.4 = 0.6 at construction.
    let a = op(&[0.3, 0.1, 0.0, 0.0], 0.4, &[0.1, 0.5, 0.2, 0.2]);
    let d = td(&a, 0.5).unwrap();
    let belief = d.belief();
    for (got, want) in belief.iter().zip([0.15, 0.05, 0.0, 0.0]) {
        assert_relative_eq!(*got, want, epsilon = 1e-12);
    }
    assert_relative_eq!(d.uncertainty(), 0.8, epsilon = 1e-12);
    assert_eq!(d.base_rate(), a.base_rate());
}

#[test]
fn test_trust_outside_unit_interval_is_applied() {
    let a = op(&[0.5, 0.0], 0.5, &[0.5, 0.5]);
    let d = operators::trust_discount(&a, 1.5).unwrap();
    assert_relative_eq!(d.belief()[0], 0.75, epsilon = 1e-12);
    assert_relative_eq!(d.uncertainty(), 0.25, epsilon = 1e-12);
}

#[test]
fn test_cumulative_fusion_of_vacuous_returns_first() {
    let a = op(&[0.0, 0.0, 0.0], 1.0, &[0.2, 0.3, 0.5]);
    let b = op(&[0.0, 0.0, 0.0], 1.0, &[0.6, 0.2, 0.2]);
    let fused = cbf(&[&a, &b]).unwrap();
    assert_eq!(fused, a);
}

#[test]
fn test_degree_of_conflict_with_self_is_zero() {
    let a = op(&[0.1, 0.1, 0.4, 0.2], 0.2, &[0.25; 4]);
    assert_eq!(doc(&a, &a).unwrap(), 0.0);
    assert_eq!(pd(&a, &a).unwrap(), 0.0);

    let vacuous = MultinomialOpinion::vacuous(4).unwrap();
    assert_eq!(cc(&a, &vacuous).unwrap(), 0.0);
}

#[test]
fn test_unfusion_recovers_fused_operand() {
    let x = op(&[0.1, 0.1, 0.4, 0.2], 0.2, &[0.25; 4]);
    let y = op(&[0.3, 0.1, 0.0, 0.0], 0.6, &[0.25; 4]);
    let fused = cbf2(&x, &y).unwrap();
    let recovered = operators::cumulative_unfusion(&fused, &y, &x.base_rate()).unwrap();
    for (got, want) in recovered.belief().iter().zip(x.belief()) {
        assert_relative_eq!(*got, want, epsilon = 1e-9);
    }
    assert_relative_eq!(recovered.uncertainty(), x.uncertainty(), epsilon = 1e-9);
}

#[test]
fn test_fusion_rejects_mixed_dimensions() {
    let a = MultinomialOpinion::vacuous(2).unwrap();
    let b = MultinomialOpinion::vacuous(4).unwrap();
    for result in [abf(&[&a, &b]), cbf(&[&a, &b])] {
        let err = result.unwrap_err();
        assert!(matches!(
            err,
            OperatorError::DimensionMismatch {
                expected: 2,
                actual: 4,
                ..
            }
        ));
        assert_eq!(err.error_code(), "DIMENSION_MISMATCH");
    }
}

#[test]
fn test_cumulative_fusion_of_four_state_opinions() {
    let a = op(&[0.1, 0.1, 0.4, 0.2], 0.2, &[0.25; 4]);
    let b = op(&[0.3, 0.1, 0.0, 0.0], 0.6, &[0.1, 0.5, 0.2, 0.2]);
    let fused = cbf(&[&a, &b]).unwrap();

    // Weights 1/u: 5 and 5/3, denominator 5 + 5/3 - 1 = 17/3.
    let d = 17.0 / 3.0;
    let expected = [1.0 / d, (2.0 / 3.0) / d, 2.0 / d, 1.0 / d];
    for (got, want) in fused.belief().iter().zip(expected) {
        assert_relative_eq!(*got, want, epsilon = 1e-9);
    }
    assert_relative_eq!(fused.uncertainty(), 1.0 / d, epsilon = 1e-9);
    assert!(fused.is_consistent(1e-9));
    let rate_sum: f64 = fused.base_rate().iter().sum();
    assert_relative_eq!(rate_sum, 1.0, epsilon = 1e-9);
}

#[test]
fn test_dirichlet_round_trip() {
    let a = op(&[0.0, 0.0, 0.4, 0.1], 0.5, &[0.25; 4]);
    let pdf = a.dirichlet_pdf();
    for (got, want) in pdf.evidence().iter().zip([0.0, 0.0, 3.2, 0.8]) {
        assert_relative_eq!(*got, want, epsilon = 1e-12);
    }
    let back = MultinomialOpinion::from_pdf(&pdf).unwrap();
    for (got, want) in back.belief().iter().zip(a.belief()) {
        assert_relative_eq!(*got, want, epsilon = 1e-12);
    }
    assert_relative_eq!(back.uncertainty(), 0.5, epsilon = 1e-12);
    assert_eq!(back.base_rate(), a.base_rate());
}

#[test]
fn test_density_of_opinion_pdf() {
    let a = op(&[0.0, 0.0, 0.4, 0.1], 0.5, &[0.25; 4]);
    let density = a.dirichlet_pdf().density(&[0.2, 0.3, 0.4, 0.1]).unwrap();
    assert!(density.is_finite() && density > 0.0);

    let pdf = DirichletPdf::new(&[0.0, 0.0], &[0.5, 0.5]);
    assert_relative_eq!(pdf.density(&[0.5, 0.5]).unwrap(), 1.0, epsilon = 1e-12);
}

#[test]
fn test_binomial_and_multinomial_inputs_mix() {
    let binomial = BinomialOpinion::new(0.6, 0.2, 0.2, 0.5);
    let multinomial = op(&[0.3, 0.3], 0.4, &[0.5, 0.5]);
    let fused = cbf2(&binomial, &multinomial).unwrap();
    assert_relative_eq!(fused.belief()[0], 0.3 / 0.52, epsilon = 1e-9);
    let conflict = doc(&binomial, &multinomial).unwrap();
    assert!(conflict > 0.0 && conflict < 1.0);
}

#[test]
fn test_algebra_tolerance_from_config() {
    let config = NumericConfig {
        tolerance: Some(0.01),
        ..Default::default()
    };
    let algebra = OpinionAlgebra::new(&config);
    // u = 0.005 counts as dogmatic under a 0.01 tolerance.
    let nearly = op(&[0.995, 0.0], 0.005, &[0.5, 0.5]);
    let other = op(&[0.0, 0.5], 0.5, &[0.5, 0.5]);
    let fused = algebra.cumulative_fusion_pair(&nearly, &other).unwrap();
    assert_relative_eq!(fused.belief()[0], 0.995, epsilon = 1e-12);
    assert_relative_eq!(fused.uncertainty(), 0.005, epsilon = 1e-12);
}

#[test]
fn test_operator_errors_convert_into_subj_error() {
    fn fuse_one(a: &MultinomialOpinion) -> SubjResult<MultinomialOpinion> {
        Ok(cbf(&[a])?)
    }
    let a = MultinomialOpinion::vacuous(2).unwrap();
    let err = fuse_one(&a).unwrap_err();
    assert!(err.to_string().contains("cumulative_fusion"));
}

#[test]
fn test_product_projection_is_outer_product() {
    let a = op(&[0.6, 0.2], 0.2, &[0.3, 0.7]);
    let b = op(&[0.1, 0.2, 0.3], 0.4, &[0.2, 0.3, 0.5]);
    let product = operators::multiplication(&a, &b).unwrap();
    let (pa, pb, p) = (a.projection(), b.projection(), product.projection());
    for i in 0..2 {
        for j in 0..3 {
            assert_relative_eq!(p[i * 3 + j], pa[i] * pb[j], epsilon = 1e-9);
        }
    }
}
