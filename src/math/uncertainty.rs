//! Uncorrelated error propagation for a weighted sum.
//!
//! For paired elements `a_i` (value) and `b_i` (weight) we compute
//!
//! ```text
//! value       = Σ a_i b_i
//! variance    = Σ (a_i b_i)^2 [ (σa_i / a_i)^2 if a_i > 0 ] + (a_i b_i)^2 [ (σb_i / b_i)^2 if b_i > 0 ]
//! uncertainty = sqrt(variance)
//! ```
//!
//! A side whose element is not strictly positive contributes no variance for that
//! element, whatever its stated uncertainty. Reference outputs depend on this guard,
//! so the arithmetic order below mirrors it term for term.

use crate::domain::Prediction;
use crate::math::MathError;

/// Combine paired values and weights into a `(value, uncertainty)` prediction.
pub fn combine_uncertainty(
    values: &[f64],
    value_uncertainties: &[f64],
    weights: &[f64],
    weight_uncertainties: &[f64],
) -> Result<Prediction, MathError> {
    let n = values.len();
    for len in [value_uncertainties.len(), weights.len(), weight_uncertainties.len()] {
        if len != n {
            return Err(MathError::LengthMismatch {
                expected: n,
                actual: len,
            });
        }
    }

    let mut value = 0.0;
    let mut variance = 0.0;
    for i in 0..n {
        let a = values[i];
        let b = weights[i];
        value += a * b;
        variance += element_variance(a, value_uncertainties[i], b, weight_uncertainties[i]);
    }

    Ok(Prediction::new(value, variance.sqrt()))
}

/// Variance contribution of a single `a * b` product under the zero guard.
pub fn element_variance(a: f64, sigma_a: f64, b: f64, sigma_b: f64) -> f64 {
    let product_sq = (a * b).powi(2);
    let mut sum = 0.0;
    if a > 0.0 {
        sum += product_sq * (sigma_a / a).powi(2);
    }
    if b > 0.0 {
        sum += product_sq * (sigma_b / b).powi(2);
    }
    sum
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_value_contributes_no_variance() {
        let p = combine_uncertainty(&[0.0], &[5.0], &[10.0], &[1.0]).unwrap();
        assert_eq!(p, Prediction::ZERO);
    }

    #[test]
    fn zero_weight_contributes_no_variance() {
        let p = combine_uncertainty(&[3.0], &[1.0], &[0.0], &[7.0]).unwrap();
        assert_eq!(p.value, 0.0);
        assert_eq!(p.uncertainty, 0.0);
    }

    #[test]
    fn relative_uncertainties_add_in_quadrature() {
        // 10% on the value and 20% on the weight of a product of 6.
        let p = combine_uncertainty(&[2.0], &[0.2], &[3.0], &[0.6]).unwrap();
        assert!((p.value - 6.0).abs() < 1e-12);
        let expected = (36.0_f64 * (0.01 + 0.04)).sqrt();
        assert!((p.uncertainty - expected).abs() < 1e-12);
    }

    #[test]
    fn negative_weight_skips_its_side_only() {
        let p = combine_uncertainty(&[2.0], &[0.2], &[-3.0], &[0.6]).unwrap();
        assert!((p.value + 6.0).abs() < 1e-12);
        assert!((p.uncertainty - 0.6).abs() < 1e-12);
    }

    #[test]
    fn multi_element_sum() {
        let values = [1.0, 2.0, 0.0, 4.0];
        let sv = [0.1, 0.0, 1.0, 0.4];
        let weights = [10.0, 0.0, 5.0, 2.0];
        let sw = [1.0, 3.0, 0.5, 0.0];
        let p = combine_uncertainty(&values, &sv, &weights, &sw).unwrap();
        assert!((p.value - 18.0).abs() < 1e-12);
        // element 0: 100 * (0.01 + 0.01) = 2; element 3: 64 * 0.01 = 0.64
        assert!((p.uncertainty - 2.64_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn length_mismatch_is_rejected() {
        let err = combine_uncertainty(&[1.0, 2.0], &[0.0, 0.0], &[1.0], &[0.0]).unwrap_err();
        assert_eq!(err, MathError::LengthMismatch { expected: 2, actual: 1 });
    }
}
