//! The three combination formulas.
//!
//! Each one pairs an emission quantity with a response and folds the pairs through
//! the zero-guarded uncertainty rule of [`crate::math::combine_uncertainty`].

use log::warn;

use crate::domain::{IsotopeBasis, Prediction, SpectralLine};
use crate::math::{combine_uncertainty, element_variance};
use crate::predict::PredictionError;
use crate::response::{BinnedHistogram, IsotopeTable, SampledCurve};

/// Bin-by-bin product of a spectrum and a binned response.
///
/// The two bin structures must be identical, edge for edge.
pub fn predict_binned(spectrum: &BinnedHistogram, response: &BinnedHistogram) -> Result<Prediction, PredictionError> {
    if !spectrum.same_binning(response) {
        return Err(PredictionError::BinStructureMismatch {
            expected: response.edges().len(),
            found: spectrum.edges().len(),
        });
    }
    Ok(combine_uncertainty(
        spectrum.values(),
        spectrum.uncertainties(),
        response.values(),
        response.uncertainties(),
    )?)
}

/// Sum over emission lines of `rate * response(energy)`.
///
/// Lines outside `[min_e, max_e)` of the response are skipped. Lines are looked up
/// one by one; duplicate energies are not merged.
pub fn predict_sampled(lines: &[SpectralLine], response: &SampledCurve) -> Result<Prediction, PredictionError> {
    let value_spline = response.value_spline()?;
    let uncertainty_spline = response.uncertainty_spline()?;
    let (min_e, max_e) = (response.min_energy(), response.max_energy());

    let mut value = 0.0;
    let mut variance = 0.0;
    for line in lines {
        if !(line.energy >= min_e && line.energy < max_e) {
            continue;
        }
        let r = value_spline.eval(line.energy)?;
        let sigma_r = uncertainty_spline.eval(line.energy)?;
        value += line.rate * r;
        variance += element_variance(line.rate, line.rate_uncertainty, r, sigma_r);
    }
    Ok(Prediction::new(value, variance.sqrt()))
}

/// Dot product of isotope contents with the table's coefficients.
///
/// `contents` and `content_uncertainties` are aligned to [`IsotopeTable::isotopes`].
pub fn predict_isotope(
    contents: &[f64],
    content_uncertainties: &[f64],
    table: &IsotopeTable,
    basis: IsotopeBasis,
) -> Result<Prediction, PredictionError> {
    let (coefficients, coefficient_uncertainties) = table.coefficients(basis);
    Ok(combine_uncertainty(
        contents,
        content_uncertainties,
        &coefficients,
        &coefficient_uncertainties,
    )?)
}

/// Isotope prediction from `(isotope, content)` pairs in any order.
///
/// An isotope with no coefficient in `table` is weighted by 0.
pub fn predict_isotope_keyed(contents: &[(String, f64)], table: &IsotopeTable, basis: IsotopeBasis) -> Prediction {
    let mut value = 0.0;
    let mut variance = 0.0;
    for (isotope, amount) in contents {
        let (coefficient, sigma) = table.coefficient(isotope, basis).unwrap_or_else(|| {
            warn!("no calibration coefficient for {isotope}; weighting it by 0");
            (0.0, 0.0)
        });
        value += amount * coefficient;
        variance += element_variance(*amount, 0.0, coefficient, sigma);
    }
    Prediction::new(value, variance.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::IsotopeCoefficient;

    fn close(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() <= tol * b.abs().max(1.0)
    }

    fn table() -> IsotopeTable {
        IsotopeTable::new(vec![
            IsotopeCoefficient {
                isotope: "Cs137".to_string(),
                activity: 2.0,
                activity_uncertainty: 0.2,
                mass: 10.0,
                mass_uncertainty: 1.0,
            },
            IsotopeCoefficient {
                isotope: "Sr90".to_string(),
                activity: 3.0,
                activity_uncertainty: 0.0,
                mass: 20.0,
                mass_uncertainty: 4.0,
            },
        ])
        .unwrap()
    }

    #[test]
    fn binned_reproduces_dot_product() {
        let edges = vec![0.0, 0.1, 0.2, 0.4, 0.8];
        let spectrum = BinnedHistogram::without_uncertainties(edges.clone(), vec![1e10, 2e10, 0.0, 4e9]).unwrap();
        let response = BinnedHistogram::new(edges, vec![0.5, 1.5, 2.5, 3.5], vec![0.05, 0.3, 1.0, 0.35]).unwrap();

        let p = predict_binned(&spectrum, &response).unwrap();
        let value = 1e10 * 0.5 + 2e10 * 1.5 + 4e9 * 3.5;
        let variance = (1e10_f64 * 0.5).powi(2) * 0.01 + (2e10_f64 * 1.5).powi(2) * 0.04 + (4e9_f64 * 3.5).powi(2) * 0.01;
        assert!(close(p.value, value, 1e-14));
        assert!(close(p.uncertainty, variance.sqrt(), 1e-12));
    }

    #[test]
    fn binned_is_symmetric_under_swap() {
        let edges = vec![0.0, 1.0, 2.0, 3.0];
        let a = BinnedHistogram::new(edges.clone(), vec![1.0, 2.0, 3.0], vec![0.1, 0.0, 0.3]).unwrap();
        let b = BinnedHistogram::new(edges, vec![4.0, 0.0, 6.0], vec![0.4, 0.5, 0.6]).unwrap();
        assert_eq!(predict_binned(&a, &b).unwrap(), predict_binned(&b, &a).unwrap());
    }

    #[test]
    fn binned_rejects_different_edges() {
        let a = BinnedHistogram::without_uncertainties(vec![0.0, 1.0, 2.0], vec![1.0, 1.0]).unwrap();
        let b = BinnedHistogram::without_uncertainties(vec![0.0, 1.0, 2.5], vec![1.0, 1.0]).unwrap();
        let c = BinnedHistogram::without_uncertainties(vec![0.0, 1.0], vec![1.0]).unwrap();
        assert_eq!(
            predict_binned(&a, &b).unwrap_err(),
            PredictionError::BinStructureMismatch { expected: 3, found: 3 }
        );
        assert_eq!(
            predict_binned(&c, &a).unwrap_err(),
            PredictionError::BinStructureMismatch { expected: 3, found: 2 }
        );
    }

    #[test]
    fn sampled_skips_lines_outside_domain() {
        let curve = SampledCurve::new(vec![0.1, 0.2, 0.3, 0.4], vec![1.0, 2.0, 3.0, 4.0], vec![0.1, 0.2, 0.3, 0.4]).unwrap();
        let lines = [
            SpectralLine::new(0.05, 100.0),
            SpectralLine::new(0.1, 1.0),
            SpectralLine::new(0.25, 2.0),
            SpectralLine::new(0.4, 100.0),
        ];
        let p = predict_sampled(&lines, &curve).unwrap();
        // Linear response 10x: 1*1 + 2*2.5; the relative response uncertainty is 10%.
        assert!(close(p.value, 6.0, 1e-12));
        let expected = (1.0_f64 * 0.01 + 25.0 * 0.01).sqrt();
        assert!(close(p.uncertainty, expected, 1e-12));
    }

    #[test]
    fn sampled_with_no_lines_in_range_is_zero() {
        let curve = SampledCurve::new(vec![0.1, 0.2], vec![1.0, 2.0], vec![0.0, 0.0]).unwrap();
        let p = predict_sampled(&[SpectralLine::new(0.9, 5.0)], &curve).unwrap();
        assert_eq!(p, Prediction::ZERO);
    }

    #[test]
    fn isotope_uses_selected_basis() {
        let t = table();
        let mass = predict_isotope(&[2.0, 1.0], &[0.0, 0.0], &t, IsotopeBasis::Mass).unwrap();
        assert!(close(mass.value, 40.0, 1e-15));
        // 20^2 * 0.01 + 20^2 * 0.04
        assert!(close(mass.uncertainty, 20.0_f64.sqrt(), 1e-12));

        let activity = predict_isotope(&[2.0, 1.0], &[0.0, 0.0], &t, IsotopeBasis::Activity).unwrap();
        assert!(close(activity.value, 7.0, 1e-15));
    }

    #[test]
    fn isotope_length_mismatch_is_numeric_error() {
        let err = predict_isotope(&[1.0], &[0.0], &table(), IsotopeBasis::Mass).unwrap_err();
        assert!(matches!(err, PredictionError::Numeric(_)));
    }

    #[test]
    fn missing_coefficient_counts_as_zero() {
        let t = table();
        let with_unknown = vec![
            ("Cs137".to_string(), 2.0),
            ("Co60".to_string(), 50.0),
            ("Sr90".to_string(), 1.0),
        ];
        let keyed = predict_isotope_keyed(&with_unknown, &t, IsotopeBasis::Mass);
        let aligned = predict_isotope(&[2.0, 1.0], &[0.0, 0.0], &t, IsotopeBasis::Mass).unwrap();
        assert_eq!(keyed, aligned);
    }
}
