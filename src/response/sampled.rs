use serde::Serialize;

use crate::math::{CubicSpline, MIN_SAMPLES};
use crate::response::RepresentationError;

/// Response known only at discrete energies.
///
/// Invariants: equal-length arrays, at least two samples, energies strictly increasing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampledCurve {
    energies: Vec<f64>,
    values: Vec<f64>,
    uncertainties: Vec<f64>,
}

impl SampledCurve {
    pub fn new(energies: Vec<f64>, values: Vec<f64>, uncertainties: Vec<f64>) -> Result<Self, RepresentationError> {
        if energies.len() < MIN_SAMPLES {
            return Err(RepresentationError::TooFewSamples {
                min: MIN_SAMPLES,
                actual: energies.len(),
            });
        }
        for (what, len) in [("sampled values", values.len()), ("sampled uncertainties", uncertainties.len())] {
            if len != energies.len() {
                return Err(RepresentationError::LengthMismatch {
                    what,
                    expected: energies.len(),
                    actual: len,
                });
            }
        }
        if let Some(index) = energies.windows(2).position(|w| !(w[1] > w[0])) {
            return Err(RepresentationError::NotAscending {
                what: "sample energies",
                index: index + 1,
            });
        }
        Ok(Self {
            energies,
            values,
            uncertainties,
        })
    }

    pub fn energies(&self) -> &[f64] {
        &self.energies
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn uncertainties(&self) -> &[f64] {
        &self.uncertainties
    }

    pub fn min_energy(&self) -> f64 {
        self.energies[0]
    }

    pub fn max_energy(&self) -> f64 {
        self.energies[self.energies.len() - 1]
    }

    /// Interpolant of the response values.
    pub fn value_spline(&self) -> Result<CubicSpline, crate::math::MathError> {
        CubicSpline::new(&self.energies, &self.values)
    }

    /// Interpolant of the response uncertainties.
    pub fn uncertainty_spline(&self) -> Result<CubicSpline, crate::math::MathError> {
        CubicSpline::new(&self.energies, &self.uncertainties)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn needs_two_samples() {
        let err = SampledCurve::new(vec![0.5], vec![1.0], vec![0.1]).unwrap_err();
        assert_eq!(err, RepresentationError::TooFewSamples { min: 2, actual: 1 });
    }

    #[test]
    fn reports_domain() {
        let c = SampledCurve::new(vec![0.1, 0.2, 0.6], vec![0.0, 1.0, 2.0], vec![0.0; 3]).unwrap();
        assert_eq!(c.min_energy(), 0.1);
        assert_eq!(c.max_energy(), 0.6);
    }
}
