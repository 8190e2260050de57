//! Sampled curve to histogram ("spectrum alignment").
//!
//! Each target bin gets the mean of the interpolated curve over the part of the bin
//! inside the sampled domain `[min_e, max_e]`. A bin with no overlap gets 0.

use crate::math::{integrate, CubicSpline, MathError};
use crate::response::SampledCurve;

/// Average of the interpolant of `values(energies)` over each bin of `edges`.
pub fn curve_to_bins(energies: &[f64], values: &[f64], edges: &[f64]) -> Result<Vec<f64>, MathError> {
    let spline = CubicSpline::new(energies, values)?;
    let (min_e, max_e) = (spline.min_x(), spline.max_x());

    edges
        .windows(2)
        .map(|bin| {
            let a = bin[0].max(min_e);
            let b = bin[1].min(max_e);
            if b <= a {
                return Ok(0.0);
            }
            let area = integrate(|x| spline.eval(x).unwrap_or(f64::NAN), a, b)?;
            Ok(area / (b - a))
        })
        .collect()
}

/// Rebin both the values and the uncertainties of `curve` onto `edges`.
pub fn rebin_sampled(curve: &SampledCurve, edges: &[f64]) -> Result<(Vec<f64>, Vec<f64>), MathError> {
    let values = curve_to_bins(curve.energies(), curve.values(), edges)?;
    let uncertainties = curve_to_bins(curve.energies(), curve.uncertainties(), edges)?;
    Ok((values, uncertainties))
}
