//! Cubic spline interpolation of sampled response curves.
//!
//! We use the not-a-knot cubic spline: the third derivative is continuous across
//! the second and the second-to-last knot. It is the usual "cubic" interpolant of
//! scientific toolkits, which is what calibration curves were characterized against.
//!
//! Degenerate sizes:
//! - 3 samples: the unique interpolating quadratic
//! - 2 samples: the straight line
//!
//! The spline is represented by its knot second derivatives `M_i`, obtained from a
//! small dense linear system (calibration curves have tens of points) solved with LU.

use nalgebra::{DMatrix, DVector};

use crate::math::MathError;

/// Minimum number of samples for interpolation.
pub const MIN_SAMPLES: usize = 2;

/// A cubic interpolant over strictly increasing knots.
#[derive(Debug, Clone)]
pub struct CubicSpline {
    x: Vec<f64>,
    y: Vec<f64>,
    /// Second derivative at each knot.
    m: Vec<f64>,
}

impl CubicSpline {
    /// Build the interpolant for `y(x)`.
    pub fn new(x: &[f64], y: &[f64]) -> Result<Self, MathError> {
        if x.len() != y.len() {
            return Err(MathError::LengthMismatch {
                expected: x.len(),
                actual: y.len(),
            });
        }
        if x.len() < MIN_SAMPLES {
            return Err(MathError::TooFewSamples {
                min: MIN_SAMPLES,
                actual: x.len(),
            });
        }
        if let Some(index) = first_non_ascending(x) {
            return Err(MathError::NotAscending { index });
        }

        let m = match x.len() {
            2 => vec![0.0, 0.0],
            3 => {
                let h0 = x[1] - x[0];
                let h1 = x[2] - x[1];
                let c = 2.0 * ((y[2] - y[1]) / h1 - (y[1] - y[0]) / h0) / (h0 + h1);
                vec![c, c, c]
            }
            _ => not_a_knot_second_derivatives(x, y)?,
        };

        Ok(Self {
            x: x.to_vec(),
            y: y.to_vec(),
            m,
        })
    }

    pub fn min_x(&self) -> f64 {
        self.x[0]
    }

    pub fn max_x(&self) -> f64 {
        self.x[self.x.len() - 1]
    }

    /// Evaluate the interpolant. Queries outside `[x[0], x[n-1]]` are an error.
    pub fn eval(&self, query: f64) -> Result<f64, MathError> {
        let (min, max) = (self.min_x(), self.max_x());
        if !(query >= min && query <= max) {
            return Err(MathError::OutOfDomain { query, min, max });
        }

        // Segment i satisfies x[i] <= query <= x[i+1].
        let upper = self.x.partition_point(|&xi| xi <= query);
        let i = upper.saturating_sub(1).min(self.x.len() - 2);

        let (x0, x1) = (self.x[i], self.x[i + 1]);
        let (y0, y1) = (self.y[i], self.y[i + 1]);
        let (m0, m1) = (self.m[i], self.m[i + 1]);
        let h = x1 - x0;
        let a = x1 - query;
        let b = query - x0;

        Ok(m0 * a.powi(3) / (6.0 * h)
            + m1 * b.powi(3) / (6.0 * h)
            + (y0 / h - m0 * h / 6.0) * a
            + (y1 / h - m1 * h / 6.0) * b)
    }
}

/// Evaluate the cubic interpolant of `y(x)` at a single point.
pub fn interpolate_cubic(x: &[f64], y: &[f64], query: f64) -> Result<f64, MathError> {
    CubicSpline::new(x, y)?.eval(query)
}

fn first_non_ascending(x: &[f64]) -> Option<usize> {
    x.windows(2)
        .position(|w| !(w[1] > w[0]))
        .map(|i| i + 1)
}

/// Solve for knot second derivatives with not-a-knot end conditions (n >= 4).
fn not_a_knot_second_derivatives(x: &[f64], y: &[f64]) -> Result<Vec<f64>, MathError> {
    let n = x.len();
    let h: Vec<f64> = x.windows(2).map(|w| w[1] - w[0]).collect();

    let mut a = DMatrix::<f64>::zeros(n, n);
    let mut rhs = DVector::<f64>::zeros(n);

    // Left end: M'''(x) continuous at x[1].
    a[(0, 0)] = h[1];
    a[(0, 1)] = -(h[0] + h[1]);
    a[(0, 2)] = h[0];

    // Interior: first-derivative continuity.
    for i in 1..n - 1 {
        a[(i, i - 1)] = h[i - 1];
        a[(i, i)] = 2.0 * (h[i - 1] + h[i]);
        a[(i, i + 1)] = h[i];
        rhs[i] = 6.0 * ((y[i + 1] - y[i]) / h[i] - (y[i] - y[i - 1]) / h[i - 1]);
    }

    // Right end: M'''(x) continuous at x[n-2].
    a[(n - 1, n - 3)] = h[n - 2];
    a[(n - 1, n - 2)] = -(h[n - 3] + h[n - 2]);
    a[(n - 1, n - 1)] = h[n - 3];

    let m = a.lu().solve(&rhs).ok_or(MathError::SingularSystem)?;
    if m.iter().any(|v| !v.is_finite()) {
        return Err(MathError::SingularSystem);
    }
    Ok(m.iter().copied().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reproduces_a_cubic_exactly() {
        let f = |x: f64| 0.5 * x.powi(3) - 2.0 * x.powi(2) + x + 3.0;
        let x: Vec<f64> = (0..7).map(|i| i as f64 * 0.5).collect();
        let y: Vec<f64> = x.iter().map(|&v| f(v)).collect();
        let spline = CubicSpline::new(&x, &y).unwrap();
        for &q in &[0.1, 0.77, 1.5, 2.2, 2.99] {
            let v = spline.eval(q).unwrap();
            assert!((v - f(q)).abs() < 1e-9, "spline({q}) = {v}, expected {}", f(q));
        }
    }

    #[test]
    fn passes_through_knots() {
        let x = [0.1, 0.3, 0.4, 0.8, 1.0];
        let y = [2.0, -1.0, 0.5, 4.0, 3.0];
        let spline = CubicSpline::new(&x, &y).unwrap();
        for (xi, yi) in x.iter().zip(y.iter()) {
            assert!((spline.eval(*xi).unwrap() - yi).abs() < 1e-12);
        }
    }

    #[test]
    fn three_samples_give_the_quadratic() {
        let x = [0.0, 1.0, 3.0];
        let y = [1.0, 2.0, 10.0]; // y = x^2 + 1
        let v = interpolate_cubic(&x, &y, 2.0).unwrap();
        assert!((v - 5.0).abs() < 1e-12);
    }

    #[test]
    fn two_samples_are_linear() {
        let v = interpolate_cubic(&[1.0, 3.0], &[10.0, 20.0], 2.5).unwrap();
        assert!((v - 17.5).abs() < 1e-12);
    }

    #[test]
    fn outside_domain_is_an_error() {
        let err = interpolate_cubic(&[1.0, 2.0, 3.0, 4.0], &[1.0, 2.0, 3.0, 4.0], 4.5).unwrap_err();
        assert!(matches!(err, MathError::OutOfDomain { .. }));
    }

    #[test]
    fn rejects_unsorted_knots() {
        let err = CubicSpline::new(&[1.0, 3.0, 2.0], &[0.0, 0.0, 0.0]).unwrap_err();
        assert_eq!(err, MathError::NotAscending { index: 2 });
    }
}
