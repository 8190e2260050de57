use serde::Serialize;

use crate::response::RepresentationError;

/// Piecewise-constant response (or spectrum) over contiguous energy bins.
///
/// Invariants (checked in [`BinnedHistogram::new`]):
/// - `edges.len() == values.len() + 1`
/// - `uncertainties.len() == values.len()`
/// - at least one bin, edges strictly increasing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BinnedHistogram {
    edges: Vec<f64>,
    values: Vec<f64>,
    uncertainties: Vec<f64>,
}

impl BinnedHistogram {
    pub fn new(edges: Vec<f64>, values: Vec<f64>, uncertainties: Vec<f64>) -> Result<Self, RepresentationError> {
        if values.is_empty() {
            return Err(RepresentationError::Empty);
        }
        if edges.len() != values.len() + 1 {
            return Err(RepresentationError::EdgeCountMismatch {
                edges: edges.len(),
                bins: values.len(),
            });
        }
        if uncertainties.len() != values.len() {
            return Err(RepresentationError::LengthMismatch {
                what: "bin uncertainties",
                expected: values.len(),
                actual: uncertainties.len(),
            });
        }
        if let Some(index) = edges.windows(2).position(|w| !(w[1] > w[0])) {
            return Err(RepresentationError::NotAscending {
                what: "bin edges",
                index: index + 1,
            });
        }
        Ok(Self {
            edges,
            values,
            uncertainties,
        })
    }

    /// A histogram whose values carry no uncertainty (burnup codes do not report one).
    pub fn without_uncertainties(edges: Vec<f64>, values: Vec<f64>) -> Result<Self, RepresentationError> {
        let zeros = vec![0.0; values.len()];
        Self::new(edges, values, zeros)
    }

    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn uncertainties(&self) -> &[f64] {
        &self.uncertainties
    }

    pub fn bin_count(&self) -> usize {
        self.values.len()
    }

    /// Exact, element-wise equality of bin edges.
    pub fn same_binning(&self, other: &BinnedHistogram) -> bool {
        self.edges.len() == other.edges.len() && self.edges.iter().zip(other.edges.iter()).all(|(a, b)| a == b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enforces_edge_count() {
        let err = BinnedHistogram::new(vec![0.0, 1.0], vec![1.0, 2.0], vec![0.0, 0.0]).unwrap_err();
        assert_eq!(err, RepresentationError::EdgeCountMismatch { edges: 2, bins: 2 });
    }

    #[test]
    fn enforces_ascending_edges() {
        let err = BinnedHistogram::without_uncertainties(vec![0.0, 1.0, 1.0], vec![1.0, 2.0]).unwrap_err();
        assert!(matches!(err, RepresentationError::NotAscending { index: 2, .. }));
    }

    #[test]
    fn same_binning_is_exact() {
        let a = BinnedHistogram::without_uncertainties(vec![0.0, 0.1, 0.3], vec![1.0, 1.0]).unwrap();
        let b = BinnedHistogram::without_uncertainties(vec![0.0, 0.1, 0.3 + 1e-15], vec![1.0, 1.0]).unwrap();
        assert!(a.same_binning(&a.clone()));
        assert!(!a.same_binning(&b));
    }
}
