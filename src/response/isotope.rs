use std::collections::HashSet;

use serde::Serialize;

use crate::domain::IsotopeBasis;
use crate::response::RepresentationError;

/// Per-isotope light yield, in both activity and mass basis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IsotopeCoefficient {
    /// Canonical element + mass number, e.g. `Cs137`.
    pub isotope: String,
    pub activity: f64,
    pub activity_uncertainty: f64,
    pub mass: f64,
    pub mass_uncertainty: f64,
}

impl IsotopeCoefficient {
    pub fn for_basis(&self, basis: IsotopeBasis) -> (f64, f64) {
        match basis {
            IsotopeBasis::Activity => (self.activity, self.activity_uncertainty),
            IsotopeBasis::Mass => (self.mass, self.mass_uncertainty),
        }
    }
}

/// Ordered isotope coefficient table.
///
/// The row order is stable: content vectors read from burnup outputs are aligned to
/// [`IsotopeTable::isotopes`] position by position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IsotopeTable {
    entries: Vec<IsotopeCoefficient>,
}

impl IsotopeTable {
    pub fn new(entries: Vec<IsotopeCoefficient>) -> Result<Self, RepresentationError> {
        if entries.is_empty() {
            return Err(RepresentationError::Empty);
        }
        let mut seen = HashSet::new();
        for e in &entries {
            if !seen.insert(e.isotope.as_str()) {
                return Err(RepresentationError::DuplicateIsotope(e.isotope.clone()));
            }
        }
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[IsotopeCoefficient] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Isotope identifiers in table order.
    pub fn isotopes(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.isotope.clone()).collect()
    }

    /// Coefficient and uncertainty vectors in table order.
    pub fn coefficients(&self, basis: IsotopeBasis) -> (Vec<f64>, Vec<f64>) {
        self.entries.iter().map(|e| e.for_basis(basis)).unzip()
    }

    /// Coefficient for one isotope, if the table has it.
    pub fn coefficient(&self, isotope: &str, basis: IsotopeBasis) -> Option<(f64, f64)> {
        self.entries
            .iter()
            .find(|e| e.isotope == isotope)
            .map(|e| e.for_basis(basis))
    }
}
