//! Calibration response representations.
//!
//! A response function relates an emission quantity to detector light. It comes in
//! three incompatible encodings, modeled as the closed [`ResponseFunction`] set:
//!
//! - [`BinnedHistogram`]: per-bin response over contiguous energy bins
//! - [`SampledCurve`]: response sampled at discrete energies (interpolated on use)
//! - [`IsotopeTable`]: per-isotope coefficient, in activity and mass basis
//!
//! All three are immutable after construction. The [`CalibrationLibrary`] holds the
//! loaded set for every fuel design.

use thiserror::Error;

use crate::domain::ResponseKind;

pub mod binned;
pub mod isotope;
pub mod library;
pub mod sampled;

pub use binned::*;
pub use isotope::*;
pub use library::*;
pub use sampled::*;

/// Invariant violations when building a response representation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RepresentationError {
    #[error("Response contains no data")]
    Empty,

    #[error("Expected one more bin edge than bins, got {edges} edges for {bins} bins")]
    EdgeCountMismatch { edges: usize, bins: usize },

    #[error("Length of {what} is {actual}, expected {expected}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("{what} must be strictly increasing (index {index})")]
    NotAscending { what: &'static str, index: usize },

    #[error("A sampled response needs at least {min} samples, got {actual}")]
    TooFewSamples { min: usize, actual: usize },

    #[error("Isotope {0} is listed more than once")]
    DuplicateIsotope(String),
}

/// One loaded response function, in whichever encoding its file used.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseFunction {
    Binned(BinnedHistogram),
    Sampled(SampledCurve),
    Isotope(IsotopeTable),
}

impl ResponseFunction {
    pub fn kind(&self) -> ResponseKind {
        match self {
            ResponseFunction::Binned(_) => ResponseKind::Binned,
            ResponseFunction::Sampled(_) => ResponseKind::Sampled,
            ResponseFunction::Isotope(_) => ResponseKind::Isotope,
        }
    }

    pub fn as_isotope(&self) -> Option<&IsotopeTable> {
        match self {
            ResponseFunction::Isotope(t) => Some(t),
            _ => None,
        }
    }

    /// Number of bins, samples or isotopes.
    pub fn len(&self) -> usize {
        match self {
            ResponseFunction::Binned(h) => h.bin_count(),
            ResponseFunction::Sampled(c) => c.energies().len(),
            ResponseFunction::Isotope(t) => t.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
