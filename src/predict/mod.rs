//! Prediction engine.
//!
//! Usage is two-step:
//!
//! 1. [`configure`] checks a [`crate::domain::PredictionConfig`] against a loaded
//!    [`crate::response::CalibrationLibrary`] and returns a [`ConfiguredPredictor`].
//! 2. [`ConfiguredPredictor::predict`] evaluates one burnup output and returns a
//!    [`PredictionOutcome`].
//!
//! Which formula applies is decided by burnup source x gamma mode x beta mode:
//!
//! | source             | gamma binned              | gamma sampled                  | gamma isotope | beta isotope |
//! |--------------------|---------------------------|--------------------------------|---------------|--------------|
//! | origen             | exact bins, binned        | response rebinned, binned      | isotope       | isotope      |
//! | transport-spectrum | lines rebinned, binned    | sampled on lines               | abort         | skipped      |
//! | transport-material | abort                     | abort                          | isotope       | isotope      |

pub mod config;
pub mod engine;
pub mod errors;
pub mod formulas;
pub mod outcome;

pub use config::*;
pub use engine::ConfiguredPredictor;
pub use errors::*;
pub use formulas::*;
pub use outcome::*;
