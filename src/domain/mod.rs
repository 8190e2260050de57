//! Domain types used throughout the prediction pipeline.
//!
//! This module defines:
//!
//! - configuration enums (`BurnupSource`, `GammaMode`, `BetaMode`, `IsotopeBasis`)
//! - calibration keys (`Channel`, `ResponseKind`)
//! - input/output values (`SpectralLine`, `Prediction`, `PredictionConfig`)

pub mod types;

pub use types::*;
