//! Static nuclear data and unit conversions.
//!
//! - isotope name cross-reference and masses (`isotopes`)
//! - transport-to-ORIGEN volume normalization (`rescale`)

pub mod isotopes;
pub mod rescale;

pub use isotopes::*;
pub use rescale::*;
