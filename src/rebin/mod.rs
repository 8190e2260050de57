//! Spectral alignment onto a target bin structure.
//!
//! - discrete emission lines -> bin totals, with ORIGEN's energy correction and
//!   near-edge splitting (`lines`)
//! - sampled response curve -> per-bin averages by interpolate-then-integrate (`curve`)

pub mod curve;
pub mod lines;

pub use curve::*;
pub use lines::*;
