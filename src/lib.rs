//! `cherenkov-predict` library crate.
//!
//! Predicts the Cherenkov light intensity of spent nuclear fuel from burnup
//! outputs and pre-computed calibration tables. The binary (`clip`) is a thin
//! wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - the predictor can be embedded by other tools
//!
//! Typical use: [`response::CalibrationLibrary::load`], then
//! [`predict::configure`], then [`predict::ConfiguredPredictor::predict`] on each
//! [`io::BurnupOutput`].

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod math;
pub mod predict;
pub mod rebin;
pub mod report;
pub mod response;
