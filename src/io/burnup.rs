//! Burnup-output access seam.
//!
//! The predictor never parses files itself. It asks a [`BurnupOutput`] for one of
//! three things, depending on the configured mode:
//!
//! - a binned gamma spectrum at a cooling time (ORIGEN-like outputs)
//! - a list of discrete gamma lines (transport gamma sources)
//! - isotope contents, aligned to a list of isotope identifiers
//!
//! A reader that cannot provide a quantity keeps the default method, which reports
//! [`ReadError::NotProvided`].

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::domain::{BurnupSource, SpectralLine};
use crate::io::origen::OrigenOutput;
use crate::io::serpent::{SerpentGammaSource, SerpentMaterial};
use crate::response::{BinnedHistogram, RepresentationError};

/// Failures while reading response files or burnup outputs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ReadError {
    #[error("Failed to read '{path}': {message}")]
    Io { path: PathBuf, message: String },

    #[error("'{path}' contains no usable data")]
    Empty { path: PathBuf },

    #[error("Malformed line {line}: {message}")]
    Malformed { line: usize, message: String },

    #[error("A cooling time is required for this burnup output")]
    MissingCoolingTime,

    #[error("Cooling time '{0}' is wider than a 10-character output column")]
    CoolingTimeTooLong(String),

    #[error("No gamma spectrum found for cooling time '{0}'")]
    CoolingTimeNotFound(String),

    #[error("This burnup output does not provide {0}")]
    NotProvided(&'static str),

    #[error(transparent)]
    Representation(#[from] RepresentationError),
}

impl ReadError {
    pub fn io(path: &Path, err: std::io::Error) -> Self {
        ReadError::Io {
            path: path.to_path_buf(),
            message: err.to_string(),
        }
    }
}

/// Quantities a prediction can request from a parsed burnup output.
pub trait BurnupOutput: Send + Sync {
    /// Binned gamma emission spectrum at `cooling_time`, uncertainties all zero.
    fn gamma_spectrum(&self, cooling_time: &str) -> Result<BinnedHistogram, ReadError> {
        let _ = cooling_time;
        Err(ReadError::NotProvided("a binned gamma spectrum"))
    }

    /// Discrete gamma emission lines.
    fn gamma_lines(&self) -> Result<Vec<SpectralLine>, ReadError> {
        Err(ReadError::NotProvided("gamma lines"))
    }

    /// Isotope contents aligned position by position to `isotopes`.
    ///
    /// Isotopes absent from the output are reported as 0.
    fn isotope_contents(&self, cooling_time: Option<&str>, isotopes: &[String]) -> Result<Vec<f64>, ReadError> {
        let _ = (cooling_time, isotopes);
        Err(ReadError::NotProvided("isotope contents"))
    }

    /// Every tracked isotope with its content, for outputs that hold a full inventory.
    ///
    /// When present, predictions weight each isotope by its coefficient and count
    /// isotopes without one as 0.
    fn tracked_contents(&self) -> Option<Vec<(String, f64)>> {
        None
    }

    /// Material volume (cm³), for outputs that carry one.
    fn volume(&self) -> Option<f64> {
        None
    }
}

/// Parse `path` with the reader matching `source`.
pub fn open_burnup_output(source: BurnupSource, path: &Path) -> Result<Box<dyn BurnupOutput>, ReadError> {
    let output: Box<dyn BurnupOutput> = match source {
        BurnupSource::Origen => Box::new(OrigenOutput::from_path(path)?),
        BurnupSource::TransportSpectrum => Box::new(SerpentGammaSource::from_path(path)?),
        BurnupSource::TransportMaterial => Box::new(SerpentMaterial::from_path(path)?),
    };
    Ok(output)
}

pub(crate) fn read_text(path: &Path) -> Result<String, ReadError> {
    let text = std::fs::read_to_string(path).map_err(|e| ReadError::io(path, e))?;
    if text.trim().is_empty() {
        return Err(ReadError::Empty {
            path: path.to_path_buf(),
        });
    }
    Ok(text)
}
