use std::fmt;

use thiserror::Error;

use crate::domain::{BurnupSource, Channel, ResponseKind};
use crate::io::burnup::ReadError;
use crate::math::MathError;

/// Why a prediction, or one of its channels, produced no value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PredictionError {
    #[error("Configuration is not usable: {0}")]
    ConfigurationInvalid(String),

    #[error("Input bin structure ({found} edges) does not match the calibration ({expected} edges)")]
    BinStructureMismatch { expected: usize, found: usize },

    #[error("{channel} mode '{mode}' is not supported for {burnup} outputs")]
    UnsupportedModeForSource {
        burnup: BurnupSource,
        channel: Channel,
        mode: &'static str,
    },

    #[error("Input is empty or unreadable: {0}")]
    EmptyOrUnreadableInput(String),

    #[error(transparent)]
    Numeric(#[from] MathError),
}

impl From<ReadError> for PredictionError {
    fn from(err: ReadError) -> Self {
        PredictionError::EmptyOrUnreadableInput(err.to_string())
    }
}

impl PredictionError {
    /// Short machine-readable tag.
    pub fn tag(&self) -> &'static str {
        match self {
            PredictionError::ConfigurationInvalid(_) => "configuration-invalid",
            PredictionError::BinStructureMismatch { .. } => "bin-structure-mismatch",
            PredictionError::UnsupportedModeForSource { .. } => "unsupported-mode-for-source",
            PredictionError::EmptyOrUnreadableInput(_) => "empty-or-unreadable-input",
            PredictionError::Numeric(_) => "numeric",
        }
    }
}

/// One reason a [`crate::domain::PredictionConfig`] cannot be used.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigProblem {
    #[error("unknown burnup source '{0}' (expected origen, transport-spectrum or transport-material)")]
    UnknownSource(String),

    #[error("unknown gamma mode '{0}' (expected binned, sampled, isotope or none)")]
    UnknownGammaMode(String),

    #[error("unknown beta mode '{0}' (expected isotope or none)")]
    UnknownBetaMode(String),

    #[error("a cooling time is required for origen outputs")]
    MissingCoolingTime,

    #[error("cooling time '{0}' must be shorter than {width} characters", width = crate::io::origen::COLUMN_WIDTH)]
    CoolingTimeTooLong(String),

    #[error("no {kind} {channel} response loaded for fuel '{fuel}'")]
    MissingCalibration {
        fuel: String,
        channel: Channel,
        kind: ResponseKind,
    },
}

/// Every problem found while validating a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigurationError {
    pub problems: Vec<ConfigProblem>,
}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid prediction configuration:")?;
        for p in &self.problems {
            write!(f, "\n- {p}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ConfigurationError {}

impl From<ConfigurationError> for PredictionError {
    fn from(err: ConfigurationError) -> Self {
        let joined: Vec<String> = err.problems.iter().map(|p| p.to_string()).collect();
        PredictionError::ConfigurationInvalid(joined.join("; "))
    }
}
