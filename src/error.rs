//! Application-level error carrying a process exit code.
//!
//! Exit codes:
//! - 2: bad input or configuration
//! - 3: no usable data (every prediction failed)
//! - 4: computation failure

use crate::io::burnup::ReadError;
use crate::predict::{ConfigurationError, PredictionError};

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

impl From<ConfigurationError> for AppError {
    fn from(err: ConfigurationError) -> Self {
        AppError::new(2, err.to_string())
    }
}

impl From<ReadError> for AppError {
    fn from(err: ReadError) -> Self {
        AppError::new(2, err.to_string())
    }
}

impl From<PredictionError> for AppError {
    fn from(err: PredictionError) -> Self {
        let code = match err {
            PredictionError::Numeric(_) => 4,
            PredictionError::EmptyOrUnreadableInput(_) => 3,
            _ => 2,
        };
        AppError::new(code, err.to_string())
    }
}
