use thiserror::Error;

/// Failures of the numeric kernels.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MathError {
    #[error("Paired arrays differ in length: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("Interpolation needs at least {min} samples, got {actual}")]
    TooFewSamples { min: usize, actual: usize },

    #[error("Sample energies must be strictly increasing (index {index})")]
    NotAscending { index: usize },

    #[error("Query {query} is outside the sampled domain [{min}, {max}]")]
    OutOfDomain { query: f64, min: f64, max: f64 },

    #[error("Spline system is singular")]
    SingularSystem,

    #[error("Integrand is not finite on [{a}, {b}]")]
    NonFiniteIntegrand { a: f64, b: f64 },
}
