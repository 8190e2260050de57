//! Numeric kernels: uncertainty propagation, cubic interpolation and quadrature.

pub mod errors;
pub mod quadrature;
pub mod spline;
pub mod uncertainty;

pub use errors::*;
pub use quadrature::*;
pub use spline::*;
pub use uncertainty::*;
