//! Input/output helpers.
//!
//! - burnup output readers (`burnup`, `origen`, `serpent`)
//! - calibration table readers (`responses`)
//! - result exports (CSV/JSON) (`export`)

pub mod burnup;
pub mod export;
pub mod origen;
pub mod responses;
pub mod serpent;

pub use burnup::{BurnupOutput, ReadError, open_burnup_output};
pub use export::*;
pub use responses::*;
