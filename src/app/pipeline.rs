//! Batch prediction over many burnup outputs.
//!
//! Each file is read and predicted independently, so the batch runs in parallel
//! with rayon. The predictor and the calibration library are only borrowed.

use std::path::{Path, PathBuf};

use log::{info, warn};
use rayon::prelude::*;

use crate::data::scale_serpent_to_origen;
use crate::io::burnup::open_burnup_output;
use crate::predict::{ConfiguredPredictor, PredictionError, PredictionOutcome};

/// Result for one input file.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchItem {
    pub path: PathBuf,
    pub outcome: PredictionOutcome,
    /// Material volume reported by the input, if any.
    pub volume: Option<f64>,
}

/// Normalization applied to results before reporting.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum VolumeScale {
    #[default]
    None,
    /// Scale every result as a transport result for this volume (cm³).
    Fixed(f64),
    /// Use the volume found in each input.
    FromInput,
}

impl VolumeScale {
    /// Multiplier for one result. Volumes that are not finite and positive leave the result unscaled.
    pub fn factor_for(&self, item: &BatchItem) -> f64 {
        let volume = match self {
            VolumeScale::None => return 1.0,
            VolumeScale::Fixed(volume) => Some(*volume),
            VolumeScale::FromInput => item.volume,
        };
        match volume {
            Some(v) if is_usable_volume(v) => scale_serpent_to_origen(v),
            Some(v) => {
                warn!("{}: volume {v} is not positive; result left unscaled", item.path.display());
                1.0
            }
            None => {
                warn!("{} carries no volume; result left unscaled", item.path.display());
                1.0
            }
        }
    }
}

pub fn is_usable_volume(volume: f64) -> bool {
    volume.is_finite() && volume > 0.0
}

/// Predict one file. Unreadable files give an aborted outcome.
pub fn predict_file(predictor: &ConfiguredPredictor<'_>, path: &Path) -> BatchItem {
    match open_burnup_output(predictor.config().source, path) {
        Ok(output) => BatchItem {
            path: path.to_path_buf(),
            outcome: predictor.predict(output.as_ref()),
            volume: output.volume(),
        },
        Err(err) => {
            warn!("cannot read {}: {err}", path.display());
            BatchItem {
                path: path.to_path_buf(),
                outcome: PredictionOutcome::aborted(PredictionError::from(err)),
                volume: None,
            }
        }
    }
}

/// Predict every file in parallel; results keep the input order.
pub fn predict_batch(predictor: &ConfiguredPredictor<'_>, paths: &[PathBuf]) -> Vec<BatchItem> {
    let items: Vec<BatchItem> = paths.par_iter().map(|p| predict_file(predictor, p)).collect();
    let failed = items.iter().filter(|i| !i.outcome.is_ok()).count();
    info!("predicted {} files ({failed} with errors)", items.len());
    items
}
