//! Reporting: per-file prediction rows and formatted terminal output.

use serde::Serialize;

use crate::app::pipeline::{BatchItem, VolumeScale};

pub mod format;

pub use format::*;

/// One reported prediction, after volume scaling.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionRow {
    pub file: String,
    /// Legacy value: failed channels add 0, aborted predictions are 0.
    pub value: f64,
    pub uncertainty: f64,
    pub scale: f64,
    pub gamma: &'static str,
    pub beta: &'static str,
    /// `ok`, `failed` or `aborted`.
    pub status: &'static str,
    pub diagnostics: Vec<String>,
}

pub fn build_rows(items: &[BatchItem], scale: VolumeScale) -> Vec<PredictionRow> {
    items
        .iter()
        .map(|item| {
            let factor = scale.factor_for(item);
            let legacy = item.outcome.legacy().scaled(factor);
            let status = if item.outcome.abort.is_some() {
                "aborted"
            } else if item.outcome.is_ok() {
                "ok"
            } else {
                "failed"
            };
            PredictionRow {
                file: item.path.display().to_string(),
                value: legacy.value,
                uncertainty: legacy.uncertainty,
                scale: factor,
                gamma: item.outcome.gamma.label(),
                beta: item.outcome.beta.label(),
                status,
                diagnostics: item.outcome.diagnostics(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::domain::Prediction;
    use crate::predict::{ChannelOutcome, PredictionError, PredictionOutcome};

    fn item(outcome: PredictionOutcome, volume: Option<f64>) -> BatchItem {
        BatchItem {
            path: PathBuf::from("fuel.bumat"),
            outcome,
            volume,
        }
    }

    #[test]
    fn rows_scale_by_input_volume() {
        let outcome = PredictionOutcome {
            gamma: ChannelOutcome::Computed(Prediction::new(2.0, 0.5)),
            beta: ChannelOutcome::Disabled,
            abort: None,
        };
        let rows = build_rows(&[item(outcome, Some(1.0))], VolumeScale::FromInput);
        let factor = crate::data::scale_serpent_to_origen(1.0);
        assert_eq!(rows[0].status, "ok");
        assert!((rows[0].value - 2.0 * factor).abs() < 1e-6);
        assert!((rows[0].uncertainty - 0.5 * factor).abs() < 1e-6);
        assert_eq!(rows[0].gamma, "ok");
        assert_eq!(rows[0].beta, "disabled");
    }

    #[test]
    fn aborted_rows_are_zero() {
        let outcome = PredictionOutcome::aborted(PredictionError::EmptyOrUnreadableInput("empty".to_string()));
        let rows = build_rows(&[item(outcome, None)], VolumeScale::Fixed(2.0));
        assert_eq!(rows[0].status, "aborted");
        assert_eq!(rows[0].value, 0.0);
        assert_eq!(rows[0].diagnostics.len(), 1);
    }

    #[test]
    fn zero_volume_keeps_the_failure_sentinel() {
        let ok = PredictionOutcome {
            gamma: ChannelOutcome::Computed(Prediction::new(2.0, 0.5)),
            beta: ChannelOutcome::Disabled,
            abort: None,
        };
        let aborted = PredictionOutcome::aborted(PredictionError::EmptyOrUnreadableInput("empty".to_string()));
        let items = [item(ok, Some(0.0)), item(aborted, Some(0.0))];

        for scale in [VolumeScale::Fixed(0.0), VolumeScale::Fixed(-1.0), VolumeScale::FromInput] {
            let rows = build_rows(&items, scale);
            assert_eq!((rows[0].value, rows[0].uncertainty, rows[0].scale), (2.0, 0.5, 1.0));
            assert_eq!((rows[1].value, rows[1].uncertainty), (0.0, 0.0));
        }
    }
}
