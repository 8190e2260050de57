//! Tagged prediction results.
//!
//! A prediction has two channels. Each one is either switched off, computed,
//! skipped (not available for this source; contributes nothing but is not an
//! error) or failed. Independently, a whole prediction can be aborted when the
//! gamma mode cannot be served by the burnup source at all.
//!
//! [`PredictionOutcome::legacy`] collapses all of this into the historical
//! `(value, uncertainty)` pair where `(0, 0)` doubles as the failure signal.

use crate::domain::{Channel, Prediction};
use crate::predict::PredictionError;

#[derive(Debug, Clone, PartialEq)]
pub enum ChannelOutcome {
    Disabled,
    Computed(Prediction),
    Skipped(PredictionError),
    Failed(PredictionError),
}

impl ChannelOutcome {
    /// What this channel adds to the total.
    pub fn contribution(&self) -> Prediction {
        match self {
            ChannelOutcome::Computed(p) => *p,
            _ => Prediction::ZERO,
        }
    }

    pub fn error(&self) -> Option<&PredictionError> {
        match self {
            ChannelOutcome::Skipped(e) | ChannelOutcome::Failed(e) => Some(e),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ChannelOutcome::Disabled => "disabled",
            ChannelOutcome::Computed(_) => "ok",
            ChannelOutcome::Skipped(_) => "skipped",
            ChannelOutcome::Failed(_) => "failed",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PredictionOutcome {
    pub gamma: ChannelOutcome,
    pub beta: ChannelOutcome,
    /// Set when no channel could be evaluated at all.
    pub abort: Option<PredictionError>,
}

impl PredictionOutcome {
    pub fn aborted(err: PredictionError) -> Self {
        Self {
            gamma: ChannelOutcome::Disabled,
            beta: ChannelOutcome::Disabled,
            abort: Some(err),
        }
    }

    pub fn channel(&self, channel: Channel) -> &ChannelOutcome {
        match channel {
            Channel::Gamma => &self.gamma,
            Channel::Beta => &self.beta,
        }
    }

    /// Gamma + beta, or the first error. Skipped channels are not errors.
    pub fn result(&self) -> Result<Prediction, PredictionError> {
        if let Some(err) = &self.abort {
            return Err(err.clone());
        }
        for outcome in [&self.gamma, &self.beta] {
            if let ChannelOutcome::Failed(err) = outcome {
                return Err(err.clone());
            }
        }
        Ok(self.gamma.contribution().combine(self.beta.contribution()))
    }

    /// Historical arithmetic: failed or skipped channels add `(0, 0)`, an aborted
    /// prediction is `(0, 0)`.
    pub fn legacy(&self) -> Prediction {
        if self.abort.is_some() {
            return Prediction::ZERO;
        }
        self.gamma.contribution().combine(self.beta.contribution())
    }

    /// Advisory messages, one per error.
    pub fn diagnostics(&self) -> Vec<String> {
        let mut out = Vec::new();
        if let Some(err) = &self.abort {
            out.push(format!("prediction aborted: {err}"));
        }
        for channel in Channel::ALL {
            let outcome = self.channel(channel);
            if let Some(err) = outcome.error() {
                out.push(format!("{channel} {}: {err}", outcome.label()));
            }
        }
        out
    }

    pub fn is_ok(&self) -> bool {
        self.result().is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mismatch() -> PredictionError {
        PredictionError::BinStructureMismatch { expected: 3, found: 4 }
    }

    #[test]
    fn failed_channel_adds_zero_in_legacy_but_errors_in_result() {
        let o = PredictionOutcome {
            gamma: ChannelOutcome::Failed(mismatch()),
            beta: ChannelOutcome::Computed(Prediction::new(5.0, 1.0)),
            abort: None,
        };
        assert_eq!(o.legacy(), Prediction::new(5.0, 1.0));
        assert_eq!(o.result(), Err(mismatch()));
        assert_eq!(o.diagnostics().len(), 1);
    }

    #[test]
    fn skipped_channel_is_not_an_error() {
        let skipped = PredictionError::EmptyOrUnreadableInput("no beta data".to_string());
        let o = PredictionOutcome {
            gamma: ChannelOutcome::Computed(Prediction::new(3.0, 4.0)),
            beta: ChannelOutcome::Skipped(skipped),
            abort: None,
        };
        assert_eq!(o.result(), Ok(Prediction::new(3.0, 4.0)));
        assert!(o.diagnostics()[0].starts_with("beta skipped"));
    }

    #[test]
    fn abort_is_zero_sentinel() {
        let o = PredictionOutcome::aborted(mismatch());
        assert!(o.legacy().is_sentinel());
        assert!(!o.is_ok());
    }

    #[test]
    fn channels_add_in_quadrature() {
        let o = PredictionOutcome {
            gamma: ChannelOutcome::Computed(Prediction::new(1.0, 3.0)),
            beta: ChannelOutcome::Computed(Prediction::new(2.0, 4.0)),
            abort: None,
        };
        assert_eq!(o.result(), Ok(Prediction::new(3.0, 5.0)));
    }
}
