//! Evaluation of a configured prediction against one burnup output.
//!
//! The plan (which formula, which rebinning step, which calibration table) is
//! fixed when the predictor is configured. `predict` only reads from the plan and
//! the input, so repeated calls give identical results and a predictor can be
//! shared between threads.

use log::{debug, warn};

use crate::domain::{Channel, Prediction, PredictionConfig};
use crate::io::burnup::BurnupOutput;
use crate::predict::formulas::{predict_binned, predict_isotope, predict_isotope_keyed, predict_sampled};
use crate::predict::{ChannelOutcome, PredictionError, PredictionOutcome};
use crate::rebin::{lines_to_bins, rebin_sampled};
use crate::response::{BinnedHistogram, IsotopeTable, SampledCurve};

/// How the gamma channel is evaluated.
#[derive(Debug, Clone)]
pub(crate) enum GammaPlan<'lib> {
    Disabled,
    /// Binned spectrum from the output, combined with a binned response of identical binning.
    SpectrumBinned(&'lib BinnedHistogram),
    /// Binned spectrum from the output; the sampled response is rebinned onto the spectrum's bins.
    SpectrumSampled(&'lib SampledCurve),
    /// Emission lines rebinned onto the response's bins.
    LinesBinned(&'lib BinnedHistogram),
    /// Emission lines looked up directly on the sampled response.
    LinesSampled(&'lib SampledCurve),
    Isotope(&'lib IsotopeTable),
    /// The source cannot serve this mode; the whole prediction is aborted.
    Unsupported(PredictionError),
}

#[derive(Debug, Clone)]
pub(crate) enum BetaPlan<'lib> {
    Disabled,
    Isotope(&'lib IsotopeTable),
    /// The source has no beta data; the channel contributes nothing.
    Skipped(PredictionError),
}

impl GammaPlan<'_> {
    pub(crate) fn describe(&self) -> &'static str {
        match self {
            GammaPlan::Disabled => "disabled",
            GammaPlan::SpectrumBinned(_) => "binned spectrum x binned response",
            GammaPlan::SpectrumSampled(_) => "binned spectrum x rebinned sampled response",
            GammaPlan::LinesBinned(_) => "rebinned lines x binned response",
            GammaPlan::LinesSampled(_) => "lines x interpolated sampled response",
            GammaPlan::Isotope(_) => "isotope contents x isotope response",
            GammaPlan::Unsupported(_) => "unsupported",
        }
    }
}

impl BetaPlan<'_> {
    pub(crate) fn describe(&self) -> &'static str {
        match self {
            BetaPlan::Disabled => "disabled",
            BetaPlan::Isotope(_) => "isotope contents x isotope response",
            BetaPlan::Skipped(_) => "skipped",
        }
    }
}

/// A validated prediction, bound to the calibration library it was checked against.
#[derive(Debug, Clone)]
pub struct ConfiguredPredictor<'lib> {
    config: PredictionConfig,
    gamma: GammaPlan<'lib>,
    beta: BetaPlan<'lib>,
}

impl<'lib> ConfiguredPredictor<'lib> {
    pub(crate) fn from_plan(config: PredictionConfig, gamma: GammaPlan<'lib>, beta: BetaPlan<'lib>) -> Self {
        Self { config, gamma, beta }
    }

    pub fn config(&self) -> &PredictionConfig {
        &self.config
    }

    /// One-line description of the evaluation plan.
    pub fn plan_summary(&self) -> String {
        format!("gamma: {}; beta: {}", self.gamma.describe(), self.beta.describe())
    }

    /// Predict the light intensity for one burnup output.
    pub fn predict(&self, input: &dyn BurnupOutput) -> PredictionOutcome {
        if let GammaPlan::Unsupported(err) = &self.gamma {
            warn!("{err}");
            return PredictionOutcome::aborted(err.clone());
        }

        let gamma = match &self.gamma {
            GammaPlan::Disabled | GammaPlan::Unsupported(_) => ChannelOutcome::Disabled,
            plan => channel_outcome(Channel::Gamma, self.predict_gamma(plan, input)),
        };
        let beta = match &self.beta {
            BetaPlan::Disabled => ChannelOutcome::Disabled,
            BetaPlan::Skipped(err) => {
                warn!("{err}; beta contribution ignored");
                ChannelOutcome::Skipped(err.clone())
            }
            BetaPlan::Isotope(table) => channel_outcome(Channel::Beta, self.predict_contents(table, input)),
        };

        PredictionOutcome {
            gamma,
            beta,
            abort: None,
        }
    }

    fn cooling_time(&self) -> Option<&str> {
        self.config.cooling_time.as_deref().map(str::trim)
    }

    fn spectrum(&self, input: &dyn BurnupOutput) -> Result<BinnedHistogram, PredictionError> {
        let cooling_time = self.cooling_time().ok_or_else(|| {
            PredictionError::ConfigurationInvalid("binned spectra need a cooling time".to_string())
        })?;
        Ok(input.gamma_spectrum(cooling_time)?)
    }

    fn predict_gamma(&self, plan: &GammaPlan<'_>, input: &dyn BurnupOutput) -> Result<Prediction, PredictionError> {
        match plan {
            GammaPlan::SpectrumBinned(response) => predict_binned(&self.spectrum(input)?, response),
            GammaPlan::SpectrumSampled(curve) => {
                let spectrum = self.spectrum(input)?;
                let (values, uncertainties) = rebin_sampled(curve, spectrum.edges())?;
                let response = BinnedHistogram::new(spectrum.edges().to_vec(), values, uncertainties)
                    .map_err(|e| PredictionError::EmptyOrUnreadableInput(e.to_string()))?;
                predict_binned(&spectrum, &response)
            }
            GammaPlan::LinesBinned(response) => {
                let lines = input.gamma_lines()?;
                if lines.is_empty() {
                    return Err(PredictionError::EmptyOrUnreadableInput("no gamma lines".to_string()));
                }
                let counts = lines_to_bins(&lines, response.edges());
                debug!("rebinned {} lines onto {} bins", lines.len(), counts.len());
                let spectrum = BinnedHistogram::without_uncertainties(response.edges().to_vec(), counts)
                    .map_err(|e| PredictionError::EmptyOrUnreadableInput(e.to_string()))?;
                predict_binned(&spectrum, response)
            }
            GammaPlan::LinesSampled(curve) => {
                let lines = input.gamma_lines()?;
                if lines.is_empty() {
                    return Err(PredictionError::EmptyOrUnreadableInput("no gamma lines".to_string()));
                }
                predict_sampled(&lines, curve)
            }
            GammaPlan::Isotope(table) => self.predict_contents(table, input),
            GammaPlan::Disabled | GammaPlan::Unsupported(_) => Ok(Prediction::ZERO),
        }
    }

    /// Burnup outputs carry no content uncertainties, so only the table's count.
    fn predict_contents(&self, table: &IsotopeTable, input: &dyn BurnupOutput) -> Result<Prediction, PredictionError> {
        if let Some(tracked) = input.tracked_contents() {
            return Ok(predict_isotope_keyed(&tracked, table, self.config.basis));
        }
        let isotopes = table.isotopes();
        let contents = input.isotope_contents(self.cooling_time(), &isotopes)?;
        let no_uncertainty = vec![0.0; contents.len()];
        predict_isotope(&contents, &no_uncertainty, table, self.config.basis)
    }
}

fn channel_outcome(channel: Channel, result: Result<Prediction, PredictionError>) -> ChannelOutcome {
    match result {
        Ok(p) => ChannelOutcome::Computed(p),
        Err(err) => {
            warn!("{channel} prediction failed: {err}");
            ChannelOutcome::Failed(err)
        }
    }
}
