//! Configuration validation.
//!
//! A [`PredictionConfig`] becomes usable only through [`configure`], which checks
//! it against the calibration library and fixes the evaluation plan. Every problem
//! is reported, not just the first one.

use log::debug;

use crate::domain::{BetaMode, BurnupSource, Channel, GammaMode, PredictionConfig, ResponseKind};
use crate::io::burnup::ReadError;
use crate::io::origen::column_selector;
use crate::predict::engine::{BetaPlan, ConfiguredPredictor, GammaPlan};
use crate::predict::{ConfigProblem, ConfigurationError, PredictionError};
use crate::response::{CalibrationLibrary, ResponseFunction};

/// Build a config from free-form strings, reporting every unknown name.
pub fn parse_config(
    fuel: &str,
    gamma: &str,
    beta: &str,
    source: &str,
    cooling_time: Option<&str>,
) -> Result<PredictionConfig, ConfigurationError> {
    let mut problems = Vec::new();
    let source = source
        .parse::<BurnupSource>()
        .map_err(|s| problems.push(ConfigProblem::UnknownSource(s)))
        .ok();
    let gamma = gamma
        .parse::<GammaMode>()
        .map_err(|s| problems.push(ConfigProblem::UnknownGammaMode(s)))
        .ok();
    let beta = beta
        .parse::<BetaMode>()
        .map_err(|s| problems.push(ConfigProblem::UnknownBetaMode(s)))
        .ok();

    match (source, gamma, beta) {
        (Some(source), Some(gamma), Some(beta)) if problems.is_empty() => {
            let mut config = PredictionConfig::new(fuel, gamma, beta, source);
            config.cooling_time = cooling_time.map(str::to_string);
            Ok(config)
        }
        _ => Err(ConfigurationError { problems }),
    }
}

/// Problems with the cooling-time selector, if the source needs one.
pub fn cooling_time_problem(config: &PredictionConfig) -> Option<ConfigProblem> {
    if config.source != BurnupSource::Origen {
        return None;
    }
    match column_selector(config.cooling_time.as_deref().unwrap_or("")) {
        Ok(_) => None,
        Err(ReadError::CoolingTimeTooLong(selector)) => Some(ConfigProblem::CoolingTimeTooLong(selector)),
        Err(_) => Some(ConfigProblem::MissingCoolingTime),
    }
}

fn lookup<'lib>(
    library: &'lib CalibrationLibrary,
    fuel: &str,
    channel: Channel,
    kind: ResponseKind,
    problems: &mut Vec<ConfigProblem>,
) -> Option<&'lib ResponseFunction> {
    let found = library.get(fuel, channel, kind);
    if found.is_none() {
        problems.push(ConfigProblem::MissingCalibration {
            fuel: fuel.to_string(),
            channel,
            kind,
        });
    }
    found
}

fn unsupported(config: &PredictionConfig, channel: Channel, mode: &'static str) -> PredictionError {
    PredictionError::UnsupportedModeForSource {
        burnup: config.source,
        channel,
        mode,
    }
}

fn gamma_plan<'lib>(
    library: &'lib CalibrationLibrary,
    config: &PredictionConfig,
    problems: &mut Vec<ConfigProblem>,
) -> GammaPlan<'lib> {
    let Some(kind) = config.gamma.required_kind() else {
        return GammaPlan::Disabled;
    };
    let Some(response) = lookup(library, &config.fuel, Channel::Gamma, kind, problems) else {
        return GammaPlan::Disabled;
    };

    use BurnupSource::*;
    match (config.source, response) {
        (Origen, ResponseFunction::Binned(h)) => GammaPlan::SpectrumBinned(h),
        (Origen, ResponseFunction::Sampled(c)) => GammaPlan::SpectrumSampled(c),
        (TransportSpectrum, ResponseFunction::Binned(h)) => GammaPlan::LinesBinned(h),
        (TransportSpectrum, ResponseFunction::Sampled(c)) => GammaPlan::LinesSampled(c),
        (Origen | TransportMaterial, ResponseFunction::Isotope(t)) => GammaPlan::Isotope(t),
        _ => GammaPlan::Unsupported(unsupported(config, Channel::Gamma, config.gamma.label())),
    }
}

fn beta_plan<'lib>(
    library: &'lib CalibrationLibrary,
    config: &PredictionConfig,
    problems: &mut Vec<ConfigProblem>,
) -> BetaPlan<'lib> {
    if config.beta == BetaMode::None {
        return BetaPlan::Disabled;
    }
    let Some(response) = lookup(library, &config.fuel, Channel::Beta, ResponseKind::Isotope, problems) else {
        return BetaPlan::Disabled;
    };
    match (config.source, response.as_isotope()) {
        (BurnupSource::TransportSpectrum, _) => BetaPlan::Skipped(unsupported(config, Channel::Beta, config.beta.label())),
        (_, Some(table)) => BetaPlan::Isotope(table),
        (_, None) => BetaPlan::Disabled,
    }
}

/// Validate `config` against `library` and resolve the calibration tables it uses.
pub fn configure(
    library: &CalibrationLibrary,
    config: PredictionConfig,
) -> Result<ConfiguredPredictor<'_>, ConfigurationError> {
    let mut problems = Vec::new();
    if let Some(p) = cooling_time_problem(&config) {
        problems.push(p);
    }
    let gamma = gamma_plan(library, &config, &mut problems);
    let beta = beta_plan(library, &config, &mut problems);

    if !problems.is_empty() {
        return Err(ConfigurationError { problems });
    }

    debug!(
        "configured {} prediction for {}: gamma {}, beta {}",
        config.source,
        config.fuel,
        gamma.describe(),
        beta.describe()
    );
    Ok(ConfiguredPredictor::from_plan(config, gamma, beta))
}
