//! Shared domain types.
//!
//! These types are intentionally small value objects so they can be:
//!
//! - passed by reference between the kernels, rebinning and prediction code
//! - parsed from plain strings (`FromStr`), or from CLI flags (`clap::ValueEnum`) for the isotope basis
//! - exported to JSON/CSV alongside prediction results

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Which burnup/depletion calculation produced the input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BurnupSource {
    /// ORIGEN-like tabular output: binned gamma spectra and nuclide tables per cooling time.
    Origen,
    /// Transport-code gamma source file: a list of discrete emission lines.
    TransportSpectrum,
    /// Transport-code material composition file: per-nuclide densities.
    TransportMaterial,
}

impl BurnupSource {
    pub fn label(self) -> &'static str {
        match self {
            BurnupSource::Origen => "origen",
            BurnupSource::TransportSpectrum => "transport-spectrum",
            BurnupSource::TransportMaterial => "transport-material",
        }
    }
}

/// How the gamma contribution is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GammaMode {
    Binned,
    Sampled,
    Isotope,
    None,
}

impl GammaMode {
    pub fn label(self) -> &'static str {
        match self {
            GammaMode::Binned => "binned",
            GammaMode::Sampled => "sampled",
            GammaMode::Isotope => "isotope",
            GammaMode::None => "none",
        }
    }

    /// Response kind that must be loaded for this mode, if any.
    pub fn required_kind(self) -> Option<ResponseKind> {
        match self {
            GammaMode::Binned => Some(ResponseKind::Binned),
            GammaMode::Sampled => Some(ResponseKind::Sampled),
            GammaMode::Isotope => Some(ResponseKind::Isotope),
            GammaMode::None => None,
        }
    }
}

/// How the beta contribution is computed.
///
/// No burnup output carries a beta spectrum, so only the isotope response is usable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BetaMode {
    Isotope,
    None,
}

impl BetaMode {
    pub fn label(self) -> &'static str {
        match self {
            BetaMode::Isotope => "isotope",
            BetaMode::None => "none",
        }
    }
}

/// Coefficient set used from an isotope response table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum IsotopeBasis {
    /// Light per unit activity (Bq).
    Activity,
    /// Light per unit mass (g).
    #[default]
    Mass,
}

/// Radiation channel a response function was characterized for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Gamma,
    Beta,
}

impl Channel {
    pub const ALL: [Channel; 2] = [Channel::Gamma, Channel::Beta];

    pub fn label(self) -> &'static str {
        match self {
            Channel::Gamma => "gamma",
            Channel::Beta => "beta",
        }
    }
}

/// Encoding of a response function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseKind {
    Binned,
    Sampled,
    Isotope,
}

impl ResponseKind {
    pub const ALL: [ResponseKind; 3] = [ResponseKind::Binned, ResponseKind::Sampled, ResponseKind::Isotope];

    pub fn label(self) -> &'static str {
        match self {
            ResponseKind::Binned => "binned",
            ResponseKind::Sampled => "sampled",
            ResponseKind::Isotope => "isotope",
        }
    }
}

impl fmt::Display for BurnupSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for GammaMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for BetaMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for ResponseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for BurnupSource {
    type Err = String;

    /// Accepts the kebab-case labels and the historical tool names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "origen" => Ok(BurnupSource::Origen),
            "transport-spectrum" | "serpent_gamma" => Ok(BurnupSource::TransportSpectrum),
            "transport-material" | "serpent_bumat" => Ok(BurnupSource::TransportMaterial),
            _ => Err(s.to_string()),
        }
    }
}

impl FromStr for GammaMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "binned" => Ok(GammaMode::Binned),
            "sampled" => Ok(GammaMode::Sampled),
            "isotope" => Ok(GammaMode::Isotope),
            "none" => Ok(GammaMode::None),
            _ => Err(s.to_string()),
        }
    }
}

impl FromStr for BetaMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "isotope" => Ok(BetaMode::Isotope),
            "none" => Ok(BetaMode::None),
            _ => Err(s.to_string()),
        }
    }
}

/// One discrete emission line of a spectrum.
///
/// Lines are unordered and may repeat an energy; each one is looked up independently.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpectralLine {
    /// Line energy (MeV).
    pub energy: f64,
    /// Emission rate (photons/s).
    pub rate: f64,
    /// Absolute uncertainty of `rate`. Transport outputs do not provide one, so readers set 0.
    pub rate_uncertainty: f64,
}

impl SpectralLine {
    pub fn new(energy: f64, rate: f64) -> Self {
        Self {
            energy,
            rate,
            rate_uncertainty: 0.0,
        }
    }
}

/// A predicted light intensity and its 1-sigma uncertainty.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Prediction {
    pub value: f64,
    /// Always non-negative.
    pub uncertainty: f64,
}

impl Prediction {
    /// The legacy "nothing computed" sentinel.
    pub const ZERO: Prediction = Prediction {
        value: 0.0,
        uncertainty: 0.0,
    };

    pub fn new(value: f64, uncertainty: f64) -> Self {
        Self { value, uncertainty }
    }

    /// Sum of two independent contributions; uncertainties add in quadrature.
    pub fn combine(self, other: Prediction) -> Prediction {
        Prediction {
            value: self.value + other.value,
            uncertainty: (self.uncertainty.powi(2) + other.uncertainty.powi(2)).sqrt(),
        }
    }

    /// Multiply value and uncertainty by a normalization factor.
    pub fn scaled(self, factor: f64) -> Prediction {
        Prediction {
            value: self.value * factor,
            uncertainty: self.uncertainty * factor.abs(),
        }
    }

    pub fn is_sentinel(&self) -> bool {
        self.value == 0.0 && self.uncertainty == 0.0
    }
}

/// A full prediction request as understood by the orchestrator.
///
/// This is derived from CLI flags (plus defaults) or built directly by library callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionConfig {
    /// Fuel design identifier, e.g. `PWR17x17`; matches calibration file stems.
    pub fuel: String,
    pub gamma: GammaMode,
    pub beta: BetaMode,
    pub source: BurnupSource,
    /// Cooling-time column header, e.g. `10.0 y`. Required for ORIGEN-like sources.
    pub cooling_time: Option<String>,
    pub basis: IsotopeBasis,
}

impl PredictionConfig {
    pub fn new(fuel: impl Into<String>, gamma: GammaMode, beta: BetaMode, source: BurnupSource) -> Self {
        Self {
            fuel: fuel.into(),
            gamma,
            beta,
            source,
            cooling_time: None,
            basis: IsotopeBasis::default(),
        }
    }

    pub fn with_cooling_time(mut self, cooling_time: impl Into<String>) -> Self {
        self.cooling_time = Some(cooling_time.into());
        self
    }

    pub fn with_basis(mut self, basis: IsotopeBasis) -> Self {
        self.basis = basis;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combine_adds_in_quadrature() {
        let p = Prediction::new(1.0, 3.0).combine(Prediction::new(2.0, 4.0));
        assert!((p.value - 3.0).abs() < 1e-12);
        assert!((p.uncertainty - 5.0).abs() < 1e-12);
    }

    #[test]
    fn historical_source_names_parse() {
        assert_eq!("ORIGEN".parse::<BurnupSource>(), Ok(BurnupSource::Origen));
        assert_eq!("Serpent_gamma".parse::<BurnupSource>(), Ok(BurnupSource::TransportSpectrum));
        assert_eq!("Serpent_bumat".parse::<BurnupSource>(), Ok(BurnupSource::TransportMaterial));
        assert!("MCNP".parse::<BurnupSource>().is_err());
    }

    #[test]
    fn beta_mode_rejects_spectral_responses() {
        assert!("binned".parse::<BetaMode>().is_err());
        assert_eq!("none".parse::<BetaMode>(), Ok(BetaMode::None));
    }
}
