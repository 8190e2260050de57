//! Transport-code (Serpent) output readers.
//!
//! - [`SerpentGammaSource`]: gamma source listing, seven numeric columns per line
//!   `<n> <photons/decay> <total rate> <x> <energy> <relative intensity> <x>`
//! - [`SerpentMaterial`]: burned material file (`.bumat`) with a
//!   `mat <name> <density> vol <volume>` header and `<ZAI>.09c <atoms/b-cm>` rows

use std::collections::HashMap;
use std::path::Path;

use log::{debug, warn};

use crate::data::{atom_density_to_mass, convert_isotope_name, isotope_mass, NameFormat};
use crate::domain::SpectralLine;
use crate::io::burnup::{read_text, BurnupOutput, ReadError};

const GAMMA_RECORD_WIDTH: usize = 7;
const NUCLIDE_SUFFIX: &str = ".09c";

#[derive(Debug, Clone, PartialEq)]
pub struct SerpentGammaSource {
    lines: Vec<SpectralLine>,
}

fn is_numeric_token(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| c.is_ascii_digit() || matches!(c, '.' | 'E' | '+' | '-'))
}

/// Leading run of numeric characters, so `1.0E+00];` reads as `1.0E+00`.
fn numeric_prefix(token: &str) -> &str {
    let end = token
        .find(|c: char| !(c.is_ascii_digit() || matches!(c, '.' | 'E' | '+' | '-')))
        .unwrap_or(token.len());
    &token[..end]
}

fn is_gamma_record(window: &[&str]) -> bool {
    window[0].chars().all(|c| c.is_ascii_digit())
        && !window[0].is_empty()
        && window[1..GAMMA_RECORD_WIDTH - 1].iter().all(|t| is_numeric_token(t))
        && !numeric_prefix(window[GAMMA_RECORD_WIDTH - 1]).is_empty()
}

impl SerpentGammaSource {
    pub fn from_path(path: &Path) -> Result<Self, ReadError> {
        Self::parse(&read_text(path)?)
    }

    pub fn parse(text: &str) -> Result<Self, ReadError> {
        let tokens: Vec<&str> = text.split_whitespace().collect();
        let mut lines = Vec::new();

        let mut i = 0;
        while i + GAMMA_RECORD_WIDTH <= tokens.len() {
            let window = &tokens[i..i + GAMMA_RECORD_WIDTH];
            if !is_gamma_record(window) {
                i += 1;
                continue;
            }
            let values: Vec<f64> = window[1..]
                .iter()
                .map(|t| numeric_prefix(t).parse::<f64>())
                .collect::<Result<_, _>>()
                .map_err(|e| ReadError::Malformed {
                    line: i,
                    message: format!("gamma record '{}': {e}", window.join(" ")),
                })?;

            let (photons_per_decay, total_rate, energy, intensity) = (values[0], values[1], values[3], values[4]);
            if photons_per_decay == 0.0 {
                warn!("skipping gamma line at {energy} MeV with zero photons per decay");
            } else {
                lines.push(SpectralLine::new(energy, total_rate / photons_per_decay * intensity));
            }
            i += GAMMA_RECORD_WIDTH;
        }

        debug!("read {} gamma lines", lines.len());
        Ok(Self { lines })
    }

    pub fn lines(&self) -> &[SpectralLine] {
        &self.lines
    }
}

impl BurnupOutput for SerpentGammaSource {
    fn gamma_lines(&self) -> Result<Vec<SpectralLine>, ReadError> {
        Ok(self.lines.clone())
    }
}

/// Burned material composition, converted to mass densities (g/cm³).
#[derive(Debug, Clone, PartialEq)]
pub struct SerpentMaterial {
    name: String,
    volume: f64,
    contents: HashMap<String, f64>,
}

impl SerpentMaterial {
    pub fn from_path(path: &Path) -> Result<Self, ReadError> {
        Self::parse(&read_text(path)?)
    }

    pub fn parse(text: &str) -> Result<Self, ReadError> {
        let tokens: Vec<&str> = text.split_whitespace().collect();

        let header = tokens
            .windows(5)
            .position(|w| w[0] == "mat" && w[3] == "vol")
            .ok_or_else(|| ReadError::Malformed {
                line: 0,
                message: "no 'mat <name> <density> vol <volume>' header".to_string(),
            })?;
        let name = tokens[header + 1].to_string();
        let volume = tokens[header + 4].parse::<f64>().map_err(|_| ReadError::Malformed {
            line: 0,
            message: format!("material volume '{}' is not a number", tokens[header + 4]),
        })?;

        let mut contents = HashMap::new();
        for pair in tokens.windows(2) {
            let Some(zai) = pair[0].strip_suffix(NUCLIDE_SUFFIX) else {
                continue;
            };
            let Some(isotope) = convert_isotope_name(zai, NameFormat::Origen) else {
                continue;
            };
            let Some(mass) = isotope_mass(zai, NameFormat::Serpent) else {
                continue;
            };
            let concentration = pair[1].parse::<f64>().map_err(|_| ReadError::Malformed {
                line: 0,
                message: format!("concentration '{}' of {zai} is not a number", pair[1]),
            })?;
            contents.insert(isotope.to_string(), atom_density_to_mass(concentration, mass));
        }

        debug!("material {name}: volume {volume} cm3, {} tracked isotopes", contents.len());
        Ok(Self { name, volume, contents })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content(&self, isotope: &str) -> Option<f64> {
        self.contents.get(isotope).copied()
    }
}

impl BurnupOutput for SerpentMaterial {
    /// Material files hold a single state, so the cooling time is ignored.
    fn isotope_contents(&self, _cooling_time: Option<&str>, isotopes: &[String]) -> Result<Vec<f64>, ReadError> {
        Ok(isotopes
            .iter()
            .map(|id| {
                self.content(id).unwrap_or_else(|| {
                    warn!("no content found for {id} in material {}", self.name);
                    0.0
                })
            })
            .collect())
    }

    fn tracked_contents(&self) -> Option<Vec<(String, f64)>> {
        let mut contents: Vec<(String, f64)> = self.contents.iter().map(|(k, v)| (k.clone(), *v)).collect();
        contents.sort_by(|a, b| a.0.cmp(&b.0));
        Some(contents)
    }

    fn volume(&self) -> Option<f64> {
        Some(self.volume)
    }
}
