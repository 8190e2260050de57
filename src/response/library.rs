//! Read-only store of calibration responses, keyed by fuel, channel and encoding.
//!
//! On disk the library is a directory with up to six sub-directories:
//!
//! ```text
//! <root>/Binned_gamma_response/PWR17x17.txt
//! <root>/Sampled_gamma_response/PWR17x17.txt
//! <root>/Isotope_gamma_response/PWR17x17.txt
//! <root>/Binned_beta_response/...
//! <root>/Sampled_beta_response/...
//! <root>/Isotope_beta_response/...
//! ```
//!
//! The file stem is the fuel identifier. The library is built once and then only
//! borrowed, so it can be shared by concurrent predictions without locking.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use log::{debug, info, warn};

use crate::domain::{Channel, ResponseKind};
use crate::error::AppError;
use crate::io::responses::{read_binned_response, read_isotope_response, read_sampled_response};
use crate::response::ResponseFunction;

/// Library lookup key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalibrationKey {
    pub fuel: String,
    pub channel: Channel,
    pub kind: ResponseKind,
}

/// Count of loaded tables for one channel/encoding pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryCount {
    pub channel: Channel,
    pub kind: ResponseKind,
    pub count: usize,
}

#[derive(Debug, Clone, Default)]
pub struct CalibrationLibrary {
    tables: BTreeMap<CalibrationKey, ResponseFunction>,
}

/// Sub-directory holding responses of one channel/encoding pair.
pub fn subdirectory_name(channel: Channel, kind: ResponseKind) -> &'static str {
    match (kind, channel) {
        (ResponseKind::Binned, Channel::Gamma) => "Binned_gamma_response",
        (ResponseKind::Binned, Channel::Beta) => "Binned_beta_response",
        (ResponseKind::Sampled, Channel::Gamma) => "Sampled_gamma_response",
        (ResponseKind::Sampled, Channel::Beta) => "Sampled_beta_response",
        (ResponseKind::Isotope, Channel::Gamma) => "Isotope_gamma_response",
        (ResponseKind::Isotope, Channel::Beta) => "Isotope_beta_response",
    }
}

impl CalibrationLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discover and load every response file under `root`.
    ///
    /// Missing sub-directories are fine; unreadable files are skipped with a warning.
    pub fn load(root: &Path) -> Result<Self, AppError> {
        if !root.is_dir() {
            return Err(AppError::new(
                2,
                format!("Calibration data directory '{}' does not exist.", root.display()),
            ));
        }

        let mut library = Self::new();
        for channel in Channel::ALL {
            for kind in ResponseKind::ALL {
                let dir = root.join(subdirectory_name(channel, kind));
                if !dir.is_dir() {
                    debug!("no {} directory under {}", subdirectory_name(channel, kind), root.display());
                    continue;
                }
                library.load_directory(&dir, channel, kind)?;
            }
        }

        for c in library.summary() {
            info!("loaded {} {} {} responses", c.count, c.kind, c.channel);
        }
        Ok(library)
    }

    fn load_directory(&mut self, dir: &Path, channel: Channel, kind: ResponseKind) -> Result<(), AppError> {
        let entries = fs::read_dir(dir)
            .map_err(|e| AppError::new(2, format!("Failed to list '{}': {e}", dir.display())))?;

        let mut paths: Vec<_> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "txt"))
            .collect();
        paths.sort();

        for path in paths {
            let Some(fuel) = path.file_stem().and_then(|s| s.to_str()).map(str::to_string) else {
                continue;
            };
            let loaded = match kind {
                ResponseKind::Binned => read_binned_response(&path).map(ResponseFunction::Binned),
                ResponseKind::Sampled => read_sampled_response(&path).map(ResponseFunction::Sampled),
                ResponseKind::Isotope => read_isotope_response(&path).map(ResponseFunction::Isotope),
            };
            match loaded {
                Ok(response) => self.insert(fuel, channel, response),
                Err(e) => warn!("skipping {} {} response '{}': {e}", kind, channel, path.display()),
            }
        }
        Ok(())
    }

    /// Add or replace one table.
    pub fn insert(&mut self, fuel: impl Into<String>, channel: Channel, response: ResponseFunction) {
        let key = CalibrationKey {
            fuel: fuel.into(),
            channel,
            kind: response.kind(),
        };
        self.tables.insert(key, response);
    }

    pub fn get(&self, fuel: &str, channel: Channel, kind: ResponseKind) -> Option<&ResponseFunction> {
        self.tables.get(&CalibrationKey {
            fuel: fuel.to_string(),
            channel,
            kind,
        })
    }

    pub fn contains(&self, fuel: &str, channel: Channel, kind: ResponseKind) -> bool {
        self.get(fuel, channel, kind).is_some()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// All loaded tables in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&CalibrationKey, &ResponseFunction)> {
        self.tables.iter()
    }

    /// Distinct fuel identifiers, sorted.
    pub fn fuels(&self) -> Vec<String> {
        let mut fuels: Vec<String> = self.tables.keys().map(|k| k.fuel.clone()).collect();
        fuels.dedup();
        fuels
    }

    /// Table counts per channel and encoding.
    pub fn summary(&self) -> Vec<LibraryCount> {
        let mut out = Vec::new();
        for channel in Channel::ALL {
            for kind in ResponseKind::ALL {
                let count = self
                    .tables
                    .keys()
                    .filter(|k| k.channel == channel && k.kind == kind)
                    .count();
                out.push(LibraryCount { channel, kind, count });
            }
        }
        out
    }
}
