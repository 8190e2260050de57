//! Command-line parsing for `clip`.
//!
//! Argument parsing and command dispatch stay separate from the prediction code;
//! `crate::app` turns these structs into library calls.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::app::pipeline::is_usable_volume;
use crate::domain::IsotopeBasis;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "clip", version, about = "Cherenkov light intensity prediction for spent nuclear fuel")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Predict the Cherenkov light intensity for one or more burnup outputs.
    Predict(PredictArgs),
    /// List the calibration tables found in the data directory.
    Library(LibraryArgs),
    /// Rebin a sampled response file onto bin edges and print per-bin averages.
    Rebin(RebinArgs),
    /// Print the transport-to-ORIGEN volume scale factor.
    Scale(ScaleArgs),
}

#[derive(Debug, Args, Clone)]
pub struct PredictArgs {
    /// Fuel design identifier; matches calibration file names.
    #[arg(short = 'f', long)]
    pub fuel: String,

    /// Burnup code that produced the input files: origen, transport-spectrum or transport-material.
    #[arg(short = 's', long)]
    pub source: String,

    /// Gamma mode: binned, sampled, isotope or none.
    #[arg(long, default_value = "binned")]
    pub gamma: String,

    /// Beta mode: isotope or none.
    #[arg(long, default_value = "isotope")]
    pub beta: String,

    /// Cooling-time column header, e.g. "10.0 y" (ORIGEN outputs only).
    #[arg(short = 't', long)]
    pub cooling_time: Option<String>,

    /// Coefficient set used from isotope response tables.
    #[arg(long, value_enum, default_value_t = IsotopeBasis::Mass)]
    pub basis: IsotopeBasis,

    /// Calibration library root (overrides CLIP_DATA_DIR).
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Scale results as transport results for this material volume (cm³).
    #[arg(long, conflicts_with = "auto_volume", value_parser = parse_volume)]
    pub volume: Option<f64>,

    /// Scale results by the volume found in each input file.
    #[arg(long)]
    pub auto_volume: bool,

    /// Export results to CSV.
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Export configuration, plan and results to JSON.
    #[arg(long)]
    pub json: Option<PathBuf>,

    /// Exit with an error if any prediction failed.
    #[arg(long)]
    pub strict: bool,

    /// Burnup output files.
    #[arg(required = true, value_name = "FILE")]
    pub files: Vec<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct LibraryArgs {
    #[arg(long)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct RebinArgs {
    /// Sampled response file (energy, value, uncertainty).
    #[arg(long, value_name = "FILE")]
    pub response: PathBuf,

    /// Ascending bin edges in MeV.
    #[arg(long, required = true, value_delimiter = ',')]
    pub edges: Vec<f64>,
}

#[derive(Debug, Args, Clone)]
pub struct ScaleArgs {
    /// Material volume in cm³.
    #[arg(long, value_parser = parse_volume)]
    pub volume: f64,
}

/// Material volume flag: a finite, positive number.
fn parse_volume(raw: &str) -> Result<f64, String> {
    let volume: f64 = raw.trim().parse().map_err(|_| format!("'{raw}' is not a number"))?;
    if is_usable_volume(volume) {
        Ok(volume)
    } else {
        Err(format!("volume must be positive and finite, got {raw}"))
    }
}
