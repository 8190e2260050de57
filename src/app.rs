//! Top-level application orchestration.
//!
//! `src/main.rs` only installs logging; this module is the "real main" that:
//! - parses CLI arguments
//! - loads settings and the calibration library
//! - validates the prediction configuration
//! - runs the batch and prints/exports the results

use clap::Parser;
use log::info;

use crate::cli::{Command, LibraryArgs, PredictArgs, RebinArgs, ScaleArgs};
use crate::domain::PredictionConfig;
use crate::error::AppError;
use crate::predict::{ConfigurationError, parse_config};
use crate::response::CalibrationLibrary;

pub mod pipeline;
pub mod settings;

use pipeline::VolumeScale;
use settings::Settings;

/// Entry point for the `clip` binary.
pub fn run() -> Result<(), AppError> {
    let cli = crate::cli::Cli::parse();

    match cli.command {
        Command::Predict(args) => handle_predict(args),
        Command::Library(args) => handle_library(args),
        Command::Rebin(args) => handle_rebin(args),
        Command::Scale(args) => handle_scale(args),
    }
}

fn handle_predict(args: PredictArgs) -> Result<(), AppError> {
    let settings = Settings::from_env().with_data_dir(args.data_dir.clone());
    let library = CalibrationLibrary::load(&settings.data_dir)?;

    let config = prediction_config_from_args(&args)?;
    let predictor = crate::predict::configure(&library, config)?;
    let plan = predictor.plan_summary();
    info!("plan: {plan}");

    let items = pipeline::predict_batch(&predictor, &args.files);
    let rows = crate::report::build_rows(&items, volume_scale_from_args(&args));

    println!(
        "{}",
        crate::report::format_run_summary(predictor.config(), &plan, args.files.len())
    );
    println!("{}", crate::report::format_prediction_table(&rows));

    if let Some(path) = &args.export {
        crate::io::export::write_predictions_csv(path, &rows)?;
    }
    if let Some(path) = &args.json {
        crate::io::export::write_predictions_json(path, predictor.config(), &plan, &rows)?;
    }

    if args.strict {
        if let Some(first) = items.iter().find_map(|i| i.outcome.result().err()) {
            let failed = items.iter().filter(|i| !i.outcome.is_ok()).count();
            return Err(AppError::new(
                3,
                format!("{failed} of {} predictions failed; first: {first}", items.len()),
            ));
        }
    }

    Ok(())
}

fn handle_library(args: LibraryArgs) -> Result<(), AppError> {
    let settings = Settings::from_env().with_data_dir(args.data_dir);
    let library = CalibrationLibrary::load(&settings.data_dir)?;
    println!("Data directory: {}", settings.data_dir.display());
    println!("{}", crate::report::format_library(&library));
    Ok(())
}

fn handle_rebin(args: RebinArgs) -> Result<(), AppError> {
    if args.edges.len() < 2 || args.edges.windows(2).any(|w| !(w[0] < w[1])) {
        return Err(AppError::new(2, "--edges needs at least two strictly increasing values"));
    }
    let curve = crate::io::responses::read_sampled_response(&args.response)?;
    let (values, uncertainties) = crate::rebin::rebin_sampled(&curve, &args.edges)
        .map_err(|e| AppError::new(4, format!("Rebinning failed: {e}")))?;
    println!("{}", crate::report::format_rebinned(&args.edges, &values, &uncertainties));
    Ok(())
}

fn handle_scale(args: ScaleArgs) -> Result<(), AppError> {
    println!("{:.10e}", crate::data::scale_serpent_to_origen(args.volume));
    Ok(())
}

/// Mode names are parsed together so every unknown one is reported at once.
pub fn prediction_config_from_args(args: &PredictArgs) -> Result<PredictionConfig, ConfigurationError> {
    let config = parse_config(
        &args.fuel,
        &args.gamma,
        &args.beta,
        &args.source,
        args.cooling_time.as_deref(),
    )?;
    Ok(config.with_basis(args.basis))
}

pub fn volume_scale_from_args(args: &PredictArgs) -> VolumeScale {
    match (args.volume, args.auto_volume) {
        (Some(volume), _) => VolumeScale::Fixed(volume),
        (None, true) => VolumeScale::FromInput,
        (None, false) => VolumeScale::None,
    }
}
