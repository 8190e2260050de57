//! Library load, configuration and batch prediction over files on disk.

use std::fs;
use std::path::{Path, PathBuf};

use cherenkov_predict::app::pipeline::{VolumeScale, predict_batch};
use cherenkov_predict::data::scale_serpent_to_origen;
use cherenkov_predict::domain::{BetaMode, BurnupSource, Channel, GammaMode, PredictionConfig, ResponseKind};
use cherenkov_predict::predict::{ChannelOutcome, ConfigProblem, PredictionError, configure};
use cherenkov_predict::report::build_rows;
use cherenkov_predict::response::CalibrationLibrary;

const BINNED_GAMMA: &str = "low\thigh\tvalue\tuncertainty
0.01\t0.05\t1\t0
0.05\t0.1\t2\t0
0.1\t0.2\t3\t0
";

// Decimal commas, as exported by spreadsheets.
const SAMPLED_GAMMA: &str = "energy\tvalue\tuncertainty
0,1\t1,0\t0
0,4\t4,0\t0
0,7\t7,0\t0
1,0\t10,0\t0
";

const ISOTOPE_GAMMA: &str = "isotope\tactivity\tactivity_unc\tmass\tmass_unc
Cs137\t1\t0\t1\t0
";

const ISOTOPE_BETA: &str = "isotope\tactivity\tactivity_unc\tmass\tmass_unc
Cs137\t1\t0\t1\t0
Sr90\t1\t0\t2\t0
";

const ORIGEN: &str = "   gamma spectra, photons/sec/basis

                         energy boundaries
  group   boundaries (mev)       1.0 y    10.0 y
1 1.00e-02 - 5.00e-02 1.000e+10 2.000e+09
2 5.00e-02 - 1.00e-01 3.000e+10 4.000e+09
3 1.00e-01 - 2.00e-01 5.000e+10 6.000e+09
   totals 9.0e+10 1.2e+10

               charge      1.0 y    10.0 y
cs137         1.000E+02 1.412E+03
sr 90         5.000E+01 6.000E+02
   total      1.510E+02 2.014E+03
";

const SERPENT_GAMMA: &str = "
src = [
  1  9.4400E-01  1.7967E+10  0.0000E+00  6.61660E-01  9.4400E-01  1.0E-02];
";

const BUMAT: &str = "
mat  fuel1  -1.04E+01  vol  5.08958E-01 burn 1
  55137.09c  5.66693E-05
  38090.09c  1.00000E-05
";

fn write(path: &Path, text: &str) -> PathBuf {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, text).unwrap();
    path.to_path_buf()
}

fn data_dir(root: &Path) -> PathBuf {
    let data = root.join("Data");
    write(&data.join("Binned_gamma_response/PWR.txt"), BINNED_GAMMA);
    write(&data.join("Sampled_gamma_response/PWR.txt"), SAMPLED_GAMMA);
    write(&data.join("Isotope_gamma_response/PWR.txt"), ISOTOPE_GAMMA);
    write(&data.join("Isotope_beta_response/PWR.txt"), ISOTOPE_BETA);
    // Empty table: skipped with a warning, not fatal.
    write(&data.join("Binned_gamma_response/BROKEN.txt"), "");
    // Not a .txt file: ignored.
    write(&data.join("Binned_gamma_response/notes.md"), "# notes");
    data
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * b.abs().max(1.0)
}

#[test]
fn library_discovers_tables_and_skips_bad_files() {
    let dir = tempfile::tempdir().unwrap();
    let library = CalibrationLibrary::load(&data_dir(dir.path())).unwrap();

    assert_eq!(library.len(), 4);
    assert!(library.contains("PWR", Channel::Gamma, ResponseKind::Binned));
    assert!(library.contains("PWR", Channel::Beta, ResponseKind::Isotope));
    assert!(!library.contains("BROKEN", Channel::Gamma, ResponseKind::Binned));
    assert_eq!(library.fuels(), vec!["PWR".to_string()]);
}

#[test]
fn missing_data_dir_is_a_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = CalibrationLibrary::load(&dir.path().join("nope")).unwrap_err();
    assert_eq!(err.exit_code(), 2);
}

#[test]
fn origen_binned_gamma_plus_isotope_beta() {
    let dir = tempfile::tempdir().unwrap();
    let library = CalibrationLibrary::load(&data_dir(dir.path())).unwrap();
    let input = write(&dir.path().join("case1.out"), ORIGEN);

    let config = PredictionConfig::new("PWR", GammaMode::Binned, BetaMode::Isotope, BurnupSource::Origen)
        .with_cooling_time("10.0 y");
    let predictor = configure(&library, config).unwrap();
    let items = predict_batch(&predictor, &[input]);

    let p = items[0].outcome.result().unwrap();
    // gamma: 2e9*1 + 4e9*2 + 6e9*3; beta (mass basis): 1412*1 + 600*2
    assert!(close(p.value, 2.8e10 + 2612.0));
    assert_eq!(p.uncertainty, 0.0);
    assert_eq!(items[0].volume, None);
}

#[test]
fn origen_sampled_gamma_is_rebinned_onto_the_spectrum() {
    let dir = tempfile::tempdir().unwrap();
    let library = CalibrationLibrary::load(&data_dir(dir.path())).unwrap();
    let input = write(&dir.path().join("case1.out"), ORIGEN);

    let config = PredictionConfig::new("PWR", GammaMode::Sampled, BetaMode::None, BurnupSource::Origen)
        .with_cooling_time("10.0 y");
    let predictor = configure(&library, config).unwrap();
    let outcome = &predict_batch(&predictor, &[input])[0].outcome;

    // Response 10*E, so only the part of each bin inside [0.1, 1.0] counts:
    // bins 1 and 2 lie below the response and contribute 0; bin 3 averages 1.5.
    let p = outcome.result().unwrap();
    assert!(close(p.value, 6.0e9 * 1.5));
}

#[test]
fn transport_spectrum_skips_beta_but_still_succeeds() {
    let dir = tempfile::tempdir().unwrap();
    let library = CalibrationLibrary::load(&data_dir(dir.path())).unwrap();
    let input = write(&dir.path().join("src.inp"), SERPENT_GAMMA);

    let config = PredictionConfig::new("PWR", GammaMode::Sampled, BetaMode::Isotope, BurnupSource::TransportSpectrum);
    let predictor = configure(&library, config).unwrap();
    let outcome = &predict_batch(&predictor, &[input])[0].outcome;

    assert!(matches!(outcome.beta, ChannelOutcome::Skipped(_)));
    let p = outcome.result().unwrap();
    assert!(close(p.value, 1.7967e10 * 6.6166));
}

#[test]
fn transport_material_with_volume_scaling() {
    let dir = tempfile::tempdir().unwrap();
    let library = CalibrationLibrary::load(&data_dir(dir.path())).unwrap();
    let input = write(&dir.path().join("fuel.bumat"), BUMAT);

    let config = PredictionConfig::new("PWR", GammaMode::Isotope, BetaMode::None, BurnupSource::TransportMaterial);
    let predictor = configure(&library, config).unwrap();
    let items = predict_batch(&predictor, &[input]);

    let cs = 5.66693e-5 * 1e24 * 136.907090 / 6.022141e23;
    let p = items[0].outcome.result().unwrap();
    assert!(close(p.value, cs));
    assert_eq!(items[0].volume, Some(0.508958));

    let rows = build_rows(&items, VolumeScale::FromInput);
    assert!(close(rows[0].value, cs * scale_serpent_to_origen(0.508958)));
    assert_eq!(rows[0].status, "ok");
}

#[test]
fn unsupported_gamma_mode_aborts_every_file() {
    let dir = tempfile::tempdir().unwrap();
    let library = CalibrationLibrary::load(&data_dir(dir.path())).unwrap();
    let input = write(&dir.path().join("fuel.bumat"), BUMAT);

    let config = PredictionConfig::new("PWR", GammaMode::Binned, BetaMode::Isotope, BurnupSource::TransportMaterial);
    let predictor = configure(&library, config).unwrap();
    let items = predict_batch(&predictor, &[input]);

    assert!(matches!(
        items[0].outcome.abort,
        Some(PredictionError::UnsupportedModeForSource { .. })
    ));
    assert!(items[0].outcome.legacy().is_sentinel());
    assert_eq!(build_rows(&items, VolumeScale::None)[0].status, "aborted");
}

#[test]
fn unreadable_files_do_not_stop_the_batch() {
    let dir = tempfile::tempdir().unwrap();
    let library = CalibrationLibrary::load(&data_dir(dir.path())).unwrap();
    let good = write(&dir.path().join("case1.out"), ORIGEN);
    let missing = dir.path().join("missing.out");
    let empty = write(&dir.path().join("empty.out"), "");

    let config = PredictionConfig::new("PWR", GammaMode::Binned, BetaMode::None, BurnupSource::Origen)
        .with_cooling_time("10.0 y");
    let predictor = configure(&library, config).unwrap();
    let items = predict_batch(&predictor, &[good.clone(), missing.clone(), empty.clone()]);

    assert_eq!(
        items.iter().map(|i| i.path.clone()).collect::<Vec<_>>(),
        vec![good, missing, empty]
    );
    assert!(items[0].outcome.is_ok());
    for item in &items[1..] {
        assert!(matches!(
            item.outcome.abort,
            Some(PredictionError::EmptyOrUnreadableInput(_))
        ));
    }
}

#[test]
fn configuration_reports_missing_tables() {
    let dir = tempfile::tempdir().unwrap();
    let library = CalibrationLibrary::load(&data_dir(dir.path())).unwrap();

    let config = PredictionConfig::new("BWR", GammaMode::Binned, BetaMode::Isotope, BurnupSource::Origen);
    let err = configure(&library, config).unwrap_err();
    assert_eq!(err.problems.len(), 3);
    assert_eq!(err.problems[0], ConfigProblem::MissingCoolingTime);
}
