//! Formatted terminal output.
//!
//! Formatting lives here so the prediction code stays free of presentation.

use crate::domain::PredictionConfig;
use crate::report::PredictionRow;
use crate::response::{CalibrationLibrary, ResponseFunction};

/// Header block describing the prediction run.
pub fn format_run_summary(config: &PredictionConfig, plan: &str, files: usize) -> String {
    let mut out = String::new();

    out.push_str("=== clip - Cherenkov light intensity prediction ===\n");
    out.push_str(&format!("Fuel: {}\n", config.fuel));
    out.push_str(&format!("Source: {}\n", config.source));
    if let Some(ct) = &config.cooling_time {
        out.push_str(&format!("Cooling time: {}\n", ct.trim()));
    }
    out.push_str(&format!(
        "Modes: gamma={} beta={} basis={:?}\n",
        config.gamma, config.beta, config.basis
    ));
    out.push_str(&format!("Plan: {plan}\n"));
    out.push_str(&format!("Files: {files}\n"));

    out
}

/// Prediction table, one line per file, followed by any diagnostics.
pub fn format_prediction_table(rows: &[PredictionRow]) -> String {
    let mut out = String::new();
    let width = rows.iter().map(|r| r.file.len()).max().unwrap_or(4).max(4);

    out.push_str(&format!(
        "{:<width$}  {:>14}  {:>14}  {:>8}  {:>8}  {:<7}\n",
        "file", "value", "uncertainty", "gamma", "beta", "status"
    ));
    out.push_str(&format!("{}\n", "-".repeat(width + 64)));
    for r in rows {
        out.push_str(&format!(
            "{:<width$}  {:>14.6e}  {:>14.6e}  {:>8}  {:>8}  {:<7}\n",
            r.file, r.value, r.uncertainty, r.gamma, r.beta, r.status
        ));
    }

    let notes: Vec<(&str, &String)> = rows
        .iter()
        .flat_map(|r| r.diagnostics.iter().map(move |d| (r.file.as_str(), d)))
        .collect();
    if !notes.is_empty() {
        out.push_str("\nDiagnostics:\n");
        for (file, note) in notes {
            out.push_str(&format!("- {file}: {note}\n"));
        }
    }

    out
}

/// Loaded calibration tables, grouped by fuel.
pub fn format_library(library: &CalibrationLibrary) -> String {
    let mut out = String::new();

    out.push_str("Calibration tables:\n");
    for c in library.summary() {
        out.push_str(&format!("  {:<8} {:<8} {:>4}\n", c.channel.label(), c.kind.label(), c.count));
    }

    for fuel in library.fuels() {
        out.push_str(&format!("\n{fuel}:\n"));
        for (key, response) in library.iter().filter(|(k, _)| k.fuel == fuel) {
            let detail = match response {
                ResponseFunction::Binned(h) => format!(
                    "{} bins [{:.4}, {:.4}] MeV",
                    h.bin_count(),
                    h.edges()[0],
                    h.edges()[h.bin_count()]
                ),
                ResponseFunction::Sampled(c) => format!(
                    "{} samples [{:.4}, {:.4}] MeV",
                    c.energies().len(),
                    c.min_energy(),
                    c.max_energy()
                ),
                ResponseFunction::Isotope(t) => format!("isotopes {}", t.isotopes().join(", ")),
            };
            out.push_str(&format!("  {:<6} {:<8} {detail}\n", key.channel.label(), key.kind.label()));
        }
    }

    out
}

/// Per-bin averages of a rebinned sampled response.
pub fn format_rebinned(edges: &[f64], values: &[f64], uncertainties: &[f64]) -> String {
    let mut out = String::new();

    out.push_str(&format!("{:>12}  {:>12}  {:>14}  {:>14}\n", "low", "high", "response", "uncertainty"));
    for (i, (v, u)) in values.iter().zip(uncertainties).enumerate() {
        out.push_str(&format!(
            "{:>12.5e}  {:>12.5e}  {:>14.6e}  {:>14.6e}\n",
            edges[i],
            edges[i + 1],
            v,
            u
        ));
    }

    out
}
