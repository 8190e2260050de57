//! Export prediction results to CSV or JSON.
//!
//! The CSV is meant for spreadsheets; the JSON also records the configuration and
//! the evaluation plan so a result can be traced back to the tables that made it.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::PredictionConfig;
use crate::error::AppError;
use crate::report::PredictionRow;

const CSV_HEADER: [&str; 8] = ["file", "value", "uncertainty", "scale", "gamma", "beta", "status", "diagnostics"];

/// CSV view of a row; diagnostics are joined into one field.
#[derive(Debug, Serialize)]
struct CsvRecord<'a> {
    file: &'a str,
    value: f64,
    uncertainty: f64,
    scale: f64,
    gamma: &'a str,
    beta: &'a str,
    status: &'a str,
    diagnostics: String,
}

/// Write one CSV row per input file.
pub fn write_predictions_csv(path: &Path, rows: &[PredictionRow]) -> Result<(), AppError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export CSV '{}': {e}", path.display())))?;

    writer
        .write_record(CSV_HEADER)
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV header: {e}")))?;

    for r in rows {
        let record = CsvRecord {
            file: &r.file,
            value: r.value,
            uncertainty: r.uncertainty,
            scale: r.scale,
            gamma: r.gamma,
            beta: r.beta,
            status: r.status,
            diagnostics: r.diagnostics.join("; "),
        };
        writer
            .serialize(record)
            .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV '{}': {e}", path.display())))?;
    Ok(())
}

#[derive(Debug, Serialize)]
struct PredictionExport<'a> {
    tool: &'static str,
    version: &'static str,
    created_at: DateTime<Utc>,
    config: &'a PredictionConfig,
    plan: &'a str,
    results: &'a [PredictionRow],
}

/// Write the configuration, plan and results as pretty-printed JSON.
pub fn write_predictions_json(
    path: &Path,
    config: &PredictionConfig,
    plan: &str,
    rows: &[PredictionRow],
) -> Result<(), AppError> {
    let export = PredictionExport {
        tool: "clip",
        version: env!("CARGO_PKG_VERSION"),
        created_at: Utc::now(),
        config,
        plan,
        results: rows,
    };

    let json = serde_json::to_string_pretty(&export)
        .map_err(|e| AppError::new(4, format!("Failed to serialize predictions: {e}")))?;
    std::fs::write(path, json)
        .map_err(|e| AppError::new(2, format!("Failed to write export JSON '{}': {e}", path.display())))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BetaMode, BurnupSource, GammaMode};

    fn row() -> PredictionRow {
        PredictionRow {
            file: "dir,with comma/out.txt".to_string(),
            value: 12.5,
            uncertainty: 0.5,
            scale: 1.0,
            gamma: "ok",
            beta: "disabled",
            status: "ok",
            diagnostics: Vec::new(),
        }
    }

    #[test]
    fn csv_quotes_fields_with_commas() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        write_predictions_csv(&path, &[row()]).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("file,value,uncertainty,scale,gamma,beta,status,diagnostics"));
        assert_eq!(lines.next(), Some("\"dir,with comma/out.txt\",12.5,0.5,1.0,ok,disabled,ok,"));
    }

    #[test]
    fn csv_round_trips_diagnostics_with_quotes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let mut failed = row();
        failed.status = "failed";
        failed.diagnostics = vec!["gamma failed: \"10.0 y\" not found".to_string(), "beta skipped".to_string()];
        write_predictions_csv(&path, &[failed]).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let header: Vec<&str> = reader.headers().unwrap().iter().collect();
        assert_eq!(header, CSV_HEADER.to_vec());
        let records: Vec<csv::StringRecord> = reader.records().collect::<Result<_, _>>().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(&records[0][0], "dir,with comma/out.txt");
        assert_eq!(&records[0][7], "gamma failed: \"10.0 y\" not found; beta skipped");
    }

    #[test]
    fn csv_header_is_written_without_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.csv");
        write_predictions_csv(&path, &[]).unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "file,value,uncertainty,scale,gamma,beta,status,diagnostics\n"
        );
    }

    #[test]
    fn json_records_config_and_results() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        let config = PredictionConfig::new("PWR", GammaMode::Binned, BetaMode::None, BurnupSource::Origen)
            .with_cooling_time("10.0 y");
        write_predictions_json(&path, &config, "gamma binned spectrum", &[row()]).unwrap();

        let value: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["tool"], "clip");
        assert_eq!(value["config"]["source"], "origen");
        assert_eq!(value["config"]["cooling_time"], "10.0 y");
        assert_eq!(value["results"][0]["value"], 12.5);
    }
}
