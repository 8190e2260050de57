//! Readers for calibration response files.
//!
//! All three layouts are tab-separated text with one header line. Files exported
//! from spreadsheets may use a decimal comma, so `,` is read as `.`.
//!
//! ```text
//! binned:   low    high    value    uncertainty
//! sampled:  energy value   uncertainty
//! isotope:  id     activity activity_unc mass mass_unc
//! ```

use std::fs::File;
use std::path::Path;

use csv::StringRecord;

use crate::io::burnup::ReadError;
use crate::response::{BinnedHistogram, IsotopeCoefficient, IsotopeTable, SampledCurve};

fn tab_reader(path: &Path) -> Result<csv::Reader<File>, ReadError> {
    let file = File::open(path).map_err(|e| ReadError::io(path, e))?;
    Ok(csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(file))
}

/// Data records with their 1-based file line numbers.
fn records(path: &Path) -> Result<Vec<(usize, StringRecord)>, ReadError> {
    let mut reader = tab_reader(path)?;
    let mut out = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let line = idx + 2;
        let record = result.map_err(|e| ReadError::Malformed {
            line,
            message: e.to_string(),
        })?;
        if record.iter().all(|f| f.is_empty()) {
            continue;
        }
        out.push((line, record));
    }
    Ok(out)
}

pub(crate) fn parse_number(field: &str, line: usize) -> Result<f64, ReadError> {
    field.trim().replace(',', ".").parse::<f64>().map_err(|_| ReadError::Malformed {
        line,
        message: format!("'{field}' is not a number"),
    })
}

fn require_columns(record: &StringRecord, n: usize, line: usize) -> Result<(), ReadError> {
    if record.len() < n {
        return Err(ReadError::Malformed {
            line,
            message: format!("expected {n} tab-separated columns, found {}", record.len()),
        });
    }
    Ok(())
}

/// Read a binned response: bin edges are the lower edges plus the last upper edge.
pub fn read_binned_response(path: &Path) -> Result<BinnedHistogram, ReadError> {
    let rows = records(path)?;
    if rows.is_empty() {
        return Err(ReadError::Empty {
            path: path.to_path_buf(),
        });
    }

    let mut edges = Vec::with_capacity(rows.len() + 1);
    let mut values = Vec::with_capacity(rows.len());
    let mut uncertainties = Vec::with_capacity(rows.len());
    let mut last_high = 0.0;
    for (line, record) in &rows {
        require_columns(record, 4, *line)?;
        edges.push(parse_number(&record[0], *line)?);
        last_high = parse_number(&record[1], *line)?;
        values.push(parse_number(&record[2], *line)?);
        uncertainties.push(parse_number(&record[3], *line)?);
    }
    edges.push(last_high);

    Ok(BinnedHistogram::new(edges, values, uncertainties)?)
}

pub fn read_sampled_response(path: &Path) -> Result<SampledCurve, ReadError> {
    let rows = records(path)?;
    if rows.is_empty() {
        return Err(ReadError::Empty {
            path: path.to_path_buf(),
        });
    }

    let mut energies = Vec::with_capacity(rows.len());
    let mut values = Vec::with_capacity(rows.len());
    let mut uncertainties = Vec::with_capacity(rows.len());
    for (line, record) in &rows {
        require_columns(record, 3, *line)?;
        energies.push(parse_number(&record[0], *line)?);
        values.push(parse_number(&record[1], *line)?);
        uncertainties.push(parse_number(&record[2], *line)?);
    }

    Ok(SampledCurve::new(energies, values, uncertainties)?)
}

/// Read an isotope response. Short rows (5 characters or fewer) are padding and skipped.
pub fn read_isotope_response(path: &Path) -> Result<IsotopeTable, ReadError> {
    let rows = records(path)?;

    let mut entries = Vec::with_capacity(rows.len());
    for (line, record) in &rows {
        let raw_len: usize = record.iter().map(str::len).sum::<usize>() + record.len().saturating_sub(1);
        if raw_len <= 5 {
            continue;
        }
        require_columns(record, 5, *line)?;
        entries.push(IsotopeCoefficient {
            isotope: record[0].to_string(),
            activity: parse_number(&record[1], *line)?,
            activity_uncertainty: parse_number(&record[2], *line)?,
            mass: parse_number(&record[3], *line)?,
            mass_uncertainty: parse_number(&record[4], *line)?,
        });
    }
    if entries.is_empty() {
        return Err(ReadError::Empty {
            path: path.to_path_buf(),
        });
    }

    Ok(IsotopeTable::new(entries)?)
}
