//! ORIGEN-like tabular output reader.
//!
//! Two kinds of tables are used, both with one column per cooling time and
//! right-aligned, 10-character-wide column headers such as `    10.0 y`:
//!
//! - gamma spectra: a block introduced by `gamma spectra, photons/sec/basis` and
//!   closed by a `totals` row. Line 3 of the block is the header, data rows follow
//!   as `<n> <low> - <high> <count> <count> ...`.
//! - nuclide tables: a header starting with `charge` or `initial`, rows labeled
//!   in the first 13 characters (`cs137`, `sr 90`, `h  3`), closed by a `total` row.
//!
//! When several tables match a cooling time, the last one in the file wins.

use std::path::Path;

use log::{debug, warn};

use crate::io::burnup::{read_text, BurnupOutput, ReadError};
use crate::response::BinnedHistogram;

const SPECTRUM_MARKER: &str = "gamma spectra, photons/sec/basis";
const SPECTRUM_END: &str = "totals";
const SPECTRUM_HEADER_OFFSET: usize = 23;
const NUCLIDE_HEADERS: [&str; 2] = ["               charge", "              initial "];
const NUCLIDE_HEADER_OFFSET: usize = 22;
const NUCLIDE_TABLE_END: &str = "   total ";
const NUCLIDE_LABEL_WIDTH: usize = 13;
/// Width of a cooling-time column header.
pub const COLUMN_WIDTH: usize = 10;

/// A parsed-on-demand ORIGEN output. The text is kept and tables are located per request.
#[derive(Debug, Clone)]
pub struct OrigenOutput {
    text: String,
}

impl OrigenOutput {
    pub fn from_path(path: &Path) -> Result<Self, ReadError> {
        Ok(Self::from_text(read_text(path)?))
    }

    pub fn from_text(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Validate a cooling-time selector and right-align it to the column width.
pub fn column_selector(cooling_time: &str) -> Result<String, ReadError> {
    let trimmed = cooling_time.trim();
    if trimmed.is_empty() {
        return Err(ReadError::MissingCoolingTime);
    }
    if trimmed.chars().count() >= COLUMN_WIDTH {
        return Err(ReadError::CoolingTimeTooLong(trimmed.to_string()));
    }
    Ok(format!("{:>width$}", trimmed, width = COLUMN_WIDTH))
}

/// Search name of an isotope in nuclide tables: `Cs137` -> `cs137`, `Sr90` -> `sr 90`, `H3` -> `h  3`.
pub fn origen_label(isotope: &str) -> String {
    let letters: String = isotope.chars().take_while(|c| c.is_ascii_alphabetic()).collect();
    let digits: String = isotope[letters.len()..]
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    match digits.len() {
        1 => format!("{}  {}", letters.to_lowercase(), digits),
        2 => format!("{} {}", letters.to_lowercase(), digits),
        _ => isotope.to_lowercase(),
    }
}

fn column_index(header: &str, offset: usize, selector: &str) -> Option<usize> {
    let columns = header.get(offset..)?;
    columns.find(selector).map(|pos| pos.div_ceil(COLUMN_WIDTH))
}

fn spectrum_blocks(text: &str) -> Vec<&str> {
    let mut blocks = Vec::new();
    let mut rest = text;
    while let Some(start) = rest.find(SPECTRUM_MARKER) {
        let after = &rest[start + SPECTRUM_MARKER.len()..];
        let Some(end) = after.find(SPECTRUM_END) else {
            break;
        };
        blocks.push(after[..end].trim_end());
        rest = &after[end + SPECTRUM_END.len()..];
    }
    blocks
}

fn parse_spectrum_block(block: &str, column: usize) -> Result<BinnedHistogram, ReadError> {
    let lines: Vec<&str> = block.lines().collect();
    let mut edges = Vec::with_capacity(lines.len().saturating_sub(3));
    let mut counts = Vec::with_capacity(lines.len().saturating_sub(4));
    let mut last_high = None;

    for (i, line) in lines.iter().enumerate().skip(4) {
        let tokens: Vec<&str> = line.trim().split(' ').collect();
        let field = |idx: usize| -> Result<f64, ReadError> {
            let raw = tokens.get(idx).ok_or_else(|| ReadError::Malformed {
                line: i,
                message: format!("spectrum row has no column {idx}"),
            })?;
            raw.parse::<f64>().map_err(|_| ReadError::Malformed {
                line: i,
                message: format!("'{raw}' is not a number"),
            })
        };
        counts.push(field(column + 3)?);
        edges.push(field(1)?);
        last_high = Some(field(3)?);
    }

    let Some(high) = last_high else {
        return Err(ReadError::Malformed {
            line: lines.len(),
            message: "gamma spectrum block has no rows".to_string(),
        });
    };
    edges.push(high);
    Ok(BinnedHistogram::without_uncertainties(edges, counts)?)
}

impl BurnupOutput for OrigenOutput {
    fn gamma_spectrum(&self, cooling_time: &str) -> Result<BinnedHistogram, ReadError> {
        let selector = column_selector(cooling_time)?;

        let mut found = None;
        for block in spectrum_blocks(&self.text) {
            let Some(header) = block.lines().nth(3) else {
                continue;
            };
            if let Some(column) = column_index(header, SPECTRUM_HEADER_OFFSET, &selector) {
                debug!("gamma spectrum for '{}' in column {column}", selector.trim());
                found = Some(parse_spectrum_block(block, column)?);
            }
        }

        found.ok_or_else(|| ReadError::CoolingTimeNotFound(cooling_time.trim().to_string()))
    }

    fn isotope_contents(&self, cooling_time: Option<&str>, isotopes: &[String]) -> Result<Vec<f64>, ReadError> {
        let selector = column_selector(cooling_time.ok_or(ReadError::MissingCoolingTime)?)?;
        let labels: Vec<String> = isotopes.iter().map(|i| origen_label(i)).collect();
        let mut contents = vec![0.0; isotopes.len()];

        let mut column = None;
        for (n, line) in self.text.lines().enumerate() {
            if NUCLIDE_HEADERS.iter().any(|h| line.starts_with(h)) {
                column = column_index(line, NUCLIDE_HEADER_OFFSET, &selector).map(|c| c + 1);
                continue;
            }
            let Some(col) = column else {
                continue;
            };
            if line.starts_with(NUCLIDE_TABLE_END) {
                column = None;
                continue;
            }

            let label = line.get(..NUCLIDE_LABEL_WIDTH).unwrap_or(line).trim();
            let Some(slot) = labels.iter().position(|l| l == label) else {
                continue;
            };
            let raw = line
                .get(NUCLIDE_LABEL_WIDTH..)
                .and_then(|rest| rest.split(' ').nth(col))
                .ok_or_else(|| ReadError::Malformed {
                    line: n + 1,
                    message: format!("nuclide row for '{label}' has no column {col}"),
                })?;
            contents[slot] = raw.parse::<f64>().map_err(|_| ReadError::Malformed {
                line: n + 1,
                message: format!("'{raw}' is not a number"),
            })?;
        }

        for (isotope, value) in isotopes.iter().zip(&contents) {
            if *value == 0.0 {
                warn!("no content found for {isotope} in ORIGEN output; check the isotope name");
            }
        }
        Ok(contents)
    }
}
