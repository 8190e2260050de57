//! Energy lines to histogram.
//!
//! A line of energy `e` and rate `r` in bin `k` adds `r * e / mid_k`, where `mid_k`
//! is the bin's midpoint energy. Lines within 3% of a bin width from an interior
//! edge are split half and half with the neighbouring bin, each half corrected
//! with its own bin's midpoint.

use log::debug;

use crate::domain::SpectralLine;

/// Fractional position below which a line is shared with the bin below.
pub const LOW_SPLIT_FRACTION: f64 = 0.03;

/// Fractional position above which a line is shared with the bin above.
pub const HIGH_SPLIT_FRACTION: f64 = 0.97;

fn midpoint(edges: &[f64], bin: usize) -> f64 {
    0.5 * (edges[bin] + edges[bin + 1])
}

/// Accumulate `lines` into the bins defined by `edges`.
///
/// Returns one total per bin (`edges.len() - 1` values). Lines at or outside the
/// outer edges are dropped.
pub fn lines_to_bins(lines: &[SpectralLine], edges: &[f64]) -> Vec<f64> {
    let bins = edges.len().saturating_sub(1);
    let mut totals = vec![0.0; bins];
    if bins == 0 {
        return totals;
    }

    let mut dropped = 0usize;
    for line in lines {
        let e = line.energy;
        if !(e > edges[0] && e < edges[bins]) {
            dropped += 1;
            continue;
        }

        // edges[k] <= e < edges[k + 1]
        let k = edges.partition_point(|&edge| edge <= e) - 1;
        let f = (e - edges[k]) / (edges[k + 1] - edges[k]);

        if f < LOW_SPLIT_FRACTION && k > 0 {
            totals[k] += line.rate * e / midpoint(edges, k) / 2.0;
            totals[k - 1] += line.rate * e / midpoint(edges, k - 1) / 2.0;
        } else if f > HIGH_SPLIT_FRACTION && k < bins - 1 {
            totals[k] += line.rate * e / midpoint(edges, k) / 2.0;
            totals[k + 1] += line.rate * e / midpoint(edges, k + 1) / 2.0;
        } else {
            totals[k] += line.rate * e / midpoint(edges, k);
        }
    }

    if dropped > 0 {
        debug!("{dropped} of {} lines fall outside [{}, {}]", lines.len(), edges[0], edges[bins]);
    }
    totals
}
