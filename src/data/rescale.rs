//! Normalization of transport results to ORIGEN's per-tonne basis.

/// UO2 density (g/cm³).
pub const FUEL_DENSITY: f64 = 10.41;

/// Uranium mass fraction of UO2.
pub const URANIUM_FRACTION: f64 = 0.88;

/// Factor that scales a transport result for a material of `volume` cm³ to one
/// tonne of uranium.
pub fn scale_serpent_to_origen(volume: f64) -> f64 {
    let standard_volume = 1e6 / (FUEL_DENSITY * URANIUM_FRACTION);
    standard_volume / volume
}
