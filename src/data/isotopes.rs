//! Isotope name cross-reference between burnup codes.
//!
//! ORIGEN-like outputs and calibration tables name isotopes `Cs137`; transport
//! material files use the ZAI form `55137`. Only the isotopes with calibrated
//! responses are listed.

/// Avogadro's number (1/mol), as used for atom-density to mass-density conversion.
pub const AVOGADRO: f64 = 6.022141e23;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameFormat {
    /// Element symbol + mass number, e.g. `Cs137`.
    Origen,
    /// ZAI digits, e.g. `55137`.
    Serpent,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IsotopeRecord {
    pub origen: &'static str,
    pub serpent: &'static str,
    /// Atomic mass (u).
    pub mass: f64,
}

pub const ISOTOPES: [IsotopeRecord; 6] = [
    IsotopeRecord { origen: "Ce144", serpent: "58144", mass: 143.913647 },
    IsotopeRecord { origen: "Cs134", serpent: "55134", mass: 133.906718 },
    IsotopeRecord { origen: "Cs137", serpent: "55137", mass: 136.907090 },
    IsotopeRecord { origen: "Eu154", serpent: "63154", mass: 153.922979 },
    IsotopeRecord { origen: "Ru106", serpent: "44106", mass: 105.907330 },
    IsotopeRecord { origen: "Sr90", serpent: "38090", mass: 89.907738 },
];

fn lookup(name: &str, format: NameFormat) -> Option<&'static IsotopeRecord> {
    ISOTOPES.iter().find(|r| match format {
        NameFormat::Origen => r.origen == name,
        NameFormat::Serpent => r.serpent == name,
    })
}

/// Convert `name` into `to`. The name must be given in the other format.
pub fn convert_isotope_name(name: &str, to: NameFormat) -> Option<&'static str> {
    match to {
        NameFormat::Origen => lookup(name, NameFormat::Serpent).map(|r| r.origen),
        NameFormat::Serpent => lookup(name, NameFormat::Origen).map(|r| r.serpent),
    }
}

/// Atomic mass of `name`, given in `format`.
pub fn isotope_mass(name: &str, format: NameFormat) -> Option<f64> {
    lookup(name, format).map(|r| r.mass)
}

/// Mass density (g/cm³) from a transport-code atom density (atoms/barn-cm).
pub fn atom_density_to_mass(atoms_per_barn_cm: f64, mass: f64) -> f64 {
    atoms_per_barn_cm * 1e24 * mass / AVOGADRO
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_both_ways() {
        assert_eq!(convert_isotope_name("55137", NameFormat::Origen), Some("Cs137"));
        assert_eq!(convert_isotope_name("Cs137", NameFormat::Serpent), Some("55137"));
        assert_eq!(convert_isotope_name("38090", NameFormat::Origen), Some("Sr90"));
    }

    #[test]
    fn does_not_convert_to_itself() {
        assert_eq!(convert_isotope_name("Cs137", NameFormat::Origen), None);
    }

    #[test]
    fn masses() {
        assert_eq!(isotope_mass("Cs137", NameFormat::Origen), Some(136.907090));
        assert_eq!(isotope_mass("55137", NameFormat::Serpent), Some(136.907090));
        assert_eq!(isotope_mass("Pu186", NameFormat::Serpent), None);
    }
}
