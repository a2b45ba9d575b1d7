use phf::{Map, phf_map};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Atomic numbers keyed by element symbol.
///
/// Covers the elements that occur in the catalytic systems this toolkit was
/// built for: organic frameworks, halides, and the common late transition
/// metals used as catalytic centers.
static ATOMIC_NUMBERS: Map<&'static str, u8> = phf_map! {
    "H" => 1, "He" => 2,
    "Li" => 3, "Be" => 4, "B" => 5, "C" => 6, "N" => 7, "O" => 8, "F" => 9, "Ne" => 10,
    "Na" => 11, "Mg" => 12, "Al" => 13, "Si" => 14, "P" => 15, "S" => 16, "Cl" => 17, "Ar" => 18,
    "K" => 19, "Ca" => 20, "Fe" => 26, "Co" => 27, "Ni" => 28, "Cu" => 29, "Zn" => 30,
    "Br" => 35, "Ru" => 44, "Rh" => 45, "Pd" => 46, "Ag" => 47, "I" => 53, "Ir" => 77, "Pt" => 78,
};

/// Single-bond covalent radii in Angstroms, keyed by atomic number.
///
/// Values follow the Pyykko/Atsumi 2009 compilation, which is what the
/// distance-based bond perception in [`crate::core::topology`] expects.
static COVALENT_RADII: Map<u8, f64> = phf_map! {
    1u8 => 0.32, 2u8 => 0.46,
    3u8 => 1.33, 4u8 => 1.02, 5u8 => 0.85, 6u8 => 0.75, 7u8 => 0.71, 8u8 => 0.63,
    9u8 => 0.64, 10u8 => 0.67,
    11u8 => 1.55, 12u8 => 1.39, 13u8 => 1.26, 14u8 => 1.16, 15u8 => 1.11, 16u8 => 1.03,
    17u8 => 0.99, 18u8 => 0.96,
    19u8 => 1.96, 20u8 => 1.71, 26u8 => 1.16, 27u8 => 1.11, 28u8 => 1.10, 29u8 => 1.12,
    30u8 => 1.18, 35u8 => 1.14, 44u8 => 1.25, 45u8 => 1.25, 46u8 => 1.20, 47u8 => 1.28,
    53u8 => 1.33, 77u8 => 1.22, 78u8 => 1.23,
};

static SYMBOLS: Map<u8, &'static str> = phf_map! {
    1u8 => "H", 2u8 => "He",
    3u8 => "Li", 4u8 => "Be", 5u8 => "B", 6u8 => "C", 7u8 => "N", 8u8 => "O", 9u8 => "F",
    10u8 => "Ne",
    11u8 => "Na", 12u8 => "Mg", 13u8 => "Al", 14u8 => "Si", 15u8 => "P", 16u8 => "S",
    17u8 => "Cl", 18u8 => "Ar",
    19u8 => "K", 20u8 => "Ca", 26u8 => "Fe", 27u8 => "Co", 28u8 => "Ni", 29u8 => "Cu",
    30u8 => "Zn", 35u8 => "Br", 44u8 => "Ru", 45u8 => "Rh", 46u8 => "Pd", 47u8 => "Ag",
    53u8 => "I", 77u8 => "Ir", 78u8 => "Pt",
};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ElementError {
    #[error("Unknown element symbol: '{0}'")]
    UnknownSymbol(String),
    #[error("Unsupported atomic number: {0}")]
    UnknownAtomicNumber(u8),
}

/// A chemical element, stored as its atomic number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Element(u8);

impl Element {
    /// Creates an element from an atomic number, if it is one this toolkit
    /// carries data for.
    pub fn from_atomic_number(z: u8) -> Result<Self, ElementError> {
        if SYMBOLS.contains_key(&z) {
            Ok(Self(z))
        } else {
            Err(ElementError::UnknownAtomicNumber(z))
        }
    }

    pub fn atomic_number(&self) -> u8 {
        self.0
    }

    pub fn symbol(&self) -> &'static str {
        SYMBOLS
            .get(&self.0)
            .copied()
            .expect("Element is only constructed with a supported atomic number")
    }

    /// Single-bond covalent radius in Angstroms.
    pub fn covalent_radius(&self) -> f64 {
        COVALENT_RADII
            .get(&self.0)
            .copied()
            .expect("Element is only constructed with a supported atomic number")
    }
}

impl FromStr for Element {
    type Err = ElementError;

    /// Parses an element symbol as it appears in an XYZ file (case-sensitive,
    /// e.g. "Pd", "Cl").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ATOMIC_NUMBERS
            .get(s)
            .map(|&z| Self(z))
            .ok_or_else(|| ElementError::UnknownSymbol(s.to_string()))
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
