//! Stereochemical labeling conventions.
//!
//! These rules encode a domain convention, not an optimization: the exact
//! comparisons and boundary inclusivity are load-bearing and must not be
//! "simplified". All angles are in degrees on (-180, 180].

use std::fmt;

/// Which face of the metal center the substrate approaches from, judged by
/// the facial torsion measured on the transition-state structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Facial {
    Proximal,
    Distal,
}

/// Exo/endo relationship of the forming ring at the transition state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Approach {
    Exo,
    Endo,
}

/// Syn/anti orientation of the forming bond at the transition state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    Syn,
    Anti,
}

/// Stereodescriptor of the product's newly formed stereocenter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StereoDescriptor {
    R,
    S,
}

/// Proximal iff the facial torsion lies in [-90, 90], bounds inclusive.
pub fn facial(facial_torsion: f64) -> Facial {
    if (-90.0..=90.0).contains(&facial_torsion) {
        Facial::Proximal
    } else {
        Facial::Distal
    }
}

/// Exo iff (forming-bond torsion >= 0) XOR (the approach is distal).
///
/// The transition state is exo when the torsion of the bond being formed is
/// non-negative and the approach is proximal; on the distal face the
/// relationship is reversed.
pub fn approach(forming_bond_torsion: f64, facial: Facial) -> Approach {
    if (forming_bond_torsion >= 0.0) ^ (facial == Facial::Distal) {
        Approach::Exo
    } else {
        Approach::Endo
    }
}

/// Syn iff the forming-bond torsion lies in [-90, 90], bounds inclusive.
pub fn orientation(forming_bond_torsion: f64) -> Orientation {
    if (-90.0..=90.0).contains(&forming_bond_torsion) {
        Orientation::Syn
    } else {
        Orientation::Anti
    }
}

/// R iff the formed-bond torsion measured on the product is <= 0.
pub fn product_stereo(formed_bond_torsion: f64) -> StereoDescriptor {
    if formed_bond_torsion <= 0.0 {
        StereoDescriptor::R
    } else {
        StereoDescriptor::S
    }
}

impl fmt::Display for Facial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Proximal => "proximal",
            Self::Distal => "distal",
        })
    }
}

impl fmt::Display for Approach {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Exo => "exo",
            Self::Endo => "endo",
        })
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Syn => "syn",
            Self::Anti => "anti",
        })
    }
}

impl fmt::Display for StereoDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::R => "R",
            Self::S => "S",
        })
    }
}
