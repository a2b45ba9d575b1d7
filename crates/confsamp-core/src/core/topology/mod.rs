//! Distance-based bond perception.
//!
//! The external string driver builds its internal coordinate system from a
//! molecular topology; the toolkit perceives that topology here so driving
//! coordinates can be validated against it and reactive ADD bonds can be
//! merged in before a job is written out, mirroring what the driver itself
//! does internally.

use crate::core::models::driving::DrivingCoordinate;
use crate::core::models::molecule::Molecule;
use std::collections::BTreeSet;
use tracing::info;

/// Two atoms are bonded if their distance is below this factor times the sum
/// of their covalent radii.
const BOND_TOLERANCE_FACTOR: f64 = 1.2;

/// The bond set of one structure, stored as ordered index pairs (i < j).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Topology {
    bonds: BTreeSet<(usize, usize)>,
}

impl Topology {
    /// Perceives bonds from interatomic distances and covalent radii.
    pub fn perceive(molecule: &Molecule) -> Self {
        let atoms = molecule.atoms();
        let mut bonds = BTreeSet::new();
        for (i, a) in atoms.iter().enumerate() {
            for (j, b) in atoms.iter().enumerate().skip(i + 1) {
                let cutoff =
                    (a.element.covalent_radius() + b.element.covalent_radius()) * BOND_TOLERANCE_FACTOR;
                if (a.position - b.position).norm() <= cutoff {
                    bonds.insert((i, j));
                }
            }
        }
        Self { bonds }
    }

    pub fn bond_count(&self) -> usize {
        self.bonds.len()
    }

    pub fn bonds(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.bonds.iter().copied()
    }

    /// Order-insensitive bond membership test.
    pub fn contains_bond(&self, i: usize, j: usize) -> bool {
        self.bonds.contains(&ordered(i, j))
    }

    pub fn add_bond(&mut self, i: usize, j: usize) -> bool {
        self.bonds.insert(ordered(i, j))
    }

    /// Inserts every ADD driving-coordinate bond that perception missed,
    /// returning the pairs that were actually added.
    ///
    /// A bond being formed is usually longer than a covalent bond in the
    /// reactant, so the driver needs it added explicitly to span the reaction
    /// with its internal coordinates.
    pub fn merge_driving_bonds(&mut self, coords: &[DrivingCoordinate]) -> Vec<(usize, usize)> {
        let mut added = Vec::new();
        for dc in coords.iter().filter(|dc| dc.is_add()) {
            let (i, j) = dc.atoms();
            if self.add_bond(i, j) {
                info!("Adding driving bond ({}, {}) to the topology", i, j);
                added.push(ordered(i, j));
            }
        }
        added
    }
}

fn ordered(i: usize, j: usize) -> (usize, usize) {
    if i <= j { (i, j) } else { (j, i) }
}
