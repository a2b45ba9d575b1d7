use super::element::Element;
use nalgebra::Point3;

/// An atom in a molecular structure: element identity plus Cartesian
/// coordinates in Angstroms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Atom {
    pub element: Element,
    pub position: Point3<f64>,
}

impl Atom {
    pub fn new(element: Element, position: Point3<f64>) -> Self {
        Self { element, position }
    }
}

/// An ordered collection of atoms forming one molecular structure.
///
/// Atom indices are 0-based and stable for the lifetime of the molecule;
/// driving coordinates and torsion specifications refer to them directly.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Molecule {
    atoms: Vec<Atom>,
}

impl Molecule {
    pub fn new(atoms: Vec<Atom>) -> Self {
        Self { atoms }
    }

    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    pub fn atom(&self, index: usize) -> Option<&Atom> {
        self.atoms.get(index)
    }

    /// Position of the atom at `index`, if it exists.
    pub fn position(&self, index: usize) -> Option<&Point3<f64>> {
        self.atoms.get(index).map(|a| &a.position)
    }
}
