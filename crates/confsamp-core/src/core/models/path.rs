use super::molecule::Molecule;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReactionPathError {
    #[error("Reaction path has {structures} structures but {energies} energies")]
    LengthMismatch { structures: usize, energies: usize },
    #[error("Reaction path must contain at least one node")]
    Empty,
}

/// A computed reaction path: an ordered sequence of structures along the
/// string, paired node-for-node with their energies in kcal/mol.
///
/// The two sequences are guaranteed equal-length and non-empty.
#[derive(Debug, Clone, PartialEq)]
pub struct ReactionPath {
    nodes: Vec<Molecule>,
    energies: Vec<f64>,
}

impl ReactionPath {
    pub fn new(nodes: Vec<Molecule>, energies: Vec<f64>) -> Result<Self, ReactionPathError> {
        if nodes.len() != energies.len() {
            return Err(ReactionPathError::LengthMismatch {
                structures: nodes.len(),
                energies: energies.len(),
            });
        }
        if nodes.is_empty() {
            return Err(ReactionPathError::Empty);
        }
        Ok(Self { nodes, energies })
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        false // guaranteed non-empty by construction
    }

    pub fn nodes(&self) -> &[Molecule] {
        &self.nodes
    }

    pub fn energies(&self) -> &[f64] {
        &self.energies
    }

    pub fn node(&self, index: usize) -> Option<&Molecule> {
        self.nodes.get(index)
    }

    /// The final node of the path, conventionally the product structure.
    pub fn product(&self) -> &Molecule {
        self.nodes
            .last()
            .expect("ReactionPath is non-empty by construction")
    }
}
