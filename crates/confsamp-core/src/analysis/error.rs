use crate::core::io::energy::EnergyFileError;
use crate::core::io::xyz::XyzError;
use crate::core::models::path::ReactionPathError;
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Transition-state selection needs at least 2 path nodes, found {found}")]
    TooFewNodes { found: usize },

    #[error("Torsion atom index {index} is out of range for a structure with {atom_count} atoms")]
    TorsionIndexOutOfRange { index: usize, atom_count: usize },

    #[error("Torsion over atoms {atoms:?} is undefined: three consecutive atoms are collinear")]
    DegenerateTorsion { atoms: [usize; 4] },

    #[error("Node {node} has a malformed energy in its comment line (value: '{value}')")]
    MalformedNodeEnergy { node: usize, value: String },

    #[error("Free energy of an empty conformer ensemble is undefined")]
    EmptyEnsemble,

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Path(#[from] ReactionPathError),

    #[error("Failed to read path structures: {0}")]
    Xyz(#[from] XyzError),

    #[error(transparent)]
    EnergyFile(#[from] EnergyFileError),

    #[error("Failed to write summary: {0}")]
    Csv(#[from] csv::Error),
}
