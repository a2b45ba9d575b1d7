use crate::core::io::xyz::XyzError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error(
        "Driving coordinate refers to atom {index}, but the conformer has only {atom_count} atoms"
    )]
    DrivingCoordinateOutOfRange { index: usize, atom_count: usize },

    #[error("Job index {index} is out of range for a set of {count} conformer(s)")]
    ConformerIndexOutOfRange { index: usize, count: usize },

    #[error("External driver '{program}' exited with {status}")]
    ExternalTool { program: String, status: String },

    #[error("Expected driver output '{path}' was not produced", path = path.display())]
    MissingOutput { path: PathBuf },

    #[error("Failed to write job input: {0}")]
    Input(#[from] XyzError),
}
