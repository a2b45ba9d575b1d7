use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EnergyFileError {
    #[error("Failed to read energy file '{path}': {source}", path = path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Energy file '{path}' has {found} fields, expected at least 3", path = path.display())]
    TooFewFields { path: PathBuf, found: usize },
    #[error("Energy file '{path}' has a malformed energy (value: '{value}')", path = path.display())]
    InvalidEnergy { path: PathBuf, value: String },
}

/// Reads the absolute base energy, in hartree, from the external driver's
/// scratch energy file (`scratch/000/E_0.txt`).
///
/// The file is a single line of whitespace-separated tokens whose third
/// token is the energy; the leading tokens are driver bookkeeping.
pub fn read_base_energy_hartree(path: &Path) -> Result<f64, EnergyFileError> {
    let content = std::fs::read_to_string(path).map_err(|source| EnergyFileError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let fields: Vec<&str> = content.split_whitespace().collect();
    let Some(&value) = fields.get(2) else {
        return Err(EnergyFileError::TooFewFields {
            path: path.to_path_buf(),
            found: fields.len(),
        });
    };

    value.parse().map_err(|_| EnergyFileError::InvalidEnergy {
        path: path.to_path_buf(),
        value: value.to_string(),
    })
}
