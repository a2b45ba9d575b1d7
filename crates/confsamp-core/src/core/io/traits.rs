use crate::core::io::xyz::XyzFrame;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Defines the interface for reading and writing multi-structure trajectory
/// file formats.
///
/// A trajectory is an ordered sequence of [`XyzFrame`]s; single-structure
/// files are simply trajectories of length one. Implementors handle the
/// format-specific parsing and serialization, and the trait supplies the
/// path-based convenience methods.
pub trait TrajectoryFile {
    /// The error type for I/O operations.
    type Error: Error + From<io::Error>;

    /// Reads all frames from a buffered reader.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing fails or I/O operations encounter issues.
    fn read_from(reader: &mut impl BufRead) -> Result<Vec<XyzFrame>, Self::Error>;

    /// Writes frames to a writer.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_to(frames: &[XyzFrame], writer: &mut impl Write) -> Result<(), Self::Error>;

    /// Reads all frames from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or parsing fails.
    fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<XyzFrame>, Self::Error> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader)
    }

    /// Writes frames to a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or writing fails.
    fn write_to_path<P: AsRef<Path>>(frames: &[XyzFrame], path: P) -> Result<(), Self::Error> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        Self::write_to(frames, &mut writer)
    }
}
