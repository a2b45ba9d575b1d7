use crate::core::io::traits::TrajectoryFile;
use crate::core::models::element::Element;
use crate::core::models::molecule::{Atom, Molecule};
use nalgebra::Point3;
use std::io::{self, BufRead, Write};
use thiserror::Error;

/// One frame of an XYZ trajectory: the structure plus the verbatim comment
/// line.
///
/// The comment line matters here: the external string driver stores each
/// node's energy offset (in hartree, relative to the scratch base energy) as
/// the first token of the comment, so it must survive a round trip.
#[derive(Debug, Clone, PartialEq)]
pub struct XyzFrame {
    pub comment: String,
    pub molecule: Molecule,
}

#[derive(Debug, Error)]
pub enum XyzError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse {
        line: usize,
        kind: XyzParseErrorKind,
    },
}

#[derive(Debug, Error)]
pub enum XyzParseErrorKind {
    #[error("Invalid atom count (value: '{value}')")]
    InvalidAtomCount { value: String },
    #[error("Unknown element symbol '{symbol}'")]
    UnknownElement { symbol: String },
    #[error("Invalid coordinate (value: '{value}')")]
    InvalidCoordinate { value: String },
    #[error("Atom line has {found} fields, expected 4")]
    WrongFieldCount { found: usize },
    #[error("File ended in the middle of a frame")]
    UnexpectedEof,
}

/// Reader/writer for single- and multi-structure XYZ files.
pub struct XyzFile;

impl TrajectoryFile for XyzFile {
    type Error = XyzError;

    fn read_from(reader: &mut impl BufRead) -> Result<Vec<XyzFrame>, Self::Error> {
        let mut lines = reader.lines().enumerate();
        let mut frames = Vec::new();

        while let Some((line_num, line_res)) = lines.next() {
            let line = line_res?;
            let line_num = line_num + 1;
            if line.trim().is_empty() {
                // tolerate blank separators between frames and a trailing newline
                continue;
            }

            let atom_count: usize = line.trim().parse().map_err(|_| XyzError::Parse {
                line: line_num,
                kind: XyzParseErrorKind::InvalidAtomCount {
                    value: line.trim().to_string(),
                },
            })?;

            let comment = match lines.next() {
                Some((_, line_res)) => line_res?,
                None => {
                    return Err(XyzError::Parse {
                        line: line_num,
                        kind: XyzParseErrorKind::UnexpectedEof,
                    });
                }
            };

            let mut atoms = Vec::with_capacity(atom_count);
            for _ in 0..atom_count {
                let Some((atom_line_num, line_res)) = lines.next() else {
                    return Err(XyzError::Parse {
                        line: line_num,
                        kind: XyzParseErrorKind::UnexpectedEof,
                    });
                };
                let atom_line = line_res?;
                let atom_line_num = atom_line_num + 1;
                atoms.push(parse_atom_line(&atom_line, atom_line_num)?);
            }

            frames.push(XyzFrame {
                comment,
                molecule: Molecule::new(atoms),
            });
        }

        Ok(frames)
    }

    fn write_to(frames: &[XyzFrame], writer: &mut impl Write) -> Result<(), Self::Error> {
        for frame in frames {
            writeln!(writer, "{}", frame.molecule.atom_count())?;
            writeln!(writer, "{}", frame.comment)?;
            for atom in frame.molecule.atoms() {
                writeln!(
                    writer,
                    "{:<2} {:>14.8} {:>14.8} {:>14.8}",
                    atom.element.symbol(),
                    atom.position.x,
                    atom.position.y,
                    atom.position.z,
                )?;
            }
        }
        Ok(())
    }
}

fn parse_atom_line(line: &str, line_num: usize) -> Result<Atom, XyzError> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() != 4 {
        return Err(XyzError::Parse {
            line: line_num,
            kind: XyzParseErrorKind::WrongFieldCount {
                found: fields.len(),
            },
        });
    }

    let element: Element = fields[0].parse().map_err(|_| XyzError::Parse {
        line: line_num,
        kind: XyzParseErrorKind::UnknownElement {
            symbol: fields[0].to_string(),
        },
    })?;

    let mut coords = [0.0f64; 3];
    for (slot, field) in coords.iter_mut().zip(&fields[1..]) {
        *slot = field.parse().map_err(|_| XyzError::Parse {
            line: line_num,
            kind: XyzParseErrorKind::InvalidCoordinate {
                value: field.to_string(),
            },
        })?;
    }

    Ok(Atom::new(
        element,
        Point3::new(coords[0], coords[1], coords[2]),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::BufReader;

    const TWO_FRAMES: &str = "\
3
-0.00125432 frame zero
O    0.00000000     0.00000000     0.00000000
H    0.96000000     0.00000000     0.00000000
H   -0.24000000     0.93000000     0.00000000
3
-0.00089214 frame one
O    0.00000000     0.00000000     0.10000000
H    0.96000000     0.00000000     0.10000000
H   -0.24000000     0.93000000     0.10000000
";

    fn read(input: &str) -> Result<Vec<XyzFrame>, XyzError> {
        XyzFile::read_from(&mut BufReader::new(input.as_bytes()))
    }

    #[test]
    fn reads_a_multi_structure_trajectory() {
        let frames = read(TWO_FRAMES).unwrap();
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].molecule.atom_count(), 3);
        assert_eq!(frames[0].comment, "-0.00125432 frame zero");
        assert_eq!(frames[1].comment, "-0.00089214 frame one");
        let h = frames[1].molecule.atom(1).unwrap();
        assert_eq!(h.element.symbol(), "H");
        assert!((h.position.z - 0.1).abs() < 1e-12);
    }

    #[test]
    fn comment_lines_survive_a_round_trip() {
        let frames = read(TWO_FRAMES).unwrap();
        let mut buffer = Vec::new();
        XyzFile::write_to(&frames, &mut buffer).unwrap();
        let reread = read(std::str::from_utf8(&buffer).unwrap()).unwrap();
        assert_eq!(reread, frames);
    }

    #[test]
    fn bad_atom_count_reports_line_number() {
        let err = read("three\ncomment\n").unwrap_err();
        assert!(matches!(
            err,
            XyzError::Parse {
                line: 1,
                kind: XyzParseErrorKind::InvalidAtomCount { .. }
            }
        ));
    }

    #[test]
    fn unknown_element_reports_line_number() {
        let input = "1\nc\nXq 0.0 0.0 0.0\n";
        let err = read(input).unwrap_err();
        assert!(matches!(
            err,
            XyzError::Parse {
                line: 3,
                kind: XyzParseErrorKind::UnknownElement { .. }
            }
        ));
    }

    #[test]
    fn truncated_frame_is_an_error() {
        let input = "3\ncomment\nO 0.0 0.0 0.0\n";
        let err = read(input).unwrap_err();
        assert!(matches!(
            err,
            XyzError::Parse {
                kind: XyzParseErrorKind::UnexpectedEof,
                ..
            }
        ));
    }

    #[test]
    fn malformed_coordinate_is_an_error() {
        let input = "1\ncomment\nO 0.0 zero 0.0\n";
        let err = read(input).unwrap_err();
        assert!(matches!(
            err,
            XyzError::Parse {
                line: 3,
                kind: XyzParseErrorKind::InvalidCoordinate { .. }
            }
        ));
    }

    #[test]
    fn path_round_trip_through_tempdir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("traj.xyz");
        let frames = read(TWO_FRAMES).unwrap();
        XyzFile::write_to_path(&frames, &path).unwrap();
        let reread = XyzFile::read_from_path(&path).unwrap();
        assert_eq!(reread, frames);
    }
}
