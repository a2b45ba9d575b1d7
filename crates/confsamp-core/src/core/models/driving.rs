use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DrivingCoordinateError {
    #[error("Unknown driving coordinate action: '{0}' (expected ADD or BREAK)")]
    UnknownAction(String),
    #[error("Malformed driving coordinate line: '{0}'")]
    Malformed(String),
    #[error("Driving coordinate joins an atom to itself: {0}")]
    SelfBond(usize),
}

/// An instruction biasing a string-method search toward a desired
/// transformation: form or cleave the bond between two 0-based atom indices.
///
/// The textual form is the isomer-file syntax consumed by the external
/// string driver, e.g. `ADD 56 80` or `BREAK 1 56`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrivingCoordinate {
    Add(usize, usize),
    Break(usize, usize),
}

impl DrivingCoordinate {
    pub fn new(action: Action, i: usize, j: usize) -> Result<Self, DrivingCoordinateError> {
        if i == j {
            return Err(DrivingCoordinateError::SelfBond(i));
        }
        Ok(match action {
            Action::Add => Self::Add(i, j),
            Action::Break => Self::Break(i, j),
        })
    }

    /// The pair of atom indices this coordinate acts on.
    pub fn atoms(&self) -> (usize, usize) {
        match *self {
            Self::Add(i, j) | Self::Break(i, j) => (i, j),
        }
    }

    pub fn is_add(&self) -> bool {
        matches!(self, Self::Add(..))
    }
}

/// The kind of bond change a driving coordinate requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Action {
    Add,
    Break,
}

impl fmt::Display for DrivingCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Add(i, j) => write!(f, "ADD {} {}", i, j),
            Self::Break(i, j) => write!(f, "BREAK {} {}", i, j),
        }
    }
}

impl FromStr for DrivingCoordinate {
    type Err = DrivingCoordinateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut tokens = s.split_whitespace();
        let (Some(action), Some(i), Some(j)) = (tokens.next(), tokens.next(), tokens.next())
        else {
            return Err(DrivingCoordinateError::Malformed(s.to_string()));
        };
        if tokens.next().is_some() {
            return Err(DrivingCoordinateError::Malformed(s.to_string()));
        }

        let action = match action {
            "ADD" => Action::Add,
            "BREAK" => Action::Break,
            other => return Err(DrivingCoordinateError::UnknownAction(other.to_string())),
        };
        let i: usize = i
            .parse()
            .map_err(|_| DrivingCoordinateError::Malformed(s.to_string()))?;
        let j: usize = j
            .parse()
            .map_err(|_| DrivingCoordinateError::Malformed(s.to_string()))?;
        Self::new(action, i, j)
    }
}
