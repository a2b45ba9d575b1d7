//! # Core Models Module
//!
//! Data structures representing the chemistry this toolkit moves around:
//! elements and atoms, whole molecules, reaction paths, and the driving
//! coordinates that bias a string-method search toward a transformation.
//!
//! ## Key Components
//!
//! - [`element`] - Atomic-number-backed element identities with symbol and
//!   covalent radius lookups
//! - [`molecule`] - An ordered collection of atoms with Cartesian coordinates
//! - [`path`] - A reaction path: parallel sequences of structures and energies
//! - [`driving`] - ADD/BREAK bond instructions for the external string driver
//!
//! All models are immutable once constructed; a refresh rebuilds them
//! wholesale rather than mutating in place.

pub mod driving;
pub mod element;
pub mod molecule;
pub mod path;
