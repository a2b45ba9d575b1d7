//! # Core Module
//!
//! The fundamental building blocks shared by every layer of confsamp: molecular
//! data models, file format I/O, bond perception, and geometric utilities.
//!
//! ## Architecture
//!
//! - **Molecular Representation** ([`models`]) - Elements, atoms, molecules,
//!   reaction paths, and driving coordinates
//! - **File I/O** ([`io`]) - XYZ structures/trajectories and the external
//!   driver's scratch energy files
//! - **Connectivity** ([`topology`]) - Distance-based bond perception and
//!   merging of reactive driving-coordinate bonds
//! - **Utilities** ([`utils`]) - Dihedral geometry and physical constants
//!
//! Everything in this layer is stateless and free of process or filesystem
//! side effects, except for the explicit read/write entry points in [`io`].

pub mod io;
pub mod models;
pub mod topology;
pub mod utils;
