//! # confsamp Core Library
//!
//! A toolkit for conformational sampling of reactive systems: it drives
//! growing-string-method (GSM) transition-state searches over molecular
//! conformers through an external quantum-chemistry driver, then parses the
//! resulting reaction paths into per-conformer energetic and stereochemical
//! summaries.
//!
//! ## Architectural Philosophy
//!
//! The library is designed with a strict layered architecture to ensure a clear
//! separation of concerns, making it modular, testable, and extensible.
//!
//! - **[`core`]: The Foundation.** Contains stateless data models (`Molecule`,
//!   `ReactionPath`, `DrivingCoordinate`), file format I/O (XYZ trajectories,
//!   driver energy files), and geometric utilities.
//!
//! - **[`engine`]: The Job Layer.** Prepares per-conformer working directories
//!   and orchestrates runs of the external string-method program. All of the
//!   actual path optimization lives in that program; this layer owns only the
//!   directory layout, input files, and process boundary.
//!
//! - **[`analysis`]: The Logic Core.** The repository-authored science:
//!   transition-state selection along a path, stereochemical labeling from
//!   measured torsions, conformer records, and ensemble thermochemistry.
//!
//! - **[`workflows`]: The Public API.** The highest-level, user-facing layer,
//!   tying the other three together into complete procedures: sampling a
//!   conformer set and analyzing a finished search.

pub mod analysis;
pub mod core;
pub mod engine;
pub mod workflows;
