//! # Analysis Module
//!
//! The repository-authored science: everything derived from a finished
//! reaction path. This layer never talks to the external driver; it consumes
//! the files a run leaves behind.
//!
//! - **Transition-state selection** ([`ts`]) - locating the path node of
//!   maximum one-sided forward energy difference
//! - **Stereochemical labeling** ([`stereo`]) - the fixed boolean conventions
//!   mapping measured torsions to proximal/distal, exo/endo, syn/anti, and
//!   R/S labels
//! - **Conformer records** ([`conformer`]) - one immutable record per string
//!   output, tying structures, energies, torsions, and labels together
//! - **Ensemble summaries** ([`summary`], [`thermo`]) - cross-conformer
//!   tables, CSV export, and Boltzmann-weighted free energy differences

pub mod conformer;
pub mod error;
pub mod stereo;
pub mod summary;
pub mod thermo;
pub mod ts;
