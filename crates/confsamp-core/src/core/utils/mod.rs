//! Shared mathematical utilities and physical constants.

pub mod geometry;
pub mod units;
