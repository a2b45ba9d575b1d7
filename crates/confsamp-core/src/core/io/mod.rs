//! Input/output for the file formats that cross this toolkit's process
//! boundary: XYZ structures and trajectories, and the external driver's
//! scratch energy files.

pub mod energy;
pub mod traits;
pub mod xyz;
