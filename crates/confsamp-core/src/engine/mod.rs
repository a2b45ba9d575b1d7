//! # Engine Module
//!
//! Orchestration of external growing-string-method runs. The string
//! optimization itself, the energy/gradient engine behind it, and their
//! scratch bookkeeping all belong to the external driver program; this layer
//! owns what surrounds a run:
//!
//! - **Configuration** ([`config`]) - string and optimizer knobs passed to
//!   the driver, with validated defaults
//! - **Job Layout** ([`job`]) - per-conformer working directories, input
//!   structure and isomer files, process spawning, and output discovery
//! - **Progress Monitoring** ([`progress`]) - callback-based reporting for
//!   batch runs
//! - **Error Handling** ([`error`]) - engine-specific error types
//!
//! Each job is fully independent: its own directory, its own driver process,
//! no communication with sibling jobs. Fan-out across jobs is left to the
//! caller (a thread pool locally, a batch-scheduler array on a cluster).

pub mod config;
pub mod error;
pub mod job;
pub mod progress;
