//! # Workflows Module
//!
//! The top-level entry points tying the other layers into complete
//! procedures:
//!
//! - **Sampling** ([`sample`]) - fan a conformer set out into independent
//!   growing-string jobs, either all at once over a thread pool or one job
//!   selected by a batch-scheduler array index.
//! - **Analysis** ([`analyze`]) - discover the converged string outputs of a
//!   finished search, build one conformer record per string, and assemble
//!   the ensemble summary.
//!
//! Both report through [`crate::engine::progress::ProgressReporter`] and
//! treat per-conformer failures as data, not as reasons to abort siblings.

pub mod analyze;
pub mod sample;
