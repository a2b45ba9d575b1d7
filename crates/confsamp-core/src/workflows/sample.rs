use crate::core::models::driving::DrivingCoordinate;
use crate::core::models::molecule::Molecule;
use crate::engine::config::GsmConfig;
use crate::engine::error::EngineError;
use crate::engine::job::GsmJob;
use crate::engine::progress::{Progress, ProgressReporter};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

/// Which jobs of the conformer set to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobSelection {
    /// Every conformer, fanned out over the rayon thread pool.
    All,
    /// A single conformer, e.g. one batch-scheduler array task.
    Single(usize),
}

/// The result of one string job.
#[derive(Debug)]
pub struct JobOutcome {
    pub index: usize,
    /// The converged path file on success, the job's own failure otherwise.
    pub result: Result<PathBuf, EngineError>,
}

/// Outcome of a sampling batch. Individual job failures live in
/// [`JobOutcome::result`]; the batch itself only fails on setup errors.
#[derive(Debug, Default)]
pub struct SampleReport {
    pub outcomes: Vec<JobOutcome>,
}

impl SampleReport {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }
}

/// Runs growing-string jobs for the selected conformers.
///
/// Jobs are fully independent; a failing job is recorded and reported but
/// never stops its siblings. The scratch layout is one directory per job
/// under `scratch_root`.
#[instrument(skip_all, name = "sample_workflow")]
pub fn run(
    conformers: &[Molecule],
    selection: JobSelection,
    driving_coordinates: &[DrivingCoordinate],
    config: &GsmConfig,
    scratch_root: &Path,
    reporter: &ProgressReporter,
) -> Result<SampleReport, EngineError> {
    let indices: Vec<usize> = match selection {
        JobSelection::All => (0..conformers.len()).collect(),
        JobSelection::Single(index) => {
            if index >= conformers.len() {
                return Err(EngineError::ConformerIndexOutOfRange {
                    index,
                    count: conformers.len(),
                });
            }
            vec![index]
        }
    };

    info!(
        "Running {} string job(s) out of {} conformer(s)",
        indices.len(),
        conformers.len()
    );
    reporter.report(Progress::BatchStart {
        total_jobs: indices.len() as u64,
    });

    let mut outcomes: Vec<JobOutcome> = indices
        .par_iter()
        .map(|&index| {
            let job = GsmJob::new(
                index,
                &conformers[index],
                driving_coordinates,
                config,
                scratch_root,
            );
            let result = job.execute();
            if let Err(error) = &result {
                warn!("String job {} failed: {}", index, error);
                reporter.report(Progress::JobFailed {
                    index,
                    message: error.to_string(),
                });
            }
            reporter.report(Progress::JobFinished);
            JobOutcome { index, result }
        })
        .collect();
    outcomes.sort_by_key(|o| o.index);

    reporter.report(Progress::BatchFinish);
    let report = SampleReport { outcomes };
    info!(
        "Sampling batch finished: {} succeeded, {} failed",
        report.succeeded(),
        report.failed()
    );
    Ok(report)
}
