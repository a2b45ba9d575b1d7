use crate::cli::RunArgs;
use crate::config::PartialSearchConfig;
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use confsamp::{
    core::io::{traits::TrajectoryFile, xyz::XyzFile},
    core::models::molecule::Molecule,
    engine::progress::ProgressReporter,
    workflows::sample::{self, JobSelection},
};
use tracing::{info, warn};

/// Environment variable batch schedulers set to identify the current array
/// task. When present and no explicit job index is given, only that
/// conformer is run.
const ARRAY_TASK_ENV: &str = "SLURM_ARRAY_TASK_ID";

pub fn run(args: RunArgs) -> Result<()> {
    let partial_config = PartialSearchConfig::from_file(&args.config)?;
    info!("Merging configuration from file and CLI arguments...");
    let gsm_config = partial_config.build_gsm(&args)?;
    let driving_coordinates = partial_config.driving_coordinates()?;

    info!("Loading conformer ensemble from {:?}", &args.input);
    let frames = XyzFile::read_from_path(&args.input).map_err(|e| CliError::FileParsing {
        path: args.input.clone(),
        source: e.into(),
    })?;
    let conformers: Vec<Molecule> = frames.into_iter().map(|f| f.molecule).collect();
    if conformers.is_empty() {
        return Err(CliError::Argument(format!(
            "Input file '{}' contains no structures.",
            args.input.display()
        )));
    }
    info!("Loaded {} conformer(s).", conformers.len());

    let array_task = std::env::var(ARRAY_TASK_ENV).ok();
    let selection = resolve_selection(args.job_index, array_task.as_deref())?;
    if let JobSelection::Single(index) = selection {
        info!("Restricting this invocation to conformer {}.", index);
    }

    std::fs::create_dir_all(&args.scratch)?;

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!("Starting growing-string searches...");
    let report = sample::run(
        &conformers,
        selection,
        &driving_coordinates,
        &gsm_config,
        &args.scratch,
        &reporter,
    )?;

    println!(
        "Sampling finished: {} succeeded, {} failed.",
        report.succeeded(),
        report.failed()
    );
    for outcome in &report.outcomes {
        match &outcome.result {
            Ok(path) => println!("  ✓ conformer {}: {}", outcome.index, path.display()),
            Err(error) => {
                warn!("Conformer {} failed: {}", outcome.index, error);
                println!("  ✗ conformer {}: {}", outcome.index, error);
            }
        }
    }

    if report.succeeded() == 0 {
        return Err(CliError::Argument(
            "Every string job failed; check the per-job error.txt files in the scratch directory."
                .to_string(),
        ));
    }
    Ok(())
}

/// An explicit `--job-index` wins; otherwise a scheduler array task id
/// selects a single conformer; otherwise every conformer is run.
fn resolve_selection(job_index: Option<usize>, array_task: Option<&str>) -> Result<JobSelection> {
    if let Some(index) = job_index {
        return Ok(JobSelection::Single(index));
    }
    match array_task {
        Some(value) => {
            let index: usize = value.trim().parse().map_err(|_| {
                CliError::Argument(format!(
                    "{} is set but is not a job index: '{}'.",
                    ARRAY_TASK_ENV, value
                ))
            })?;
            Ok(JobSelection::Single(index))
        }
        None => Ok(JobSelection::All),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_index_wins_over_array_task() {
        let selection = resolve_selection(Some(4), Some("7")).unwrap();
        assert_eq!(selection, JobSelection::Single(4));
    }

    #[test]
    fn array_task_selects_a_single_job() {
        let selection = resolve_selection(None, Some("12")).unwrap();
        assert_eq!(selection, JobSelection::Single(12));
    }

    #[test]
    fn no_hints_means_all_jobs() {
        let selection = resolve_selection(None, None).unwrap();
        assert_eq!(selection, JobSelection::All);
    }

    #[test]
    fn garbage_array_task_is_an_error() {
        let err = resolve_selection(None, Some("batch")).unwrap_err();
        assert!(matches!(err, CliError::Argument(_)));
    }
}
