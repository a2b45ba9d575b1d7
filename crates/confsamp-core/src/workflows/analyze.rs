use crate::analysis::conformer::{Conformer, TorsionSpecs};
use crate::analysis::error::AnalysisError;
use crate::analysis::summary::SummaryTable;
use crate::engine::job::STRING_DIR_PREFIX;
use crate::engine::progress::{Progress, ProgressReporter};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

/// Temperature used for the stereochemistry free-energy gap when the caller
/// does not override it, kelvin.
pub const DEFAULT_ANALYSIS_TEMPERATURE: f64 = 358.15;

/// Configuration of the analysis pass over a finished search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalyzeConfig {
    pub torsions: TorsionSpecs,
    /// Temperature for the ensemble free-energy comparison, kelvin.
    pub temperature: f64,
}

impl AnalyzeConfig {
    pub fn new(torsions: TorsionSpecs) -> Self {
        Self {
            torsions,
            temperature: DEFAULT_ANALYSIS_TEMPERATURE,
        }
    }
}

/// Everything an analysis pass produces.
///
/// Strings that failed to parse are not fatal; they are carried here with
/// their error text so a front end can show them next to the table.
#[derive(Debug)]
pub struct AnalyzeReport {
    pub conformers: Vec<(usize, Conformer)>,
    /// Conformer index and error text for every string that failed to load.
    pub failures: Vec<(usize, String)>,
    pub table: SummaryTable,
    /// `G(S) - G(R)` over relative TS energies, `None` until both product
    /// stereochemistries have been observed.
    pub stereo_gap: Option<f64>,
}

/// Discovers and analyzes every converged string under `scratch_root`.
///
/// A string is a directory named `string_<index>` containing an
/// `opt_converged_*.xyz` trajectory; directories without one (still running,
/// or crashed before convergence) are skipped with a log message.
#[instrument(skip_all, name = "analyze_workflow")]
pub fn run(
    scratch_root: &Path,
    config: &AnalyzeConfig,
    reporter: &ProgressReporter,
) -> Result<AnalyzeReport, AnalysisError> {
    reporter.report(Progress::PhaseStart {
        name: "Discovering strings",
    });
    let strings = discover_strings(scratch_root)?;
    info!(
        "Found {} converged string(s) under {}",
        strings.len(),
        scratch_root.display()
    );
    reporter.report(Progress::PhaseFinish);

    reporter.report(Progress::BatchStart {
        total_jobs: strings.len() as u64,
    });
    let mut conformers = Vec::new();
    let mut failures = Vec::new();
    for (index, path_file) in strings {
        match Conformer::load(&path_file, &config.torsions) {
            Ok(conformer) => conformers.push((index, conformer)),
            Err(error) => {
                warn!("Conformer {} failed to load: {}", index, error);
                reporter.report(Progress::JobFailed {
                    index,
                    message: error.to_string(),
                });
                failures.push((index, error.to_string()));
            }
        }
        reporter.report(Progress::JobFinished);
    }
    reporter.report(Progress::BatchFinish);

    let table = SummaryTable::build(conformers.iter().map(|(i, c)| (*i, c)));
    let stereo_gap = table.stereo_free_energy_gap(config.temperature)?;

    Ok(AnalyzeReport {
        conformers,
        failures,
        table,
        stereo_gap,
    })
}

/// Finds `(job index, converged trajectory)` pairs under the scratch root.
fn discover_strings(scratch_root: &Path) -> Result<Vec<(usize, PathBuf)>, AnalysisError> {
    let mut strings = Vec::new();
    for entry in std::fs::read_dir(scratch_root)? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        let name = entry.file_name();
        let Some(index) = name
            .to_str()
            .and_then(|n| n.strip_prefix(STRING_DIR_PREFIX))
            .and_then(|digits| digits.parse::<usize>().ok())
        else {
            continue;
        };
        match converged_trajectory(&entry.path(), index)? {
            Some(path_file) => strings.push((index, path_file)),
            None => debug!(
                "String directory {} has no converged trajectory yet",
                entry.path().display()
            ),
        }
    }
    strings.sort_by_key(|(index, _)| *index);
    Ok(strings)
}

/// The converged trajectory of one string directory: the file the job layer
/// names for this index when present, otherwise the first
/// `opt_converged_*.xyz` in name order.
fn converged_trajectory(dir: &Path, index: usize) -> Result<Option<PathBuf>, AnalysisError> {
    let preferred = dir.join(format!("opt_converged_{:03}.xyz", index));
    if preferred.exists() {
        return Ok(Some(preferred));
    }

    let mut candidates: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with("opt_converged_") && n.ends_with(".xyz"))
        })
        .collect();
    candidates.sort();
    Ok(candidates.into_iter().next())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::conformer::TorsionSpec;
    use crate::core::io::traits::TrajectoryFile;
    use crate::core::io::xyz::{XyzFile, XyzFrame};
    use crate::core::models::element::Element;
    use crate::core::models::molecule::{Atom, Molecule};
    use nalgebra::Point3;

    fn chain_with_torsion(angle_degrees: f64) -> Molecule {
        let c: Element = "C".parse().unwrap();
        let theta = angle_degrees.to_radians();
        Molecule::new(vec![
            Atom::new(c, Point3::new(1.0, 1.0, 0.0)),
            Atom::new(c, Point3::new(1.0, 0.0, 0.0)),
            Atom::new(c, Point3::new(2.5, 0.0, 0.0)),
            Atom::new(c, Point3::new(2.5, theta.cos(), -theta.sin())),
        ])
    }

    fn write_string_dir(
        scratch: &Path,
        index: usize,
        offsets: &[f64],
        product_torsion: f64,
    ) {
        let dir = scratch.join(format!("string_{:04}", index));
        std::fs::create_dir_all(dir.join("scratch").join("000")).unwrap();
        std::fs::write(dir.join("scratch").join("000").join("E_0.txt"), "0 0 -2.0\n").unwrap();

        let last = offsets.len() - 1;
        let frames: Vec<XyzFrame> = offsets
            .iter()
            .enumerate()
            .map(|(i, offset)| XyzFrame {
                comment: format!("{:.8}", offset),
                molecule: chain_with_torsion(if i == last { product_torsion } else { 30.0 }),
            })
            .collect();
        XyzFile::write_to_path(&frames, dir.join(format!("opt_converged_{:03}.xyz", index)))
            .unwrap();
    }

    fn config() -> AnalyzeConfig {
        AnalyzeConfig::new(TorsionSpecs {
            forming_bond: TorsionSpec([0, 1, 2, 3]),
            facial: TorsionSpec([0, 1, 2, 3]),
        })
    }

    #[test]
    fn analyzes_every_discovered_string() {
        let scratch = tempfile::tempdir().unwrap();
        write_string_dir(scratch.path(), 0, &[0.0, 0.05, 0.01], -45.0); // R product
        write_string_dir(scratch.path(), 3, &[0.001, 0.04, 0.0], 45.0); // S product

        let report = run(scratch.path(), &config(), &ProgressReporter::new()).unwrap();

        assert_eq!(report.conformers.len(), 2);
        assert!(report.failures.is_empty());
        let indices: Vec<usize> = report.table.rows().iter().map(|r| r.conformer_index).collect();
        assert_eq!(indices, vec![0, 3]);
        assert!(report.stereo_gap.is_some());
    }

    #[test]
    fn broken_string_is_recorded_not_fatal() {
        let scratch = tempfile::tempdir().unwrap();
        write_string_dir(scratch.path(), 0, &[0.0, 0.05, 0.01], -45.0);

        // job 1 has a trajectory but no scratch energy file
        let dir = scratch.path().join("string_0001");
        std::fs::create_dir_all(&dir).unwrap();
        let frames = vec![
            XyzFrame {
                comment: "0.0".into(),
                molecule: chain_with_torsion(0.0),
            },
            XyzFrame {
                comment: "0.1".into(),
                molecule: chain_with_torsion(10.0),
            },
        ];
        XyzFile::write_to_path(&frames, dir.join("opt_converged_001.xyz")).unwrap();

        let report = run(scratch.path(), &config(), &ProgressReporter::new()).unwrap();
        assert_eq!(report.conformers.len(), 1);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].0, 1);
        // only one stereochemistry observed, so no gap
        assert!(report.stereo_gap.is_none());
    }

    #[test]
    fn unfinished_and_unrelated_directories_are_skipped() {
        let scratch = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(scratch.path().join("string_0007")).unwrap(); // no output yet
        std::fs::create_dir_all(scratch.path().join("notes")).unwrap();

        let report = run(scratch.path(), &config(), &ProgressReporter::new()).unwrap();
        assert!(report.conformers.is_empty());
        assert!(report.failures.is_empty());
        assert!(report.table.is_empty());
    }
}
