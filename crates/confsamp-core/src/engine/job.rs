use super::config::GsmConfig;
use super::error::EngineError;
use crate::core::io::traits::TrajectoryFile;
use crate::core::io::xyz::{XyzFile, XyzFrame};
use crate::core::models::driving::DrivingCoordinate;
use crate::core::models::molecule::Molecule;
use crate::core::topology::Topology;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{info, instrument};

/// Prefix of per-job working directories under the scratch root.
pub const STRING_DIR_PREFIX: &str = "string_";

/// One growing-string job: a single conformer, the driving coordinates
/// biasing its search, and the run configuration.
///
/// Jobs are side-effect-isolated: everything a job touches lives under its
/// own working directory, so any number of jobs can run concurrently from
/// the same scratch root.
pub struct GsmJob<'a> {
    index: usize,
    conformer: &'a Molecule,
    driving_coordinates: &'a [DrivingCoordinate],
    config: &'a GsmConfig,
    scratch_root: &'a Path,
}

impl<'a> GsmJob<'a> {
    pub fn new(
        index: usize,
        conformer: &'a Molecule,
        driving_coordinates: &'a [DrivingCoordinate],
        config: &'a GsmConfig,
        scratch_root: &'a Path,
    ) -> Self {
        Self {
            index,
            conformer,
            driving_coordinates,
            config,
            scratch_root,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// The job's private working directory, `<scratch>/string_NNNN`.
    pub fn working_dir(&self) -> PathBuf {
        self.scratch_root
            .join(format!("{}{:04}", STRING_DIR_PREFIX, self.index))
    }

    fn initial_xyz_name(&self) -> String {
        format!("initial{:04}.xyz", self.index)
    }

    fn isomers_name(&self) -> String {
        format!("ISOMERS{:04}", self.index)
    }

    /// The converged path trajectory the driver writes on success.
    pub fn converged_path_file(&self) -> PathBuf {
        self.working_dir()
            .join(format!("opt_converged_{:03}.xyz", self.index))
    }

    /// Creates the working directory and writes the driver's input files:
    /// the starting structure and the isomer (driving-coordinate) file.
    ///
    /// Validates every driving coordinate against the conformer first and
    /// merges ADD bonds into the perceived topology, logging each bond that
    /// perception alone would have missed. Re-preparing an existing directory
    /// is allowed; inputs are simply overwritten.
    #[instrument(skip_all, fields(job = self.index))]
    pub fn prepare(&self) -> Result<(), EngineError> {
        self.validate_driving_coordinates()?;

        let mut topology = Topology::perceive(self.conformer);
        let added = topology.merge_driving_bonds(self.driving_coordinates);
        info!(
            "Topology: {} bonds perceived, {} reactive bond(s) merged",
            topology.bond_count() - added.len(),
            added.len()
        );

        let dir = self.working_dir();
        std::fs::create_dir_all(&dir)?;

        let frame = XyzFrame {
            comment: format!("conformer {}", self.index),
            molecule: self.conformer.clone(),
        };
        XyzFile::write_to_path(std::slice::from_ref(&frame), dir.join(self.initial_xyz_name()))?;

        let isomers = self
            .driving_coordinates
            .iter()
            .map(|dc| dc.to_string())
            .collect::<Vec<_>>()
            .join("\n");
        std::fs::write(dir.join(self.isomers_name()), isomers + "\n")?;

        info!("Prepared job inputs in {}", dir.display());
        Ok(())
    }

    /// Spawns the external driver in the working directory and waits for it.
    ///
    /// The driver's stdout/stderr go to `output.txt`/`error.txt` in the
    /// working directory, matching the layout a batch scheduler would use. A
    /// non-zero exit status is an error; whatever diagnostics the driver
    /// produced stay in its log files.
    #[instrument(skip_all, fields(job = self.index))]
    pub fn run(&self) -> Result<(), EngineError> {
        let dir = self.working_dir();
        let stdout = File::create(dir.join("output.txt"))?;
        let stderr = File::create(dir.join("error.txt"))?;

        let config = self.config;
        let mut command = Command::new(&config.program);
        command
            .current_dir(&dir)
            .stdout(stdout)
            .stderr(stderr)
            .arg("-xyzfile")
            .arg(self.initial_xyz_name())
            .arg("-isomers")
            .arg(self.isomers_name())
            .arg("-mode")
            .arg("SE_GSM")
            .arg("-ID")
            .arg(self.index.to_string())
            .arg("-num_nodes")
            .arg(config.nnodes.to_string())
            .arg("-optimizer")
            .arg("eigenvector_follow")
            .arg("-linesearch")
            .arg("backtrack")
            .arg("-conv_tol")
            .arg(config.opt_threshold.to_string())
            .arg("-conv_Ediff")
            .arg(config.conv_ediff.to_string())
            .arg("-DMAX")
            .arg(config.dmax.to_string())
            .arg("-max_step")
            .arg(config.abs_max_step.to_string())
            .arg("-max_opt_steps")
            .arg(config.max_opt_steps.to_string())
            .arg("-charge")
            .arg(config.charge.to_string())
            .arg("-multiplicity")
            .arg(config.multiplicity.to_string())
            .arg("-nproc")
            .arg(config.num_cpus.to_string())
            .args(&config.extra_args);

        info!("Launching {} in {}", config.program.display(), dir.display());
        let status = command.status()?;
        if !status.success() {
            return Err(EngineError::ExternalTool {
                program: config.program.display().to_string(),
                status: status.to_string(),
            });
        }
        Ok(())
    }

    /// Prepares, runs, and returns the converged path file.
    pub fn execute(&self) -> Result<PathBuf, EngineError> {
        self.prepare()?;
        self.run()?;
        let path = self.converged_path_file();
        if !path.exists() {
            return Err(EngineError::MissingOutput { path });
        }
        Ok(path)
    }

    fn validate_driving_coordinates(&self) -> Result<(), EngineError> {
        let atom_count = self.conformer.atom_count();
        for dc in self.driving_coordinates {
            let (i, j) = dc.atoms();
            for index in [i, j] {
                if index >= atom_count {
                    return Err(EngineError::DrivingCoordinateOutOfRange { index, atom_count });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::element::Element;
    use crate::core::models::molecule::Atom;
    use crate::engine::config::GsmConfigBuilder;
    use nalgebra::Point3;

    fn ethane_like() -> Molecule {
        let c: Element = "C".parse().unwrap();
        let h: Element = "H".parse().unwrap();
        Molecule::new(vec![
            Atom::new(c, Point3::new(0.0, 0.0, 0.0)),
            Atom::new(c, Point3::new(1.5, 0.0, 0.0)),
            Atom::new(h, Point3::new(-0.6, 0.9, 0.0)),
            Atom::new(h, Point3::new(2.1, 0.9, 0.0)),
        ])
    }

    fn config(program: &str) -> GsmConfig {
        GsmConfigBuilder::new()
            .program(PathBuf::from(program))
            .build()
            .unwrap()
    }

    #[test]
    fn prepare_writes_structure_and_isomer_files() {
        let scratch = tempfile::tempdir().unwrap();
        let molecule = ethane_like();
        let driving = vec![DrivingCoordinate::Add(2, 3), DrivingCoordinate::Break(0, 1)];
        let config = config("gsm");
        let job = GsmJob::new(3, &molecule, &driving, &config, scratch.path());

        job.prepare().unwrap();

        let dir = scratch.path().join("string_0003");
        assert!(dir.join("initial0003.xyz").exists());
        let isomers = std::fs::read_to_string(dir.join("ISOMERS0003")).unwrap();
        assert_eq!(isomers, "ADD 2 3\nBREAK 0 1\n");

        let frames = XyzFile::read_from_path(dir.join("initial0003.xyz")).unwrap();
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].molecule, molecule);
    }

    #[test]
    fn prepare_rejects_out_of_range_driving_atoms() {
        let scratch = tempfile::tempdir().unwrap();
        let molecule = ethane_like();
        let driving = vec![DrivingCoordinate::Add(2, 17)];
        let config = config("gsm");
        let job = GsmJob::new(0, &molecule, &driving, &config, scratch.path());

        let err = job.prepare().unwrap_err();
        assert!(matches!(
            err,
            EngineError::DrivingCoordinateOutOfRange {
                index: 17,
                atom_count: 4
            }
        ));
        // nothing should have been written
        assert!(!scratch.path().join("string_0000").exists());
    }

    #[test]
    #[cfg(unix)]
    fn run_succeeds_with_a_trivial_program() {
        let scratch = tempfile::tempdir().unwrap();
        let molecule = ethane_like();
        let driving = vec![DrivingCoordinate::Add(0, 3)];
        let config = config("true");
        let job = GsmJob::new(0, &molecule, &driving, &config, scratch.path());

        job.prepare().unwrap();
        job.run().unwrap();
        assert!(scratch.path().join("string_0000").join("output.txt").exists());
    }

    #[test]
    #[cfg(unix)]
    fn failing_program_maps_to_external_tool_error() {
        let scratch = tempfile::tempdir().unwrap();
        let molecule = ethane_like();
        let driving = vec![DrivingCoordinate::Add(0, 3)];
        let config = config("false");
        let job = GsmJob::new(1, &molecule, &driving, &config, scratch.path());

        job.prepare().unwrap();
        let err = job.run().unwrap_err();
        assert!(matches!(err, EngineError::ExternalTool { .. }));
    }

    #[test]
    #[cfg(unix)]
    fn execute_reports_missing_converged_output() {
        let scratch = tempfile::tempdir().unwrap();
        let molecule = ethane_like();
        let driving = vec![DrivingCoordinate::Add(0, 3)];
        let config = config("true");
        let job = GsmJob::new(2, &molecule, &driving, &config, scratch.path());

        let err = job.execute().unwrap_err();
        assert!(matches!(err, EngineError::MissingOutput { .. }));
    }
}
