use crate::cli::RunArgs;
use crate::error::{CliError, Result};
use confsamp::analysis::conformer::{TorsionSpec, TorsionSpecs};
use confsamp::core::models::driving::DrivingCoordinate;
use confsamp::engine::config as core_config;
use confsamp::workflows::analyze::{self, AnalyzeConfig};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct PartialGsmConfig {
    program: Option<PathBuf>,
    extra_args: Option<Vec<String>>,
    nnodes: Option<usize>,
    opt_threshold: Option<f64>,
    dmax: Option<f64>,
    abs_max_step: Option<f64>,
    conv_ediff: Option<f64>,
    max_opt_steps: Option<usize>,
    charge: Option<i32>,
    multiplicity: Option<u32>,
    num_cpus: Option<usize>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialDrivingConfig {
    /// One entry per driving coordinate, e.g. `"ADD 56 80"` or `"BREAK 10 11"`.
    coordinates: Vec<String>,
}

#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct PartialAnalysisConfig {
    forming_bond_torsion: TorsionSpec,
    facial_torsion: TorsionSpec,
    temperature: Option<f64>,
}

/// The on-disk TOML configuration, every field optional so the CLI can fill
/// the gaps.
#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct PartialSearchConfig {
    gsm: Option<PartialGsmConfig>,
    driving: Option<PartialDrivingConfig>,
    analysis: Option<PartialAnalysisConfig>,
}

impl PartialSearchConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    /// Merges the `[gsm]` section with CLI overrides into a validated driver
    /// configuration. CLI arguments win over file values.
    pub fn build_gsm(&self, args: &RunArgs) -> Result<core_config::GsmConfig> {
        let file = self.gsm.as_ref();

        let program = args
            .program
            .clone()
            .or_else(|| file.and_then(|g| g.program.clone()))
            .ok_or_else(|| {
                CliError::Config(
                    "A value for 'gsm.program' is required either in the config file or via --program."
                        .to_string(),
                )
            })?;

        let mut builder = core_config::GsmConfigBuilder::new().program(program);
        if let Some(extra) = file.and_then(|g| g.extra_args.clone()) {
            builder = builder.extra_args(extra);
        }
        if let Some(n) = args.nnodes.or(file.and_then(|g| g.nnodes)) {
            builder = builder.nnodes(n);
        }
        if let Some(t) = file.and_then(|g| g.opt_threshold) {
            builder = builder.opt_threshold(t);
        }
        if let Some(d) = file.and_then(|g| g.dmax) {
            builder = builder.dmax(d);
        }
        if let Some(s) = file.and_then(|g| g.abs_max_step) {
            builder = builder.abs_max_step(s);
        }
        if let Some(e) = file.and_then(|g| g.conv_ediff) {
            builder = builder.conv_ediff(e);
        }
        if let Some(s) = file.and_then(|g| g.max_opt_steps) {
            builder = builder.max_opt_steps(s);
        }
        if let Some(c) = args.charge.or(file.and_then(|g| g.charge)) {
            builder = builder.charge(c);
        }
        if let Some(m) = args.multiplicity.or(file.and_then(|g| g.multiplicity)) {
            builder = builder.multiplicity(m);
        }
        if let Some(n) = args.num_cpus.or(file.and_then(|g| g.num_cpus)) {
            builder = builder.num_cpus(n);
        }

        builder.build().map_err(|e| CliError::Config(e.to_string()))
    }

    /// Parses the `[driving]` coordinate lines. At least one is required to
    /// define the reaction.
    pub fn driving_coordinates(&self) -> Result<Vec<DrivingCoordinate>> {
        let lines = self
            .driving
            .as_ref()
            .map(|d| d.coordinates.as_slice())
            .unwrap_or_default();
        if lines.is_empty() {
            return Err(CliError::Config(
                "`driving.coordinates` must list at least one coordinate (e.g. \"ADD 56 80\")."
                    .to_string(),
            ));
        }
        lines
            .iter()
            .map(|line| {
                line.parse()
                    .map_err(|e| CliError::Config(format!("Invalid driving coordinate: {}", e)))
            })
            .collect()
    }

    /// Builds the analysis configuration from the `[analysis]` section, with
    /// an optional temperature override from the CLI.
    pub fn build_analysis(&self, temperature_override: Option<f64>) -> Result<AnalyzeConfig> {
        let section = self.analysis.as_ref().ok_or_else(|| {
            CliError::Config("`analysis` section is required for this command.".to_string())
        })?;

        let temperature = temperature_override
            .or(section.temperature)
            .unwrap_or(analyze::DEFAULT_ANALYSIS_TEMPERATURE);
        if temperature <= 0.0 {
            return Err(CliError::Config(format!(
                "`analysis.temperature` must be positive, got {}.",
                temperature
            )));
        }

        Ok(AnalyzeConfig {
            torsions: TorsionSpecs {
                forming_bond: section.forming_bond_torsion,
                facial: section.facial_torsion,
            },
            temperature,
        })
    }
}
