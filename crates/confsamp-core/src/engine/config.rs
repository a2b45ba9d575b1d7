use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Invalid parameter {name}: {reason}")]
    InvalidParameter {
        name: &'static str,
        reason: String,
    },
}

/// Configuration of one external growing-string run.
///
/// Defaults follow the single-ended search setup this toolkit was built
/// around; only the driver program itself has no sensible default.
#[derive(Debug, Clone, PartialEq)]
pub struct GsmConfig {
    /// The external string-method driver executable.
    pub program: PathBuf,
    /// Extra arguments appended verbatim after the generated ones.
    pub extra_args: Vec<String>,
    /// Number of nodes grown along the string.
    pub nnodes: usize,
    /// Convergence threshold for node optimization (hartree/bohr gradient).
    pub opt_threshold: f64,
    /// Maximum optimizer step size.
    pub dmax: f64,
    /// Absolute cap on any single optimization step.
    pub abs_max_step: f64,
    /// Energy-difference convergence criterion, kcal/mol.
    pub conv_ediff: f64,
    /// Maximum optimization steps per node.
    pub max_opt_steps: usize,
    pub charge: i32,
    pub multiplicity: u32,
    /// CPU cores handed to the driver for each job.
    pub num_cpus: usize,
}

pub struct GsmConfigBuilder {
    program: Option<PathBuf>,
    extra_args: Vec<String>,
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

impl Default for GsmConfigBuilder {
    fn default() -> Self {
        Self {
            program: None,
            extra_args: Vec::new(),
            nnodes: None,
            opt_threshold: None,
            dmax: None,
            abs_max_step: None,
            conv_ediff: None,
            max_opt_steps: None,
            charge: None,
            multiplicity: None,
            num_cpus: None,
        }
    }
}

impl GsmConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn program(mut self, path: PathBuf) -> Self {
        self.program = Some(path);
        self
    }
    pub fn extra_args(mut self, args: Vec<String>) -> Self {
        self.extra_args = args;
        self
    }
    pub fn nnodes(mut self, n: usize) -> Self {
        self.nnodes = Some(n);
        self
    }
    pub fn opt_threshold(mut self, threshold: f64) -> Self {
        self.opt_threshold = Some(threshold);
        self
    }
    pub fn dmax(mut self, dmax: f64) -> Self {
        self.dmax = Some(dmax);
        self
    }
    pub fn abs_max_step(mut self, step: f64) -> Self {
        self.abs_max_step = Some(step);
        self
    }
    pub fn conv_ediff(mut self, ediff: f64) -> Self {
        self.conv_ediff = Some(ediff);
        self
    }
    pub fn max_opt_steps(mut self, steps: usize) -> Self {
        self.max_opt_steps = Some(steps);
        self
    }
    pub fn charge(mut self, charge: i32) -> Self {
        self.charge = Some(charge);
        self
    }
    pub fn multiplicity(mut self, multiplicity: u32) -> Self {
        self.multiplicity = Some(multiplicity);
        self
    }
    pub fn num_cpus(mut self, cpus: usize) -> Self {
        self.num_cpus = Some(cpus);
        self
    }

    pub fn build(self) -> Result<GsmConfig, ConfigError> {
        let config = GsmConfig {
            program: self
                .program
                .ok_or(ConfigError::MissingParameter("program"))?,
            extra_args: self.extra_args,
            nnodes: self.nnodes.unwrap_or(7),
            opt_threshold: self.opt_threshold.unwrap_or(0.005),
            dmax: self.dmax.unwrap_or(0.5),
            abs_max_step: self.abs_max_step.unwrap_or(0.5),
            conv_ediff: self.conv_ediff.unwrap_or(0.5),
            max_opt_steps: self.max_opt_steps.unwrap_or(2),
            charge: self.charge.unwrap_or(0),
            multiplicity: self.multiplicity.unwrap_or(1),
            num_cpus: self.num_cpus.unwrap_or(1),
        };

        if config.nnodes < 3 {
            return Err(ConfigError::InvalidParameter {
                name: "nnodes",
                reason: format!("a string needs at least 3 nodes, got {}", config.nnodes),
            });
        }
        if config.opt_threshold <= 0.0 {
            return Err(ConfigError::InvalidParameter {
                name: "opt_threshold",
                reason: format!("must be positive, got {}", config.opt_threshold),
            });
        }
        if config.multiplicity == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "multiplicity",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(config)
    }
}
