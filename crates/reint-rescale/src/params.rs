use reint_core::errors::{ErrorInfo, ReintError};
use reint_core::serde_io;
use serde::{Deserialize, Serialize};

fn default_coupling_min() -> f64 {
    1e-4
}

fn default_coupling_max() -> f64 {
    4.0
}

fn default_tolerance() -> f64 {
    1e-9
}

fn default_max_iters() -> usize {
    200
}

fn default_threads() -> usize {
    1
}

/// Bracketed root-finding strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SolverMethod {
    /// Interval halving.
    #[default]
    Bisection,
    /// Brent's method: inverse quadratic interpolation with bisection fallback.
    Brent,
}

/// Options controlling the coupling rescaler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RescaleOpts {
    /// Lower edge of the coupling search range.
    #[serde(default = "default_coupling_min")]
    pub coupling_min: f64,
    /// Upper edge of the coupling search range.
    #[serde(default = "default_coupling_max")]
    pub coupling_max: f64,
    /// Absolute tolerance on the solved coupling.
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
    /// Iteration cap per mass point.
    #[serde(default = "default_max_iters")]
    pub max_iters: usize,
    /// Root-finding strategy.
    #[serde(default)]
    pub method: SolverMethod,
    /// Worker threads used for independent mass points.
    #[serde(default = "default_threads")]
    pub threads: usize,
}

impl Default for RescaleOpts {
    fn default() -> Self {
        Self {
            coupling_min: default_coupling_min(),
            coupling_max: default_coupling_max(),
            tolerance: default_tolerance(),
            max_iters: default_max_iters(),
            method: SolverMethod::default(),
            threads: default_threads(),
        }
    }
}

impl RescaleOpts {
    /// Parses options from YAML; missing keys take their defaults.
    pub fn from_yaml_slice(data: &[u8]) -> Result<Self, ReintError> {
        let opts: Self = serde_io::from_yaml_slice(data)?;
        opts.validate()?;
        Ok(opts)
    }

    /// Rejects search ranges and tolerances the solver cannot work with.
    pub fn validate(&self) -> Result<(), ReintError> {
        let invalid = |code: &str, message: &str| {
            ReintError::MalformedInput(
                ErrorInfo::new(code, message)
                    .with_context("coupling_min", self.coupling_min.to_string())
                    .with_context("coupling_max", self.coupling_max.to_string())
                    .with_context("tolerance", self.tolerance.to_string()),
            )
        };
        if !(self.coupling_min.is_finite() && self.coupling_min > 0.0) {
            return Err(invalid("coupling-range", "coupling_min must be finite and > 0"));
        }
        if !(self.coupling_max.is_finite() && self.coupling_max > self.coupling_min) {
            return Err(invalid(
                "coupling-range",
                "coupling_max must be finite and above coupling_min",
            ));
        }
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(invalid("solver-tolerance", "tolerance must be finite and > 0"));
        }
        if self.max_iters == 0 {
            return Err(invalid("solver-iterations", "max_iters must be at least 1"));
        }
        Ok(())
    }
}
