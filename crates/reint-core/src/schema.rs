//! JSON payloads exchanged with the limit producers.

use serde::{Deserialize, Serialize};

use crate::errors::{ErrorInfo, ReintError};
use crate::types::{Benchmark, CouplingType, DarkMatterMass, ExclusionCurve};

/// Default PDF set recorded for dijet benchmarks.
pub const DEFAULT_PDFSET: &str = "NNPDF31_nnlo_as_0118";

fn default_ecm_sqrt() -> f64 {
    13.0
}

fn default_pdfset() -> String {
    DEFAULT_PDFSET.to_string()
}

fn default_gdm() -> f64 {
    1.0
}

/// Published coupling limit as parallel arrays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LimitInput {
    /// Mediator masses in GeV, ascending.
    pub mmed: Vec<f64>,
    /// Dark matter masses in GeV, one per mediator mass.
    pub mdm: Vec<f64>,
    /// Observed upper limits on the quark coupling.
    pub gq_limit: Vec<f64>,
}

impl LimitInput {
    /// Validates the arrays and converts them into an [`ExclusionCurve`].
    pub fn to_curve(&self) -> Result<ExclusionCurve, ReintError> {
        ExclusionCurve::from_arrays(&self.mmed, &self.mdm, &self.gq_limit)
    }

    /// Inverse of [`LimitInput::to_curve`].
    pub fn from_curve(curve: &ExclusionCurve) -> Self {
        let points = curve.points();
        Self {
            mmed: points.iter().map(|p| p.mediator_mass()).collect(),
            mdm: points.iter().map(|p| p.dm_mass()).collect(),
            gq_limit: points.iter().map(|p| p.coupling_limit()).collect(),
        }
    }
}

/// Benchmark description as found in source-info JSON and registry files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkSpec {
    /// Optional explicit benchmark name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Nominal quark coupling.
    #[serde(default)]
    pub gq: f64,
    /// Dark matter coupling.
    #[serde(default = "default_gdm")]
    pub gdm: f64,
    /// Lepton coupling.
    #[serde(default)]
    pub gl: f64,
    /// Fixed dark matter mass in GeV.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mdm: Option<f64>,
    /// Dark matter mass as a fraction of the mediator mass; wins over `mdm`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mdm_fraction: Option<f64>,
    /// `"axial"` or `"vector"`.
    pub coupling: String,
    /// Centre-of-mass energy in TeV.
    #[serde(default = "default_ecm_sqrt")]
    pub ecm_sqrt: f64,
    /// PDF set identifier.
    #[serde(default = "default_pdfset")]
    pub pdfset: String,
    /// Free-form description of the source analysis.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,
}

impl BenchmarkSpec {
    /// Converts the description into a validated [`Benchmark`].
    ///
    /// The name is taken from `name`, then `info`, then `fallback_name`.
    pub fn into_benchmark(self, fallback_name: &str) -> Result<Benchmark, ReintError> {
        let coupling_type: CouplingType = self.coupling.parse()?;
        let dm_mass = match (self.mdm_fraction, self.mdm) {
            (Some(fraction), _) => DarkMatterMass::MediatorFraction(fraction),
            (None, Some(mass)) => DarkMatterMass::Fixed(mass),
            (None, None) => {
                return Err(ReintError::MalformedInput(
                    ErrorInfo::new("missing-dm-mass", "benchmark needs 'mdm' or 'mdm_fraction'")
                        .with_context("benchmark", fallback_name),
                ))
            }
        };
        let name = self
            .name
            .clone()
            .or_else(|| self.info.clone())
            .unwrap_or_else(|| fallback_name.to_string());
        let benchmark = Benchmark {
            name,
            gq: self.gq,
            gdm: self.gdm,
            gl: self.gl,
            coupling_type,
            dm_mass,
            ecm_sqrt: self.ecm_sqrt,
            pdfset: self.pdfset,
            description: self.info,
        };
        benchmark.validate()?;
        Ok(benchmark)
    }

    /// Describes an existing benchmark.
    pub fn from_benchmark(benchmark: &Benchmark) -> Self {
        let (mdm, mdm_fraction) = match benchmark.dm_mass {
            DarkMatterMass::Fixed(mass) => (Some(mass), None),
            DarkMatterMass::MediatorFraction(fraction) => (None, Some(fraction)),
        };
        Self {
            name: Some(benchmark.name.clone()),
            gq: benchmark.gq,
            gdm: benchmark.gdm,
            gl: benchmark.gl,
            mdm,
            mdm_fraction,
            coupling: benchmark.coupling_type.to_string(),
            ecm_sqrt: benchmark.ecm_sqrt,
            pdfset: benchmark.pdfset.clone(),
            info: benchmark.description.clone(),
        }
    }
}
