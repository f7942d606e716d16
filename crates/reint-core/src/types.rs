use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{ErrorInfo, ReintError};

fn require_positive(field: &str, value: f64) -> Result<f64, ReintError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ReintError::MalformedInput(
            ErrorInfo::new("non-positive-value", format!("{field} must be finite and > 0"))
                .with_context("field", field)
                .with_context("value", value.to_string()),
        ))
    }
}

fn require_non_negative(field: &str, value: f64) -> Result<f64, ReintError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(ReintError::MalformedInput(
            ErrorInfo::new("negative-value", format!("{field} must be finite and >= 0"))
                .with_context("field", field)
                .with_context("value", value.to_string()),
        ))
    }
}

/// Lorentz structure of the mediator couplings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CouplingType {
    /// Axial-vector couplings to quarks, leptons and dark matter.
    Axial,
    /// Vector couplings to quarks, leptons and dark matter.
    Vector,
}

impl CouplingType {
    /// Returns the lowercase label used in JSON payloads.
    pub fn as_str(&self) -> &'static str {
        match self {
            CouplingType::Axial => "axial",
            CouplingType::Vector => "vector",
        }
    }
}

impl fmt::Display for CouplingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CouplingType {
    type Err = ReintError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "axial" => Ok(CouplingType::Axial),
            "vector" => Ok(CouplingType::Vector),
            other => Err(ReintError::MalformedInput(
                ErrorInfo::new("unknown-coupling", "coupling must be 'axial' or 'vector'")
                    .with_context("coupling", other),
            )),
        }
    }
}

/// Single point of an exclusion limit.
///
/// Construction goes through [`LimitPoint::new`], so every instance carries
/// strictly positive, finite masses and coupling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "LimitPointRepr")]
pub struct LimitPoint {
    mediator_mass: f64,
    dm_mass: f64,
    coupling_limit: f64,
}

#[derive(Deserialize)]
struct LimitPointRepr {
    mediator_mass: f64,
    dm_mass: f64,
    coupling_limit: f64,
}

impl TryFrom<LimitPointRepr> for LimitPoint {
    type Error = ReintError;

    fn try_from(repr: LimitPointRepr) -> Result<Self, Self::Error> {
        LimitPoint::new(repr.mediator_mass, repr.dm_mass, repr.coupling_limit)
    }
}

impl LimitPoint {
    /// Validates and creates a limit point.
    pub fn new(mediator_mass: f64, dm_mass: f64, coupling_limit: f64) -> Result<Self, ReintError> {
        Ok(Self {
            mediator_mass: require_positive("mediator_mass", mediator_mass)?,
            dm_mass: require_positive("dm_mass", dm_mass)?,
            coupling_limit: require_positive("coupling_limit", coupling_limit)?,
        })
    }

    /// Mediator mass in GeV.
    pub fn mediator_mass(&self) -> f64 {
        self.mediator_mass
    }

    /// Dark matter mass in GeV.
    pub fn dm_mass(&self) -> f64 {
        self.dm_mass
    }

    /// Upper limit on the quark coupling.
    pub fn coupling_limit(&self) -> f64 {
        self.coupling_limit
    }

    /// Returns a copy carrying a different coupling limit.
    pub fn with_coupling(&self, coupling_limit: f64) -> Result<Self, ReintError> {
        LimitPoint::new(self.mediator_mass, self.dm_mass, coupling_limit)
    }

    /// Returns a copy carrying a different dark matter mass.
    pub fn with_dm_mass(&self, dm_mass: f64) -> Result<Self, ReintError> {
        LimitPoint::new(self.mediator_mass, dm_mass, self.coupling_limit)
    }
}

/// Exclusion limit ordered by strictly ascending mediator mass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExclusionCurve {
    points: Vec<LimitPoint>,
}

impl ExclusionCurve {
    /// Builds a curve from already validated points, checking the ordering.
    pub fn from_points(points: Vec<LimitPoint>) -> Result<Self, ReintError> {
        if points.is_empty() {
            return Err(ReintError::malformed(
                "empty-curve",
                "an exclusion curve needs at least one point",
            ));
        }
        for (idx, pair) in points.windows(2).enumerate() {
            if pair[1].mediator_mass <= pair[0].mediator_mass {
                return Err(ReintError::MalformedInput(
                    ErrorInfo::new(
                        "unsorted-masses",
                        "mediator masses must be strictly ascending",
                    )
                    .with_context("index", (idx + 1).to_string())
                    .with_context("previous", pair[0].mediator_mass.to_string())
                    .with_context("mass", pair[1].mediator_mass.to_string()),
                ));
            }
        }
        Ok(Self { points })
    }

    /// Builds a curve from the parallel arrays found in limit files.
    pub fn from_arrays(mmed: &[f64], mdm: &[f64], gq_limit: &[f64]) -> Result<Self, ReintError> {
        if mmed.len() != gq_limit.len() || mmed.len() != mdm.len() {
            return Err(ReintError::MalformedInput(
                ErrorInfo::new("length-mismatch", "limit arrays must have the same length")
                    .with_context("mmed", mmed.len().to_string())
                    .with_context("mdm", mdm.len().to_string())
                    .with_context("gq_limit", gq_limit.len().to_string()),
            ));
        }
        let points = mmed
            .iter()
            .zip(mdm)
            .zip(gq_limit)
            .enumerate()
            .map(|(idx, ((&mass, &dm), &gq))| {
                LimitPoint::new(mass, dm, gq).map_err(|err| match err {
                    ReintError::MalformedInput(info) => {
                        ReintError::MalformedInput(info.with_context("index", idx.to_string()))
                    }
                    other => other,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_points(points)
    }

    /// Points in mass order.
    pub fn points(&self) -> &[LimitPoint] {
        &self.points
    }

    /// Number of mass points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the curve holds no points (never true for a validated curve).
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Mediator masses in order.
    pub fn masses(&self) -> Vec<f64> {
        self.points.iter().map(LimitPoint::mediator_mass).collect()
    }
}

/// How a benchmark fixes the dark matter mass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum DarkMatterMass {
    /// Constant dark matter mass in GeV.
    Fixed(f64),
    /// Dark matter mass as a fixed fraction of the mediator mass.
    MediatorFraction(f64),
}

impl DarkMatterMass {
    /// Resolves the dark matter mass at the given mediator mass.
    pub fn resolve(&self, mediator_mass: f64) -> f64 {
        match *self {
            DarkMatterMass::Fixed(mass) => mass,
            DarkMatterMass::MediatorFraction(fraction) => fraction * mediator_mass,
        }
    }

    fn validate(&self) -> Result<(), ReintError> {
        match *self {
            DarkMatterMass::Fixed(mass) => require_positive("mdm", mass).map(|_| ()),
            DarkMatterMass::MediatorFraction(fraction) => {
                require_positive("mdm_fraction", fraction).map(|_| ())
            }
        }
    }
}

/// Named simplified-model coupling configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Benchmark {
    /// Registry key.
    pub name: String,
    /// Nominal quark coupling; the rescaler solves for this coupling.
    pub gq: f64,
    /// Dark matter coupling.
    pub gdm: f64,
    /// Lepton coupling.
    pub gl: f64,
    /// Vector or axial-vector mediator.
    pub coupling_type: CouplingType,
    /// Dark matter mass prescription.
    pub dm_mass: DarkMatterMass,
    /// Centre-of-mass energy in TeV.
    pub ecm_sqrt: f64,
    /// PDF set identifier forwarded to cross-section calculators.
    pub pdfset: String,
    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Benchmark {
    /// Checks couplings and masses against the data model.
    pub fn validate(&self) -> Result<(), ReintError> {
        if self.name.trim().is_empty() {
            return Err(ReintError::malformed(
                "empty-benchmark-name",
                "benchmark name must not be empty",
            ));
        }
        let context = |err: ReintError| match err {
            ReintError::MalformedInput(info) => {
                ReintError::MalformedInput(info.with_context("benchmark", self.name.clone()))
            }
            other => other,
        };
        require_non_negative("gq", self.gq).map_err(context)?;
        require_non_negative("gdm", self.gdm).map_err(context)?;
        require_non_negative("gl", self.gl).map_err(context)?;
        require_positive("ecm_sqrt", self.ecm_sqrt).map_err(context)?;
        self.dm_mass.validate().map_err(context)?;
        Ok(())
    }

    /// Dark matter mass at the given mediator mass.
    pub fn dm_mass_at(&self, mediator_mass: f64) -> f64 {
        self.dm_mass.resolve(mediator_mass)
    }
}
