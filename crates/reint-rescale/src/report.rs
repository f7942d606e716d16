use reint_core::errors::ReintError;
use reint_core::{input_hash, Benchmark, ExclusionCurve, RunProvenance, SchemaVersion};
use serde::{Deserialize, Serialize};

use crate::contour::Contour;
use crate::rescale::{RescaledCurve, UnresolvedReason};

/// Schema of [`RescaleReport`] payloads.
pub const REPORT_SCHEMA: SchemaVersion = SchemaVersion::new(1, 0, 0);

/// A mass point that did not resolve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnresolvedPoint {
    /// Mediator mass in GeV.
    pub mediator_mass: f64,
    /// Failure category.
    pub reason: UnresolvedReason,
}

/// Mass span of one extracted contour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContourSummary {
    /// Lowest mediator mass.
    pub mass_min: f64,
    /// Highest mediator mass.
    pub mass_max: f64,
    /// Number of points.
    pub points: usize,
}

/// Diagnostic record of one rescaling run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RescaleReport {
    /// Payload schema.
    pub schema_version: SchemaVersion,
    /// Input hash, oracle and tool versions.
    pub provenance: RunProvenance,
    /// Source benchmark name.
    pub source: String,
    /// Target benchmark name.
    pub target: String,
    /// Number of resolved points.
    pub resolved: usize,
    /// Points without a rescaled coupling.
    pub unresolved: Vec<UnresolvedPoint>,
    /// Extracted contours.
    pub contours: Vec<ContourSummary>,
}

impl RescaleReport {
    /// Builds the report for a finished run.
    pub fn build(
        curve: &ExclusionCurve,
        source: &Benchmark,
        target: &Benchmark,
        oracle: &str,
        rescaled: &RescaledCurve,
        contours: &[Contour],
    ) -> Result<Self, ReintError> {
        let mut provenance = RunProvenance::new(input_hash(curve, source, target)?, oracle);
        provenance.tool_versions.insert(
            env!("CARGO_PKG_NAME").to_string(),
            env!("CARGO_PKG_VERSION").to_string(),
        );
        Ok(Self {
            schema_version: REPORT_SCHEMA,
            provenance,
            source: source.name.clone(),
            target: target.name.clone(),
            resolved: rescaled.resolved_count(),
            unresolved: rescaled
                .unresolved()
                .into_iter()
                .map(|(mediator_mass, reason)| UnresolvedPoint {
                    mediator_mass,
                    reason,
                })
                .collect(),
            contours: contours
                .iter()
                .map(|contour| {
                    let (mass_min, mass_max) = contour.mass_range();
                    ContourSummary {
                        mass_min,
                        mass_max,
                        points: contour.len(),
                    }
                })
                .collect(),
        })
    }
}
