use reint_core::errors::{ErrorInfo, ReintError};
use reint_core::{Benchmark, LimitPoint};

use crate::oracle::{CrossSectionOracle, OracleQuery};

fn divergence(point: &LimitPoint, benchmark: &Benchmark, coupling: f64, value: f64) -> ReintError {
    ReintError::NumericDivergence(
        ErrorInfo::new(
            "oracle-divergence",
            "oracle returned a non-finite or negative prediction",
        )
        .with_context("mmed", point.mediator_mass().to_string())
        .with_context("mdm", point.dm_mass().to_string())
        .with_context("benchmark", benchmark.name.clone())
        .with_context("coupling", coupling.to_string())
        .with_context("value", value.to_string()),
    )
}

/// Turns oracle predictions into comparable exclusion depths.
///
/// `depth` is the raw predicted signal of a model point; dividing it by the
/// depth of the published limit point gives the exclusion depth, which is 1
/// on the original limit by construction.
#[derive(Clone, Copy)]
pub struct ExclusionDepthEngine<'a> {
    oracle: &'a dyn CrossSectionOracle,
}

impl std::fmt::Debug for ExclusionDepthEngine<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExclusionDepthEngine")
            .field("oracle", &self.oracle.name())
            .finish()
    }
}

impl<'a> ExclusionDepthEngine<'a> {
    /// Wraps an oracle.
    pub fn new(oracle: &'a dyn CrossSectionOracle) -> Self {
        Self { oracle }
    }

    /// Name of the wrapped oracle.
    pub fn oracle_name(&self) -> &str {
        self.oracle.name()
    }

    /// Signal depth of `point`'s masses under `benchmark` with `gq = coupling`.
    ///
    /// Non-finite or negative predictions become
    /// [`ReintError::NumericDivergence`].
    pub fn depth(
        &self,
        point: &LimitPoint,
        benchmark: &Benchmark,
        coupling: f64,
    ) -> Result<f64, ReintError> {
        let query = OracleQuery {
            mediator_mass: point.mediator_mass(),
            dm_mass: point.dm_mass(),
            gq: coupling,
            gdm: benchmark.gdm,
            gl: benchmark.gl,
            coupling_type: benchmark.coupling_type,
        };
        let value = self.oracle.evaluate(&query)?;
        if !value.is_finite() || value < 0.0 {
            return Err(divergence(point, benchmark, coupling, value));
        }
        Ok(value)
    }

    /// Depth implied by the published limit itself.
    pub fn limit_depth(&self, point: &LimitPoint, benchmark: &Benchmark) -> Result<f64, ReintError> {
        self.depth(point, benchmark, point.coupling_limit())
    }

    /// Exclusion depth of a model point relative to a reference depth.
    pub fn exclusion_depth(
        &self,
        point: &LimitPoint,
        benchmark: &Benchmark,
        coupling: f64,
        reference: f64,
    ) -> Result<f64, ReintError> {
        if !(reference.is_finite() && reference > 0.0) {
            return Err(divergence(point, benchmark, coupling, reference));
        }
        Ok(self.depth(point, benchmark, coupling)? / reference)
    }
}
