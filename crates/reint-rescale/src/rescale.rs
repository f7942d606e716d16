use std::sync::atomic::{AtomicBool, Ordering};

use rayon::prelude::*;
use reint_core::errors::{ErrorInfo, ReintError};
use reint_core::{Benchmark, ExclusionCurve, LimitInput, LimitPoint};
use serde::{Deserialize, Serialize};

use crate::depth::ExclusionDepthEngine;
use crate::oracle::CrossSectionOracle;
use crate::params::RescaleOpts;
use crate::solver::{solve_monotone, Bracket, RootOutcome, SolverLimits};

/// Why a mass point has no rescaled coupling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnresolvedReason {
    /// The target needs a coupling below the search range.
    BelowRange,
    /// The target cannot reach the required depth inside the search range.
    AboveRange,
    /// The iteration cap was hit.
    NotConverged,
    /// The oracle returned a non-finite or negative prediction.
    NumericDivergence,
    /// The oracle rejected the query.
    OracleFailure,
}

impl UnresolvedReason {
    /// Classifies a recoverable per-point error.
    pub fn from_error(err: &ReintError) -> Self {
        match err {
            ReintError::Oracle(_) => UnresolvedReason::OracleFailure,
            ReintError::RescaleFailure(info) => match info.code.as_str() {
                BELOW_RANGE => UnresolvedReason::BelowRange,
                ABOVE_RANGE => UnresolvedReason::AboveRange,
                _ => UnresolvedReason::NotConverged,
            },
            _ => UnresolvedReason::NumericDivergence,
        }
    }
}

const BELOW_RANGE: &str = "below-range";
const ABOVE_RANGE: &str = "above-range";
const NOT_CONVERGED: &str = "not-converged";

/// One entry of a [`RescaledCurve`], aligned with the input mass grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum RescaledEntry {
    /// Coupling limit under the target configuration.
    Resolved(LimitPoint),
    /// No coupling in range reproduces the original depth.
    Unresolved {
        /// Mediator mass of the dropped point.
        mediator_mass: f64,
        /// Failure category.
        reason: UnresolvedReason,
    },
}

impl RescaledEntry {
    /// Mediator mass of the entry, resolved or not.
    pub fn mediator_mass(&self) -> f64 {
        match self {
            RescaledEntry::Resolved(point) => point.mediator_mass(),
            RescaledEntry::Unresolved { mediator_mass, .. } => *mediator_mass,
        }
    }

    /// The rescaled point, if any.
    pub fn resolved(&self) -> Option<&LimitPoint> {
        match self {
            RescaledEntry::Resolved(point) => Some(point),
            RescaledEntry::Unresolved { .. } => None,
        }
    }
}

/// Rescaled couplings on the original mass grid, gaps included.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RescaledCurve {
    entries: Vec<RescaledEntry>,
}

impl RescaledCurve {
    /// Builds a curve from entries, checking the mass ordering.
    pub fn from_entries(entries: Vec<RescaledEntry>) -> Result<Self, ReintError> {
        for (idx, pair) in entries.windows(2).enumerate() {
            if pair[1].mediator_mass() <= pair[0].mediator_mass() {
                return Err(ReintError::MalformedInput(
                    ErrorInfo::new(
                        "unsorted-masses",
                        "rescaled entries must be strictly ascending in mass",
                    )
                    .with_context("index", (idx + 1).to_string()),
                ));
            }
        }
        Ok(Self { entries })
    }

    /// Entries in mass order.
    pub fn entries(&self) -> &[RescaledEntry] {
        &self.entries
    }

    /// Number of entries, equal to the input curve length.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the curve has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of resolved entries.
    pub fn resolved_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.resolved().is_some())
            .count()
    }

    /// Unresolved masses with their reasons.
    pub fn unresolved(&self) -> Vec<(f64, UnresolvedReason)> {
        self.entries
            .iter()
            .filter_map(|entry| match entry {
                RescaledEntry::Unresolved {
                    mediator_mass,
                    reason,
                } => Some((*mediator_mass, *reason)),
                RescaledEntry::Resolved(_) => None,
            })
            .collect()
    }
}

/// Re-derives coupling limits under a new configuration at equal exclusion depth.
#[derive(Debug)]
pub struct CouplingRescaler<'a> {
    engine: ExclusionDepthEngine<'a>,
    opts: RescaleOpts,
}

impl<'a> CouplingRescaler<'a> {
    /// Creates a rescaler after validating the options.
    pub fn new(oracle: &'a dyn CrossSectionOracle, opts: RescaleOpts) -> Result<Self, ReintError> {
        opts.validate()?;
        Ok(Self {
            engine: ExclusionDepthEngine::new(oracle),
            opts,
        })
    }

    /// Options in use.
    pub fn opts(&self) -> &RescaleOpts {
        &self.opts
    }

    /// Depth engine shared by every point.
    pub fn engine(&self) -> &ExclusionDepthEngine<'a> {
        &self.engine
    }

    /// Rescales every point of `curve` from `source` to `target`.
    pub fn rescale(
        &self,
        curve: &ExclusionCurve,
        source: &Benchmark,
        target: &Benchmark,
    ) -> Result<RescaledCurve, ReintError> {
        let never = AtomicBool::new(false);
        self.rescale_with_cancel(curve, source, target, &never)
    }

    /// Validates a raw limit file and rescales it.
    ///
    /// Malformed arrays are rejected before the oracle is queried.
    pub fn rescale_input(
        &self,
        input: &LimitInput,
        source: &Benchmark,
        target: &Benchmark,
    ) -> Result<RescaledCurve, ReintError> {
        let curve = input.to_curve()?;
        self.rescale(&curve, source, target)
    }

    /// Like [`CouplingRescaler::rescale`], checking `cancel` before each point.
    pub fn rescale_with_cancel(
        &self,
        curve: &ExclusionCurve,
        source: &Benchmark,
        target: &Benchmark,
        cancel: &AtomicBool,
    ) -> Result<RescaledCurve, ReintError> {
        source.validate()?;
        target.validate()?;
        tracing::info!(
            points = curve.len(),
            source = %source.name,
            benchmark = %target.name,
            oracle = self.engine.oracle_name(),
            "rescaling coupling limit"
        );
        let solve = |point: &LimitPoint| -> Result<RescaledEntry, ReintError> {
            if cancel.load(Ordering::Relaxed) {
                return Err(ReintError::Cancelled(
                    ErrorInfo::new("cancelled", "rescaling cancelled between mass points")
                        .with_context("mmed", point.mediator_mass().to_string()),
                ));
            }
            self.rescale_point(point, source, target)
        };
        let entries = if self.opts.threads > 1 {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(self.opts.threads)
                .build()
                .map_err(|err| {
                    ReintError::MalformedInput(ErrorInfo::new("thread-pool", err.to_string()))
                })?;
            pool.install(|| {
                curve
                    .points()
                    .par_iter()
                    .map(solve)
                    .collect::<Result<Vec<_>, _>>()
            })?
        } else {
            curve
                .points()
                .iter()
                .map(solve)
                .collect::<Result<Vec<_>, _>>()?
        };
        let rescaled = RescaledCurve { entries };
        tracing::info!(
            resolved = rescaled.resolved_count(),
            unresolved = rescaled.len() - rescaled.resolved_count(),
            "rescaling finished"
        );
        Ok(rescaled)
    }

    /// Rescales one point; per-point failures come back as unresolved entries.
    ///
    /// Both depths are evaluated at the dark matter mass each benchmark
    /// prescribes for the point's mediator mass.
    pub fn rescale_point(
        &self,
        point: &LimitPoint,
        source: &Benchmark,
        target: &Benchmark,
    ) -> Result<RescaledEntry, ReintError> {
        match self.solve_point(point, source, target) {
            Ok(resolved) => Ok(RescaledEntry::Resolved(resolved)),
            Err(err) if err.is_recoverable() => {
                let reason = UnresolvedReason::from_error(&err);
                tracing::warn!(
                    mmed = point.mediator_mass(),
                    ?reason,
                    benchmark = %target.name,
                    error = %err,
                    "mass point unresolved"
                );
                Ok(RescaledEntry::Unresolved {
                    mediator_mass: point.mediator_mass(),
                    reason,
                })
            }
            Err(err) => Err(err),
        }
    }

    fn solve_point(
        &self,
        point: &LimitPoint,
        source: &Benchmark,
        target: &Benchmark,
    ) -> Result<LimitPoint, ReintError> {
        let mass = point.mediator_mass();
        let source_point = point.with_dm_mass(source.dm_mass_at(mass))?;
        let required = self.engine.limit_depth(&source_point, source)?;
        let target_point = point.with_dm_mass(target.dm_mass_at(mass))?;
        let outcome = solve_monotone(
            |coupling| self.engine.depth(&target_point, target, coupling),
            required,
            Bracket {
                lo: self.opts.coupling_min,
                hi: self.opts.coupling_max,
            },
            SolverLimits {
                tolerance: self.opts.tolerance,
                max_iters: self.opts.max_iters,
            },
            self.opts.method,
        )?;
        let no_root = |code: &str, message: &str| {
            ReintError::RescaleFailure(
                ErrorInfo::new(code, message)
                    .with_context("mmed", mass.to_string())
                    .with_context("coupling_min", self.opts.coupling_min.to_string())
                    .with_context("coupling_max", self.opts.coupling_max.to_string()),
            )
        };
        match outcome {
            RootOutcome::Converged { root, iterations } => {
                tracing::debug!(mmed = mass, coupling = root, iterations, "mass point resolved");
                target_point.with_coupling(root)
            }
            RootOutcome::BelowRange => Err(no_root(
                BELOW_RANGE,
                "target reaches the required depth below coupling_min",
            )),
            RootOutcome::AboveRange => Err(no_root(
                ABOVE_RANGE,
                "target cannot reach the required depth below coupling_max",
            )),
            RootOutcome::NotConverged { best } => Err(ReintError::RescaleFailure(
                ErrorInfo::new(NOT_CONVERGED, "iteration cap reached")
                    .with_context("mmed", mass.to_string())
                    .with_context("best", best.to_string())
                    .with_context("max_iters", self.opts.max_iters.to_string()),
            )),
        }
    }
}
