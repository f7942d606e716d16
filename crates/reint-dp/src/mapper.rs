use reint_core::errors::{ErrorInfo, ReintError};
use reint_core::{Benchmark, CouplingType, LimitPoint};
use reint_rescale::{split_runs, Contour};
use serde::Serialize;

use crate::constants::Z_MASS;
use crate::mixing::{kinetic_mixing, yield_parameter};
use crate::opts::{validate_alpha_d, DarkPhotonOpts, ThresholdPolicy};

const COUPLING_TOLERANCE: f64 = 1e-12;

/// One mapped point. `y` is derived on demand from the stored inputs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DarkPhotonPoint {
    /// Mediator (dark photon) mass in GeV.
    pub mediator_mass: f64,
    /// Dark matter mass in GeV.
    pub dm_mass: f64,
    /// Kinetic mixing.
    pub epsilon: f64,
    /// Inside the dark matter or Z pole threshold band.
    pub near_threshold: bool,
}

impl DarkPhotonPoint {
    /// Yield variable for the given dark coupling strength.
    pub fn y(&self, alpha_d: f64) -> f64 {
        yield_parameter(self.epsilon, alpha_d, self.dm_mass, self.mediator_mass)
    }
}

/// Mapped points of one contour.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DarkPhotonResult {
    /// Dark coupling strength used for `y`.
    pub alpha_d: f64,
    /// Points in mass order.
    pub points: Vec<DarkPhotonPoint>,
}

impl DarkPhotonResult {
    /// Mediator masses.
    pub fn masses(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.mediator_mass).collect()
    }

    /// Kinetic mixing values.
    pub fn epsilons(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.epsilon).collect()
    }

    /// Yield values recomputed from `epsilon` and the masses.
    pub fn yields(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.y(self.alpha_d)).collect()
    }

    /// Threshold flags.
    pub fn near_threshold(&self) -> Vec<bool> {
        self.points.iter().map(|p| p.near_threshold).collect()
    }
}

/// Closed-form map from vector-mediator coupling limits to dark photon parameters.
#[derive(Debug, Clone, Default)]
pub struct DarkPhotonMapper {
    opts: DarkPhotonOpts,
}

impl DarkPhotonMapper {
    /// Creates a mapper after validating the options.
    pub fn new(opts: DarkPhotonOpts) -> Result<Self, ReintError> {
        opts.validate()?;
        Ok(Self { opts })
    }

    /// Options in use.
    pub fn opts(&self) -> &DarkPhotonOpts {
        &self.opts
    }

    /// Rejects benchmarks other than a pure vector mediator with `gdm = 1`, `gl = 0`.
    pub fn check_benchmark(benchmark: &Benchmark) -> Result<(), ReintError> {
        let incompatible = |message: &str| {
            Err(ReintError::IncompatibleBenchmark(
                ErrorInfo::new("dark-photon-benchmark", message)
                    .with_context("benchmark", benchmark.name.clone())
                    .with_context("coupling", benchmark.coupling_type.as_str())
                    .with_context("gdm", benchmark.gdm.to_string())
                    .with_context("gl", benchmark.gl.to_string())
                    .with_hint("use a vector benchmark with gdm = 1 and gl = 0"),
            ))
        };
        if benchmark.coupling_type != CouplingType::Vector {
            return incompatible("dark photon mapping needs a vector mediator");
        }
        if (benchmark.gdm - 1.0).abs() > COUPLING_TOLERANCE {
            return incompatible("dark photon mapping needs gdm = 1");
        }
        if benchmark.gl.abs() > COUPLING_TOLERANCE {
            return incompatible("dark photon mapping needs gl = 0");
        }
        Ok(())
    }

    fn near_threshold(&self, mediator_mass: f64, dm_mass: f64) -> bool {
        let band = self.opts.threshold_band;
        let pair = 2.0 * dm_mass;
        (mediator_mass - pair).abs() <= band * pair
            || (mediator_mass - Z_MASS).abs() <= band * Z_MASS
    }

    fn map_point(&self, point: &LimitPoint) -> DarkPhotonPoint {
        let mediator_mass = point.mediator_mass();
        let near_threshold = self.near_threshold(mediator_mass, point.dm_mass());
        if near_threshold {
            tracing::warn!(
                mmed = mediator_mass,
                mdm = point.dm_mass(),
                policy = ?self.opts.policy,
                "point inside threshold band"
            );
        }
        DarkPhotonPoint {
            mediator_mass,
            dm_mass: point.dm_mass(),
            epsilon: kinetic_mixing(point.coupling_limit(), mediator_mass),
            near_threshold,
        }
    }

    /// Maps every contour of a rescaled limit.
    ///
    /// Under [`ThresholdPolicy::Exclude`] banded points split their contour and
    /// runs shorter than two points are dropped. Nothing left is an
    /// [`ReintError::EmptyResult`].
    pub fn map(
        &self,
        contours: &[Contour],
        benchmark: &Benchmark,
        alpha_d: f64,
    ) -> Result<Vec<DarkPhotonResult>, ReintError> {
        Self::check_benchmark(benchmark)?;
        validate_alpha_d(alpha_d)?;
        let mut results = Vec::new();
        for contour in contours {
            let mapped = contour.points().iter().map(|point| self.map_point(point));
            match self.opts.policy {
                ThresholdPolicy::Flag => results.push(DarkPhotonResult {
                    alpha_d,
                    points: mapped.collect(),
                }),
                ThresholdPolicy::Exclude => {
                    let runs = split_runs(mapped.map(|p| (!p.near_threshold).then_some(p)));
                    results.extend(runs.into_iter().map(|points| DarkPhotonResult { alpha_d, points }));
                }
            }
        }
        if results.is_empty() {
            return Err(ReintError::EmptyResult(
                ErrorInfo::new("no-dark-photon-points", "no point survived the dark photon mapping")
                    .with_context("benchmark", benchmark.name.clone())
                    .with_context("contours", contours.len().to_string()),
            ));
        }
        tracing::info!(
            benchmark = %benchmark.name,
            contours = results.len(),
            alpha_d,
            "mapped dark photon limit"
        );
        Ok(results)
    }

    /// Alpha_D from the options, falling back to `gdm^2 / 4 pi` of `benchmark`.
    pub fn alpha_d_for(&self, benchmark: &Benchmark) -> f64 {
        self.opts
            .alpha_d
            .unwrap_or_else(|| crate::mixing::default_alpha_d(benchmark.gdm))
    }
}
