use reint_core::errors::{ErrorInfo, ReintError};
use reint_core::{Benchmark, LimitPoint};
use serde::{Deserialize, Serialize};

use crate::contour::{Contour, MIN_CONTOUR_POINTS};

/// Rescaled-limit file: per-contour masses and couplings plus the benchmark name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RescaledLimit {
    /// Mediator masses per contour.
    pub mmed_contours: Vec<Vec<f64>>,
    /// Quark coupling limits per contour.
    pub gq_contours: Vec<Vec<f64>>,
    /// Name of the benchmark the couplings refer to.
    pub benchmark: String,
}

impl RescaledLimit {
    /// Packs extracted contours; no contour at all is an [`ReintError::EmptyResult`].
    pub fn from_contours(contours: &[Contour], benchmark: &str) -> Result<Self, ReintError> {
        if contours.is_empty() {
            return Err(ReintError::EmptyResult(
                ErrorInfo::new("no-contours", "no mass range survived rescaling")
                    .with_context("benchmark", benchmark)
                    .with_hint("widen coupling_min/coupling_max or pick a closer target benchmark"),
            ));
        }
        Ok(Self {
            mmed_contours: contours.iter().map(Contour::masses).collect(),
            gq_contours: contours.iter().map(Contour::couplings).collect(),
            benchmark: benchmark.to_string(),
        })
    }

    /// Checks the shape of a loaded file.
    pub fn validate(&self) -> Result<(), ReintError> {
        if self.mmed_contours.len() != self.gq_contours.len() {
            return Err(ReintError::MalformedInput(
                ErrorInfo::new("length-mismatch", "mmed_contours and gq_contours differ in length")
                    .with_context("mmed_contours", self.mmed_contours.len().to_string())
                    .with_context("gq_contours", self.gq_contours.len().to_string()),
            ));
        }
        if self.mmed_contours.is_empty() {
            return Err(ReintError::EmptyResult(
                ErrorInfo::new("no-contours", "rescaled limit holds no contours")
                    .with_context("benchmark", self.benchmark.clone()),
            ));
        }
        for (idx, (masses, couplings)) in self.mmed_contours.iter().zip(&self.gq_contours).enumerate() {
            if masses.len() != couplings.len() || masses.len() < MIN_CONTOUR_POINTS {
                return Err(ReintError::MalformedInput(
                    ErrorInfo::new(
                        "contour-shape",
                        format!("contours need matching arrays of at least {MIN_CONTOUR_POINTS} entries"),
                    )
                    .with_context("contour", idx.to_string())
                    .with_context("mmed", masses.len().to_string())
                    .with_context("gq", couplings.len().to_string()),
                ));
            }
        }
        Ok(())
    }

    /// Rebuilds contours, taking dark matter masses from `benchmark`.
    pub fn into_contours(&self, benchmark: &Benchmark) -> Result<Vec<Contour>, ReintError> {
        self.validate()?;
        self.mmed_contours
            .iter()
            .zip(&self.gq_contours)
            .enumerate()
            .map(|(idx, (masses, couplings))| {
                let points = masses
                    .iter()
                    .zip(couplings)
                    .map(|(&mass, &gq)| LimitPoint::new(mass, benchmark.dm_mass_at(mass), gq))
                    .collect::<Result<Vec<_>, _>>()?;
                Contour::new(points).map_err(|err| match err {
                    ReintError::MalformedInput(info) => {
                        ReintError::MalformedInput(info.with_context("contour", idx.to_string()))
                    }
                    other => other,
                })
            })
            .collect()
    }
}
