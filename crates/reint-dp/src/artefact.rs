use reint_core::errors::{ErrorInfo, ReintError};
use serde::{Deserialize, Serialize};

use crate::mapper::DarkPhotonResult;

/// Dark photon limit file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DarkPhotonLimit {
    /// Mediator masses per contour.
    pub mmed_contours: Vec<Vec<f64>>,
    /// Kinetic mixing per contour.
    pub epsilon_contours: Vec<Vec<f64>>,
    /// Yield variable per contour.
    pub y_contours: Vec<Vec<f64>>,
    /// Threshold flags per contour.
    pub near_threshold_contours: Vec<Vec<bool>>,
    /// Benchmark the input limit refers to.
    pub benchmark: String,
    /// Dark coupling strength used for `y`.
    pub alpha_d: f64,
}

impl DarkPhotonLimit {
    /// Packs mapper results.
    pub fn from_results(
        results: &[DarkPhotonResult],
        benchmark: &str,
        alpha_d: f64,
    ) -> Result<Self, ReintError> {
        if results.is_empty() {
            return Err(ReintError::EmptyResult(
                ErrorInfo::new("no-dark-photon-points", "nothing to write")
                    .with_context("benchmark", benchmark),
            ));
        }
        Ok(Self {
            mmed_contours: results.iter().map(DarkPhotonResult::masses).collect(),
            epsilon_contours: results.iter().map(DarkPhotonResult::epsilons).collect(),
            y_contours: results.iter().map(DarkPhotonResult::yields).collect(),
            near_threshold_contours: results.iter().map(DarkPhotonResult::near_threshold).collect(),
            benchmark: benchmark.to_string(),
            alpha_d,
        })
    }

    /// Total number of points over all contours.
    pub fn point_count(&self) -> usize {
        self.mmed_contours.iter().map(Vec::len).sum()
    }
}
