use reint_core::errors::ReintError;
use reint_core::LimitPoint;
use serde::Serialize;

use crate::rescale::RescaledCurve;

/// Minimum number of resolved points kept as a contour.
pub const MIN_CONTOUR_POINTS: usize = 2;

/// Maximal run of resolved points with strictly ascending mediator mass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Contour {
    points: Vec<LimitPoint>,
}

impl Contour {
    /// Wraps a run of points, rejecting runs that are too short or unsorted.
    pub fn new(points: Vec<LimitPoint>) -> Result<Self, ReintError> {
        if points.len() < MIN_CONTOUR_POINTS {
            return Err(ReintError::malformed(
                "short-contour",
                format!("a contour needs at least {MIN_CONTOUR_POINTS} points"),
            ));
        }
        if points
            .windows(2)
            .any(|pair| pair[1].mediator_mass() <= pair[0].mediator_mass())
        {
            return Err(ReintError::malformed(
                "unsorted-masses",
                "contour masses must be strictly ascending",
            ));
        }
        Ok(Self { points })
    }

    /// Points in mass order.
    pub fn points(&self) -> &[LimitPoint] {
        &self.points
    }

    /// Number of points, always at least two.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false for a constructed contour.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Mediator masses.
    pub fn masses(&self) -> Vec<f64> {
        self.points.iter().map(LimitPoint::mediator_mass).collect()
    }

    /// Coupling limits.
    pub fn couplings(&self) -> Vec<f64> {
        self.points.iter().map(LimitPoint::coupling_limit).collect()
    }

    /// Lowest and highest mediator mass covered.
    pub fn mass_range(&self) -> (f64, f64) {
        let first = self.points.first().map_or(0.0, LimitPoint::mediator_mass);
        let last = self.points.last().map_or(0.0, LimitPoint::mediator_mass);
        (first, last)
    }
}

/// Splits `items` into maximal runs of `Some`, dropping runs shorter than
/// [`MIN_CONTOUR_POINTS`].
pub fn split_runs<T, I>(items: I) -> Vec<Vec<T>>
where
    I: IntoIterator<Item = Option<T>>,
{
    let mut runs = Vec::new();
    let mut current = Vec::new();
    for item in items {
        match item {
            Some(value) => current.push(value),
            None => {
                if current.len() >= MIN_CONTOUR_POINTS {
                    runs.push(std::mem::take(&mut current));
                } else {
                    current.clear();
                }
            }
        }
    }
    if current.len() >= MIN_CONTOUR_POINTS {
        runs.push(current);
    }
    runs
}

/// Partitions a rescaled curve into contours at every unresolved entry.
///
/// Contours come out in order of first appearance along the mass axis.
/// Isolated resolved points are dropped rather than bridged.
pub fn extract(curve: &RescaledCurve) -> Vec<Contour> {
    let runs = split_runs(curve.entries().iter().map(|entry| entry.resolved().copied()));
    let contours: Vec<Contour> = runs.into_iter().map(|points| Contour { points }).collect();
    tracing::debug!(
        entries = curve.len(),
        contours = contours.len(),
        "extracted contours"
    );
    contours
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runs_split_at_gaps() {
        let runs = split_runs([Some(1), Some(2), None, Some(4), Some(5)]);
        assert_eq!(runs, vec![vec![1, 2], vec![4, 5]]);
    }

    #[test]
    fn short_runs_are_dropped() {
        let runs = split_runs([Some(1), None, Some(3), Some(4), Some(5), None, Some(7)]);
        assert_eq!(runs, vec![vec![3, 4, 5]]);
        assert!(split_runs::<i32, _>([None, None]).is_empty());
    }

    #[test]
    fn contour_rejects_single_point() {
        let point = LimitPoint::new(100.0, 1.0, 0.1).unwrap();
        let err = Contour::new(vec![point]).unwrap_err();
        assert_eq!(err.info().code, "short-contour");
    }
}
