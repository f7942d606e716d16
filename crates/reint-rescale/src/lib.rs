#![deny(missing_docs)]
#![doc = "Exclusion-depth preserving coupling rescaling and contour extraction."]

/// Rescaled-limit file format.
pub mod artefact;
/// Contour extraction from rescaled curves.
pub mod contour;
/// Exclusion depth computation on top of an oracle.
pub mod depth;
/// Signal oracle contract and the analytic dijet width oracle.
pub mod oracle;
/// Rescaler options.
pub mod params;
/// Run report with provenance.
pub mod report;
/// Per-point coupling rescaling.
pub mod rescale;
/// Bracketed monotone root finders.
pub mod solver;

pub use artefact::RescaledLimit;
pub use contour::{extract, split_runs, Contour, MIN_CONTOUR_POINTS};
pub use depth::ExclusionDepthEngine;
pub use oracle::{CrossSectionOracle, DijetWidthOracle, OracleQuery, PartialWidths};
pub use params::{RescaleOpts, SolverMethod};
pub use report::{RescaleReport, UnresolvedPoint};
pub use rescale::{CouplingRescaler, RescaledCurve, RescaledEntry, UnresolvedReason};
pub use solver::{solve_monotone, Bracket, RootOutcome, SolverLimits};
