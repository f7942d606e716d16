#![deny(missing_docs)]
#![doc = "Dark photon reinterpretation of rescaled vector-mediator limits."]

/// Dark photon limit file format.
pub mod artefact;
pub mod constants;
/// Mapping of contours onto kinetic mixing and yield.
pub mod mapper;
/// Closed-form mixing and yield relations.
pub mod mixing;
/// Mapper options.
pub mod opts;

pub use artefact::DarkPhotonLimit;
pub use mapper::{DarkPhotonMapper, DarkPhotonPoint, DarkPhotonResult};
pub use mixing::{default_alpha_d, kinetic_mixing, yield_parameter};
pub use opts::{DarkPhotonOpts, ThresholdPolicy};
