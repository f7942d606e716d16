#![deny(missing_docs)]
#![doc = "Core data model, benchmark registry and error surface for coupling-limit reinterpretation."]

pub mod errors;
/// Canonical hashing helpers.
pub mod hash;
pub mod provenance;
pub mod registry;
pub mod schema;
/// Canonical JSON and YAML helpers.
#[path = "serde.rs"]
pub mod serde_io;
mod types;

pub use errors::{ErrorInfo, ReintError};
pub use hash::{input_hash, stable_hash_string};
pub use provenance::{RunProvenance, SchemaVersion};
pub use registry::{BenchmarkRegistry, RegistryFile, MINIMAL_DARK_PHOTON};
pub use schema::{BenchmarkSpec, LimitInput};
pub use types::{Benchmark, CouplingType, DarkMatterMass, ExclusionCurve, LimitPoint};
