//! Provenance and schema descriptors attached to run reports.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Semantic version describing the schema of serialized payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SchemaVersion {
    /// Major version incremented for breaking changes.
    pub major: u32,
    /// Minor version incremented for additive changes.
    pub minor: u32,
    /// Patch version incremented for bug fixes and documentation updates.
    pub patch: u32,
}

impl SchemaVersion {
    /// Creates a new schema version descriptor.
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }
}

impl Default for SchemaVersion {
    fn default() -> Self {
        Self::new(1, 0, 0)
    }
}

/// Provenance information attached to every run report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RunProvenance {
    /// Stable hash of the limit curve and both benchmarks.
    pub input_hash: String,
    /// Name of the oracle that produced the signal predictions.
    pub oracle: String,
    /// ISO-8601 timestamp recording when the artefact was generated.
    #[serde(default)]
    pub created_at: String,
    /// Version map for all tools involved in the run.
    #[serde(default)]
    pub tool_versions: BTreeMap<String, String>,
}

impl RunProvenance {
    /// Creates a provenance record stamped with this crate's version.
    pub fn new(input_hash: impl Into<String>, oracle: impl Into<String>) -> Self {
        let mut tool_versions = BTreeMap::new();
        tool_versions.insert(
            env!("CARGO_PKG_NAME").to_string(),
            env!("CARGO_PKG_VERSION").to_string(),
        );
        Self {
            input_hash: input_hash.into(),
            oracle: oracle.into(),
            created_at: String::new(),
            tool_versions,
        }
    }

    /// Records the generation timestamp.
    pub fn stamped(mut self, created_at: impl Into<String>) -> Self {
        self.created_at = created_at.into();
        self
    }
}
