//! Immutable table of named benchmarks.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::{ErrorInfo, ReintError};
use crate::schema::{BenchmarkSpec, DEFAULT_PDFSET};
use crate::serde_io::from_yaml_slice;
use crate::types::{Benchmark, CouplingType, DarkMatterMass};

/// Registry key of the minimal dark photon benchmark.
pub const MINIMAL_DARK_PHOTON: &str = "minimal_dark_photon";

/// Registry extension file: benchmark name to description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegistryFile {
    /// Additional benchmarks keyed by name.
    #[serde(default)]
    pub benchmarks: BTreeMap<String, BenchmarkSpec>,
}

/// Read-only lookup table of benchmarks, built once per process.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkRegistry {
    entries: BTreeMap<String, Benchmark>,
}

fn builtin_entry(
    name: &str,
    coupling_type: CouplingType,
    (gq, gdm, gl): (f64, f64, f64),
    dm_mass: DarkMatterMass,
    description: &str,
) -> Benchmark {
    Benchmark {
        name: name.to_string(),
        gq,
        gdm,
        gl,
        coupling_type,
        dm_mass,
        ecm_sqrt: 13.0,
        pdfset: DEFAULT_PDFSET.to_string(),
        description: Some(description.to_string()),
    }
}

fn builtin_table() -> Vec<Benchmark> {
    vec![
        builtin_entry(
            MINIMAL_DARK_PHOTON,
            CouplingType::Vector,
            (0.1, 1.0, 0.0),
            DarkMatterMass::MediatorFraction(1.0 / 3.0),
            "minimal dark photon with m_DM = m_med / 3",
        ),
        builtin_entry(
            "A1",
            CouplingType::Axial,
            (0.25, 1.0, 0.0),
            DarkMatterMass::Fixed(1.0),
            "axial-vector mediator, leptophobic",
        ),
        builtin_entry(
            "A2",
            CouplingType::Axial,
            (0.1, 1.0, 0.1),
            DarkMatterMass::Fixed(1.0),
            "axial-vector mediator with lepton couplings",
        ),
        builtin_entry(
            "V1",
            CouplingType::Vector,
            (0.25, 1.0, 0.0),
            DarkMatterMass::Fixed(1.0),
            "vector mediator, leptophobic",
        ),
        builtin_entry(
            "V2",
            CouplingType::Vector,
            (0.1, 1.0, 0.01),
            DarkMatterMass::Fixed(1.0),
            "vector mediator with small lepton couplings",
        ),
    ]
}

impl BenchmarkRegistry {
    /// Registry holding only the built-in benchmark table.
    pub fn builtin() -> Self {
        let entries = builtin_table()
            .into_iter()
            .map(|benchmark| (benchmark.name.clone(), benchmark))
            .collect();
        Self { entries }
    }

    /// Built-in table extended with the entries of a registry file.
    ///
    /// Names already present in the table are rejected rather than shadowed.
    pub fn with_extensions(file: RegistryFile) -> Result<Self, ReintError> {
        let mut registry = Self::builtin();
        for (name, spec) in file.benchmarks {
            if registry.entries.contains_key(&name) {
                return Err(ReintError::MalformedInput(
                    ErrorInfo::new("duplicate-benchmark", "benchmark is already registered")
                        .with_context("benchmark", name),
                ));
            }
            let mut benchmark = spec.into_benchmark(&name)?;
            benchmark.name = name.clone();
            tracing::debug!(benchmark = %name, "registered benchmark from file");
            registry.entries.insert(name, benchmark);
        }
        Ok(registry)
    }

    /// Parses a YAML registry file and extends the built-in table with it.
    pub fn from_yaml_slice(data: &[u8]) -> Result<Self, ReintError> {
        let file: RegistryFile = from_yaml_slice(data)?;
        Self::with_extensions(file)
    }

    /// Looks up a benchmark by name.
    pub fn lookup(&self, name: &str) -> Result<&Benchmark, ReintError> {
        self.entries.get(name).ok_or_else(|| {
            ReintError::UnknownBenchmark(
                ErrorInfo::new("unknown-benchmark", "benchmark is not registered")
                    .with_context("benchmark", name)
                    .with_hint(format!("known benchmarks: {}", self.names().join(", "))),
            )
        })
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    /// Iterates over the registered benchmarks in name order.
    pub fn iter(&self) -> impl Iterator<Item = &Benchmark> {
        self.entries.values()
    }

    /// Number of registered benchmarks.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for BenchmarkRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
