#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};

use reint_core::errors::ReintError;
use reint_core::{BenchmarkRegistry, CouplingType, ExclusionCurve};
use reint_rescale::oracle::unsupported_coupling;
use reint_rescale::{CrossSectionOracle, OracleQuery};

/// `gq^2`, except at the listed mediator masses where it returns NaN.
pub struct PoisonedOracle {
    pub poisoned: Vec<f64>,
}

impl CrossSectionOracle for PoisonedOracle {
    fn name(&self) -> &str {
        "poisoned"
    }

    fn evaluate(&self, query: &OracleQuery) -> Result<f64, ReintError> {
        if self.poisoned.contains(&query.mediator_mass) {
            return Ok(f64::NAN);
        }
        Ok(query.gq * query.gq)
    }
}

/// `gq^2` for vector couplings only, counting every call.
#[derive(Default)]
pub struct CountingOracle {
    pub calls: AtomicUsize,
}

impl CountingOracle {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl CrossSectionOracle for CountingOracle {
    fn name(&self) -> &str {
        "counting"
    }

    fn evaluate(&self, query: &OracleQuery) -> Result<f64, ReintError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if query.coupling_type != CouplingType::Vector {
            return Err(unsupported_coupling(self.name(), query.coupling_type));
        }
        Ok(query.gq * query.gq)
    }
}

pub fn registry() -> BenchmarkRegistry {
    BenchmarkRegistry::builtin()
}

pub fn curve(masses: &[f64], couplings: &[f64]) -> ExclusionCurve {
    let mdm = vec![1.0; masses.len()];
    ExclusionCurve::from_arrays(masses, &mdm, couplings).unwrap()
}
