use std::f64::consts::PI;

use reint_core::errors::{ErrorInfo, ReintError};
use reint_core::CouplingType;
use serde::{Deserialize, Serialize};

/// Number of quark colours.
const N_COLOURS: f64 = 3.0;

/// Quark pole masses in GeV (u, d, s, c, b, t).
const QUARK_MASSES: [f64; 6] = [0.0022, 0.0047, 0.096, 1.27, 4.18, 172.5];

/// Charged lepton masses in GeV (e, mu, tau).
const CHARGED_LEPTON_MASSES: [f64; 3] = [0.000511, 0.10566, 1.77686];

/// Point in model space handed to a [`CrossSectionOracle`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OracleQuery {
    /// Mediator mass in GeV.
    pub mediator_mass: f64,
    /// Dark matter mass in GeV.
    pub dm_mass: f64,
    /// Quark coupling.
    pub gq: f64,
    /// Dark matter coupling.
    pub gdm: f64,
    /// Lepton coupling.
    pub gl: f64,
    /// Lorentz structure of the couplings.
    pub coupling_type: CouplingType,
}

/// Deterministic signal predictor for a simplified-model point.
///
/// Implementations must be pure: the same query always yields the same value.
/// The rescaler relies on the prediction being non-decreasing in `gq` when
/// every other field is held fixed.
pub trait CrossSectionOracle: Send + Sync {
    /// Short identifier recorded in run provenance.
    fn name(&self) -> &str;

    /// Predicted signal strength, non-negative.
    ///
    /// Returns [`ReintError::Oracle`] for coupling structures the
    /// implementation does not support.
    fn evaluate(&self, query: &OracleQuery) -> Result<f64, ReintError>;
}

/// Error returned by oracles for coupling structures they cannot model.
pub fn unsupported_coupling(oracle: &str, coupling_type: CouplingType) -> ReintError {
    ReintError::Oracle(
        ErrorInfo::new("unsupported-coupling", "oracle does not model this coupling type")
            .with_context("oracle", oracle)
            .with_context("coupling", coupling_type.as_str()),
    )
}

/// Narrow-width dijet signal of a spin-1 s-channel mediator at fixed mass.
///
/// Returns `gq^2 * BR(Z' -> q qbar)`. The parton-level production factor is
/// identical for two configurations at the same mediator mass and cancels in
/// every ratio the rescaler forms, so it is left out.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DijetWidthOracle;

/// Partial widths of the mediator in GeV, split by final state.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PartialWidths {
    /// Sum over quark flavours.
    pub quarks: f64,
    /// Dirac dark matter pair.
    pub dark_matter: f64,
    /// Charged leptons and neutrinos.
    pub leptons: f64,
}

impl PartialWidths {
    /// Total width.
    pub fn total(&self) -> f64 {
        self.quarks + self.dark_matter + self.leptons
    }

    /// Branching ratio into quarks, zero when the mediator cannot decay.
    pub fn quark_branching_ratio(&self) -> f64 {
        let total = self.total();
        if total > 0.0 {
            self.quarks / total
        } else {
            0.0
        }
    }
}

/// Width into a fermion pair for unit coupling, without colour factor.
fn fermion_pair_width(mediator_mass: f64, fermion_mass: f64, coupling_type: CouplingType) -> f64 {
    let z = (fermion_mass / mediator_mass).powi(2);
    if 4.0 * z >= 1.0 {
        return 0.0;
    }
    let beta = (1.0 - 4.0 * z).sqrt();
    let kinematics = match coupling_type {
        CouplingType::Vector => (1.0 + 2.0 * z) * beta,
        CouplingType::Axial => beta.powi(3),
    };
    mediator_mass / (12.0 * PI) * kinematics
}

impl DijetWidthOracle {
    /// Identifier recorded in provenance.
    pub const NAME: &'static str = "dijet-width";

    /// Tree-level partial widths for the queried configuration.
    pub fn partial_widths(&self, query: &OracleQuery) -> PartialWidths {
        let mass = query.mediator_mass;
        let kind = query.coupling_type;
        let quarks = QUARK_MASSES
            .iter()
            .map(|&mq| N_COLOURS * fermion_pair_width(mass, mq, kind))
            .sum::<f64>()
            * query.gq.powi(2);
        let dark_matter = query.gdm.powi(2) * fermion_pair_width(mass, query.dm_mass, kind);
        let charged = CHARGED_LEPTON_MASSES
            .iter()
            .map(|&ml| fermion_pair_width(mass, ml, kind))
            .sum::<f64>();
        // Left-handed neutrinos couple with half the Dirac width.
        let neutrinos = 3.0 * 0.5 * mass / (12.0 * PI);
        let leptons = query.gl.powi(2) * (charged + neutrinos);
        PartialWidths {
            quarks,
            dark_matter,
            leptons,
        }
    }
}

impl CrossSectionOracle for DijetWidthOracle {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn evaluate(&self, query: &OracleQuery) -> Result<f64, ReintError> {
        let physical = |mass: f64| mass.is_finite() && mass > 0.0;
        if !physical(query.mediator_mass) || !physical(query.dm_mass) {
            return Err(ReintError::Oracle(
                ErrorInfo::new("non-physical-mass", "oracle masses must be positive")
                    .with_context("mmed", query.mediator_mass.to_string())
                    .with_context("mdm", query.dm_mass.to_string()),
            ));
        }
        let widths = self.partial_widths(query);
        Ok(query.gq.powi(2) * widths.quark_branching_ratio())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(gq: f64, gdm: f64, dm_mass: f64) -> OracleQuery {
        OracleQuery {
            mediator_mass: 1000.0,
            dm_mass,
            gq,
            gdm,
            gl: 0.0,
            coupling_type: CouplingType::Vector,
        }
    }

    #[test]
    fn quark_only_mediator_has_unit_branching_ratio() {
        let oracle = DijetWidthOracle;
        let value = oracle.evaluate(&query(0.2, 0.0, 1.0)).unwrap();
        assert!((value - 0.04).abs() < 1e-12);
    }

    #[test]
    fn closed_dark_matter_channel_does_not_dilute() {
        let oracle = DijetWidthOracle;
        let closed = oracle.evaluate(&query(0.2, 1.0, 600.0)).unwrap();
        let open = oracle.evaluate(&query(0.2, 1.0, 100.0)).unwrap();
        assert!((closed - 0.04).abs() < 1e-12);
        assert!(open < closed);
    }

    #[test]
    fn axial_widths_are_suppressed_near_threshold() {
        let oracle = DijetWidthOracle;
        let mut q = query(0.1, 1.0, 450.0);
        let vector = oracle.partial_widths(&q).dark_matter;
        q.coupling_type = CouplingType::Axial;
        let axial = oracle.partial_widths(&q).dark_matter;
        assert!(axial < vector);
    }

    #[test]
    fn prediction_grows_with_quark_coupling() {
        let oracle = DijetWidthOracle;
        let mut previous = 0.0;
        for step in 1..50 {
            let value = oracle.evaluate(&query(step as f64 * 0.02, 1.0, 10.0)).unwrap();
            assert!(value > previous);
            previous = value;
        }
    }
}
