mod common;

use proptest::prelude::*;
use reint_core::ReintError;
use reint_rescale::{
    solve_monotone, Bracket, CouplingRescaler, DijetWidthOracle, RescaleOpts, SolverLimits,
    SolverMethod,
};

use common::{curve, registry};

fn limits() -> SolverLimits {
    SolverLimits {
        tolerance: 1e-10,
        max_iters: 200,
    }
}

proptest! {
    #[test]
    fn solver_recovers_roots_inside_bracket(root in 0.01f64..3.5, brent in any::<bool>()) {
        let method = if brent { SolverMethod::Brent } else { SolverMethod::Bisection };
        let f = |x: f64| -> Result<f64, ReintError> { Ok(x * x * (1.0 + x)) };
        let target = root * root * (1.0 + root);
        let outcome = solve_monotone(f, target, Bracket { lo: 1e-4, hi: 4.0 }, limits(), method).unwrap();
        let found = outcome.root().expect("root inside the bracket");
        prop_assert!((found - root).abs() < 1e-7);
    }

    #[test]
    fn rescaled_coupling_grows_with_the_source_limit(
        mass in 300.0f64..4000.0,
        gq in 0.02f64..0.5,
        bump in 1.01f64..2.0,
    ) {
        let registry = registry();
        let source = registry.lookup("V1").unwrap();
        let target = registry.lookup("V2").unwrap();
        let oracle = DijetWidthOracle;
        let rescaler = CouplingRescaler::new(&oracle, RescaleOpts::default()).unwrap();
        let limit = curve(&[mass, mass + 1.0], &[gq, gq * bump]);
        let rescaled = rescaler.rescale(&limit, source, target).unwrap();
        let low = rescaled.entries()[0].resolved().unwrap().coupling_limit();
        let high = rescaled.entries()[1].resolved().unwrap().coupling_limit();
        prop_assert!(high > low);
    }
}
