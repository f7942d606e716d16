use proptest::prelude::*;
use reint_dp::{kinetic_mixing, yield_parameter};

proptest! {
    #[test]
    fn larger_coupling_gives_larger_epsilon(
        mass in 100.0f64..6000.0,
        gq in 0.001f64..1.0,
        factor in 1.001f64..10.0,
    ) {
        prop_assume!((mass - 91.1880).abs() > 1.0);
        prop_assert!(kinetic_mixing(gq * factor, mass) > kinetic_mixing(gq, mass));
    }

    #[test]
    fn yield_follows_its_definition(
        epsilon in 1e-4f64..1.0,
        alpha_d in 0.01f64..1.0,
        mdm in 1.0f64..500.0,
        mmed in 100.0f64..5000.0,
    ) {
        let y = yield_parameter(epsilon, alpha_d, mdm, mmed);
        let expected = epsilon.powi(2) * alpha_d * (mdm / mmed).powi(4);
        prop_assert!((y - expected).abs() <= 1e-12 * expected);
    }
}
