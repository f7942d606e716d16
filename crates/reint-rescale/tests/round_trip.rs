mod common;

use reint_rescale::{CouplingRescaler, DijetWidthOracle, RescaleOpts};

use common::{curve, registry};

#[test]
fn rescaling_there_and_back_recovers_the_limit() {
    let registry = registry();
    let a = registry.lookup("A1").unwrap();
    let b = registry.lookup("A2").unwrap();
    let masses = [600.0, 900.0, 1400.0, 2100.0, 3000.0];
    let couplings = [0.06, 0.08, 0.11, 0.15, 0.22];
    let limit = curve(&masses, &couplings);
    let oracle = DijetWidthOracle;
    let rescaler = CouplingRescaler::new(&oracle, RescaleOpts::default()).unwrap();

    let forward = rescaler.rescale(&limit, a, b).unwrap();
    let forward_points: Vec<_> = forward
        .entries()
        .iter()
        .filter_map(|entry| entry.resolved().copied())
        .collect();
    assert_eq!(forward_points.len(), masses.len());
    let forward_curve = reint_core::ExclusionCurve::from_points(forward_points).unwrap();

    let back = rescaler.rescale(&forward_curve, b, a).unwrap();
    for (entry, original) in back.entries().iter().zip(limit.points()) {
        let recovered = entry.resolved().expect("resolves both ways");
        assert!(
            (recovered.coupling_limit() - original.coupling_limit()).abs() < 1e-6,
            "mass {}: {} vs {}",
            original.mediator_mass(),
            recovered.coupling_limit(),
            original.coupling_limit()
        );
    }
}

#[test]
fn identical_configurations_leave_couplings_unchanged() {
    let registry = registry();
    let v1 = registry.lookup("V1").unwrap();
    let limit = curve(&[700.0, 1500.0], &[0.1, 0.2]);
    let oracle = DijetWidthOracle;
    let rescaler = CouplingRescaler::new(&oracle, RescaleOpts::default()).unwrap();
    let rescaled = rescaler.rescale(&limit, v1, v1).unwrap();
    for (entry, original) in rescaled.entries().iter().zip(limit.points()) {
        let point = entry.resolved().unwrap();
        assert!((point.coupling_limit() - original.coupling_limit()).abs() < 1e-8);
    }
}

#[test]
fn rescaled_points_sit_at_unit_exclusion_depth() {
    let registry = registry();
    let source = registry.lookup("A1").unwrap();
    let target = registry.lookup("A2").unwrap();
    let limit = curve(&[800.0, 1600.0, 2400.0], &[0.07, 0.12, 0.18]);
    let oracle = DijetWidthOracle;
    let rescaler = CouplingRescaler::new(&oracle, RescaleOpts::default()).unwrap();
    let engine = rescaler.engine();
    let rescaled = rescaler.rescale(&limit, source, target).unwrap();

    for (entry, original) in rescaled.entries().iter().zip(limit.points()) {
        let point = entry.resolved().unwrap();
        let reference = engine.limit_depth(original, source).unwrap();
        let ratio = engine
            .exclusion_depth(point, target, point.coupling_limit(), reference)
            .unwrap();
        assert!((ratio - 1.0).abs() < 1e-6, "mass {}: ratio {ratio}", point.mediator_mass());
        let weaker = engine
            .exclusion_depth(point, target, 0.5 * point.coupling_limit(), reference)
            .unwrap();
        assert!(weaker < 1.0);
    }
}

#[test]
fn exclusion_depth_needs_a_positive_reference() {
    let registry = registry();
    let v1 = registry.lookup("V1").unwrap();
    let oracle = DijetWidthOracle;
    let rescaler = CouplingRescaler::new(&oracle, RescaleOpts::default()).unwrap();
    let point = reint_core::LimitPoint::new(1000.0, 1.0, 0.1).unwrap();
    let err = rescaler
        .engine()
        .exclusion_depth(&point, v1, 0.1, 0.0)
        .unwrap_err();
    assert!(matches!(err, reint_core::ReintError::NumericDivergence(_)));
}
