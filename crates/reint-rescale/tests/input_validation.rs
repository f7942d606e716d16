mod common;

use std::sync::atomic::AtomicBool;

use reint_core::{Benchmark, ExclusionCurve, LimitInput, ReintError};
use reint_rescale::{CouplingRescaler, RescaleOpts, UnresolvedReason};

use common::{curve, registry, CountingOracle};

#[test]
fn unequal_arrays_fail_before_any_oracle_call() {
    let oracle = CountingOracle::default();
    let registry = registry();
    let v1 = registry.lookup("V1").unwrap();
    let rescaler = CouplingRescaler::new(&oracle, RescaleOpts::default()).unwrap();
    let input: LimitInput = serde_json::from_str(
        r#"{"mmed":[1000,2000,3000],"mdm":[1,1,1],"gq_limit":[0.1,0.2]}"#,
    )
    .unwrap();
    let err = rescaler.rescale_input(&input, v1, v1).unwrap_err();
    assert!(matches!(err, ReintError::MalformedInput(ref info) if info.code == "length-mismatch"));
    assert_eq!(oracle.calls(), 0);

    let valid: LimitInput = serde_json::from_str(
        r#"{"mmed":[1000,2000],"mdm":[1,1],"gq_limit":[0.1,0.2]}"#,
    )
    .unwrap();
    let rescaled = rescaler.rescale_input(&valid, v1, v1).unwrap();
    assert_eq!(rescaled.resolved_count(), 2);
    assert!(oracle.calls() > 0);
}

#[test]
fn invalid_options_are_rejected_up_front() {
    let oracle = CountingOracle::default();
    let opts = RescaleOpts {
        coupling_min: 1.0,
        coupling_max: 0.5,
        ..RescaleOpts::default()
    };
    let err = CouplingRescaler::new(&oracle, opts).unwrap_err();
    assert!(matches!(err, ReintError::MalformedInput(ref info) if info.code == "coupling-range"));
    assert_eq!(oracle.calls(), 0);
}

#[test]
fn invalid_benchmark_is_rejected_before_solving() {
    let oracle = CountingOracle::default();
    let registry = registry();
    let v1 = registry.lookup("V1").unwrap();
    let broken = Benchmark {
        gdm: -1.0,
        ..v1.clone()
    };
    let rescaler = CouplingRescaler::new(&oracle, RescaleOpts::default()).unwrap();
    let err = rescaler
        .rescale(&curve(&[100.0, 200.0], &[0.1, 0.1]), v1, &broken)
        .unwrap_err();
    assert!(matches!(err, ReintError::MalformedInput(_)));
    assert_eq!(oracle.calls(), 0);
}

#[test]
fn oracle_failures_leave_points_unresolved() {
    let oracle = CountingOracle::default();
    let registry = registry();
    let v1 = registry.lookup("V1").unwrap();
    let a1 = registry.lookup("A1").unwrap();
    let rescaler = CouplingRescaler::new(&oracle, RescaleOpts::default()).unwrap();
    let rescaled = rescaler
        .rescale(&curve(&[100.0, 200.0], &[0.1, 0.1]), v1, a1)
        .unwrap();
    assert_eq!(
        rescaled.unresolved(),
        vec![
            (100.0, UnresolvedReason::OracleFailure),
            (200.0, UnresolvedReason::OracleFailure)
        ]
    );
}

#[test]
fn cancelled_run_returns_cancelled() {
    let oracle = CountingOracle::default();
    let registry = registry();
    let v1 = registry.lookup("V1").unwrap();
    let rescaler = CouplingRescaler::new(&oracle, RescaleOpts::default()).unwrap();
    let cancel = AtomicBool::new(true);
    let limit: ExclusionCurve = curve(&[100.0, 200.0], &[0.1, 0.1]);
    let err = rescaler
        .rescale_with_cancel(&limit, v1, v1, &cancel)
        .unwrap_err();
    assert!(matches!(err, ReintError::Cancelled(_)));
    assert_eq!(oracle.calls(), 0);
}

#[test]
fn options_load_from_yaml_with_defaults() {
    let opts = RescaleOpts::from_yaml_slice(b"method: brent\nthreads: 2\n").unwrap();
    assert_eq!(opts.threads, 2);
    assert_eq!(opts.coupling_max, 4.0);
    assert_eq!(opts.max_iters, 200);
    let err = RescaleOpts::from_yaml_slice(b"tolerance: -1.0\n").unwrap_err();
    assert!(matches!(err, ReintError::MalformedInput(ref info) if info.code == "solver-tolerance"));
}
