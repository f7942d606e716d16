use reint_core::{Benchmark, BenchmarkRegistry, CouplingType, DarkMatterMass, ReintError};
use reint_dp::constants::Z_MASS;
use reint_dp::{
    kinetic_mixing, DarkPhotonLimit, DarkPhotonMapper, DarkPhotonOpts, ThresholdPolicy,
};
use reint_rescale::{Contour, RescaledLimit};

fn vector_benchmark(name: &str, mdm: f64) -> Benchmark {
    Benchmark {
        name: name.to_string(),
        gq: 0.25,
        gdm: 1.0,
        gl: 0.0,
        coupling_type: CouplingType::Vector,
        dm_mass: DarkMatterMass::Fixed(mdm),
        ecm_sqrt: 13.0,
        pdfset: "NNPDF31_nnlo_as_0118".to_string(),
        description: None,
    }
}

fn contours(limit: &RescaledLimit, benchmark: &Benchmark) -> Vec<Contour> {
    limit.into_contours(benchmark).unwrap()
}

#[test]
fn two_point_limit_maps_onto_epsilon_and_yield() {
    let benchmark = vector_benchmark("dp_mdm200", 200.0);
    let limit = RescaledLimit {
        mmed_contours: vec![vec![1000.0, 2000.0]],
        gq_contours: vec![vec![0.1, 0.05]],
        benchmark: benchmark.name.clone(),
    };
    let mapper = DarkPhotonMapper::default();
    let results = mapper
        .map(&contours(&limit, &benchmark), &benchmark, 0.5)
        .unwrap();
    let artefact = DarkPhotonLimit::from_results(&results, &benchmark.name, 0.5).unwrap();

    assert_eq!(artefact.benchmark, "dp_mdm200");
    assert_eq!(artefact.point_count(), 2);
    assert_eq!(artefact.mmed_contours, vec![vec![1000.0, 2000.0]]);
    for (idx, (&mmed, &gq)) in [1000.0, 2000.0].iter().zip(&[0.1, 0.05]).enumerate() {
        let epsilon = artefact.epsilon_contours[0][idx];
        assert!((epsilon - kinetic_mixing(gq, mmed)).abs() < 1e-15);
        let expected_y = epsilon * epsilon * 0.5 * (200.0f64 / mmed).powi(4);
        assert!((artefact.y_contours[0][idx] - expected_y).abs() <= 1e-12 * expected_y);
        assert!(!artefact.near_threshold_contours[0][idx]);
    }
}

#[test]
fn incompatible_benchmarks_are_rejected() {
    let registry = BenchmarkRegistry::builtin();
    let mapper = DarkPhotonMapper::default();
    let limit = RescaledLimit {
        mmed_contours: vec![vec![1000.0, 2000.0]],
        gq_contours: vec![vec![0.1, 0.05]],
        benchmark: "A1".to_string(),
    };
    for name in ["A1", "A2", "V2"] {
        let benchmark = registry.lookup(name).unwrap();
        let err = mapper
            .map(&contours(&limit, benchmark), benchmark, 0.5)
            .unwrap_err();
        assert!(matches!(err, ReintError::IncompatibleBenchmark(_)), "{name}");
    }
    let mut heavy_dark = vector_benchmark("heavy", 1.0);
    heavy_dark.gdm = 0.5;
    let err = mapper
        .map(&contours(&limit, &heavy_dark), &heavy_dark, 0.5)
        .unwrap_err();
    assert!(matches!(err, ReintError::IncompatibleBenchmark(_)));
}

#[test]
fn threshold_points_are_flagged_by_default() {
    let benchmark = vector_benchmark("dp", 100.0);
    let limit = RescaledLimit {
        mmed_contours: vec![vec![150.0, 200.0, 260.0, 300.0]],
        gq_contours: vec![vec![0.1, 0.1, 0.1, 0.1]],
        benchmark: "dp".to_string(),
    };
    let results = DarkPhotonMapper::default()
        .map(&contours(&limit, &benchmark), &benchmark, 0.5)
        .unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].near_threshold(), vec![false, true, false, false]);
}

#[test]
fn excluded_threshold_points_split_contours() {
    let benchmark = vector_benchmark("dp", 100.0);
    let limit = RescaledLimit {
        mmed_contours: vec![vec![120.0, 150.0, 200.0, 260.0, 300.0]],
        gq_contours: vec![vec![0.1; 5]],
        benchmark: "dp".to_string(),
    };
    let mapper = DarkPhotonMapper::new(DarkPhotonOpts {
        policy: ThresholdPolicy::Exclude,
        ..DarkPhotonOpts::default()
    })
    .unwrap();
    let results = mapper
        .map(&contours(&limit, &benchmark), &benchmark, 0.5)
        .unwrap();
    let masses: Vec<Vec<f64>> = results.iter().map(|r| r.masses()).collect();
    assert_eq!(masses, vec![vec![120.0, 150.0], vec![260.0, 300.0]]);
}

#[test]
fn z_pole_band_is_handled_like_the_dark_matter_threshold() {
    let benchmark = vector_benchmark("dp", 1.0);
    let limit = RescaledLimit {
        mmed_contours: vec![vec![60.0, Z_MASS, 150.0]],
        gq_contours: vec![vec![0.1; 3]],
        benchmark: "dp".to_string(),
    };
    let mapper = DarkPhotonMapper::new(DarkPhotonOpts {
        policy: ThresholdPolicy::Exclude,
        ..DarkPhotonOpts::default()
    })
    .unwrap();
    let err = mapper
        .map(&contours(&limit, &benchmark), &benchmark, 0.5)
        .unwrap_err();
    assert!(matches!(err, ReintError::EmptyResult(_)));
}

#[test]
fn minimal_dark_photon_uses_a_mediator_fraction() {
    let registry = BenchmarkRegistry::builtin();
    let benchmark = registry.lookup("minimal_dark_photon").unwrap();
    let limit = RescaledLimit {
        mmed_contours: vec![vec![900.0, 1200.0]],
        gq_contours: vec![vec![0.1, 0.1]],
        benchmark: benchmark.name.clone(),
    };
    let mapper = DarkPhotonMapper::default();
    let alpha_d = mapper.alpha_d_for(benchmark);
    let results = mapper
        .map(&contours(&limit, benchmark), benchmark, alpha_d)
        .unwrap();
    for point in &results[0].points {
        assert!((point.dm_mass - point.mediator_mass / 3.0).abs() < 1e-9);
        let expected = point.epsilon.powi(2) * alpha_d / 81.0;
        assert!((point.y(alpha_d) - expected).abs() <= 1e-12 * expected);
    }
}

#[test]
fn options_parse_from_yaml() {
    let opts = DarkPhotonOpts::from_yaml_slice(b"policy: exclude\nalpha_d: 0.5\n").unwrap();
    assert_eq!(opts.policy, ThresholdPolicy::Exclude);
    assert_eq!(opts.alpha_d, Some(0.5));
    assert_eq!(opts.threshold_band, 0.05);
    let err = DarkPhotonOpts::from_yaml_slice(b"alpha_d: 0.0\n").unwrap_err();
    assert!(matches!(err, ReintError::MalformedInput(_)));
}

#[test]
fn non_positive_alpha_d_is_malformed() {
    let benchmark = vector_benchmark("dp", 200.0);
    let limit = RescaledLimit {
        mmed_contours: vec![vec![1000.0, 2000.0]],
        gq_contours: vec![vec![0.1, 0.05]],
        benchmark: "dp".to_string(),
    };
    let err = DarkPhotonMapper::default()
        .map(&contours(&limit, &benchmark), &benchmark, -1.0)
        .unwrap_err();
    assert!(matches!(err, ReintError::MalformedInput(_)));
}
