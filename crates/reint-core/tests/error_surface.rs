use reint_core::errors::{ErrorInfo, ReintError};

fn sample_info(code: &str, message: &str) -> ErrorInfo {
    ErrorInfo::new(code, message)
        .with_context("mmed", "1000")
        .with_context("benchmark", "V1")
}

#[test]
fn malformed_input_surface() {
    let err = ReintError::MalformedInput(sample_info("length-mismatch", "arrays differ"));
    assert_eq!(err.info().code, "length-mismatch");
    assert!(err.info().context.contains_key("mmed"));
    assert!(!err.is_recoverable());
}

#[test]
fn per_point_failures_are_recoverable() {
    let recoverable = [
        ReintError::RescaleFailure(sample_info("above-range", "no root")),
        ReintError::NumericDivergence(sample_info("non-finite", "nan")),
        ReintError::Oracle(sample_info("unsupported-coupling", "scalar")),
    ];
    for err in recoverable {
        assert!(err.is_recoverable(), "{err}");
    }
}

#[test]
fn run_level_failures_are_fatal() {
    let fatal = [
        ReintError::UnknownBenchmark(sample_info("unknown-benchmark", "missing")),
        ReintError::IncompatibleBenchmark(sample_info("axial", "needs vector")),
        ReintError::EmptyResult(sample_info("no-contours", "nothing left")),
        ReintError::Cancelled(sample_info("cancelled", "stop")),
        ReintError::Io(sample_info("write", "denied")),
    ];
    for err in fatal {
        assert!(!err.is_recoverable(), "{err}");
    }
}

#[test]
fn display_carries_context_and_hint() {
    let err = ReintError::UnknownBenchmark(
        ErrorInfo::new("unknown-benchmark", "benchmark is not registered")
            .with_context("benchmark", "Z9")
            .with_hint("known benchmarks: A1"),
    );
    let rendered = err.to_string();
    assert!(rendered.starts_with("unknown benchmark:"));
    assert!(rendered.contains("benchmark=Z9"));
    assert!(rendered.contains("hint: known benchmarks: A1"));
}

#[test]
fn errors_serialise_with_family_tag() {
    let err = ReintError::EmptyResult(ErrorInfo::new("no-contours", "nothing left"));
    let json = serde_json::to_value(&err).expect("serialize");
    assert_eq!(json["family"], "EmptyResult");
    assert_eq!(json["detail"]["code"], "no-contours");
    let decoded: ReintError = serde_json::from_value(json).expect("deserialize");
    assert_eq!(decoded, err);
}
