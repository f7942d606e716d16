use std::error::Error;
use std::path::{Path, PathBuf};

use clap::Args;
use reint_core::errors::ReintError;
use reint_core::{serde_io, BenchmarkRegistry, BenchmarkSpec, LimitInput};
use reint_rescale::{
    extract, CouplingRescaler, DijetWidthOracle, RescaleOpts, RescaleReport, RescaledLimit,
};

use crate::io::{load_config, load_registry, read_json, timestamp, OutputSet};

#[derive(Args, Debug)]
pub struct RescaleArgs {
    /// Limit JSON with `mmed`, `mdm` and `gq_limit` arrays.
    #[arg(long)]
    pub limit: PathBuf,
    /// Source-info JSON describing the coupling configuration of the limit.
    #[arg(long)]
    pub source_info: PathBuf,
    /// Registered benchmark to rescale to.
    #[arg(long)]
    pub target: String,
    /// Output rescaled-limit JSON.
    #[arg(long)]
    pub out: PathBuf,
    /// YAML file with extra benchmarks.
    #[arg(long)]
    pub benchmarks: Option<PathBuf>,
    /// YAML pipeline configuration.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Optional run report JSON.
    #[arg(long)]
    pub report: Option<PathBuf>,
}

/// Rescaled limit plus its run report, nothing written yet.
pub struct RescaleOutcome {
    pub limit: RescaledLimit,
    pub report: RescaleReport,
}

pub fn rescale_limit(
    limit_path: &Path,
    source_info: &Path,
    target: &str,
    registry: &BenchmarkRegistry,
    opts: RescaleOpts,
) -> Result<RescaleOutcome, ReintError> {
    let input: LimitInput = read_json(limit_path)?;
    let curve = input.to_curve()?;
    let spec: BenchmarkSpec = read_json(source_info)?;
    let source = spec.into_benchmark("source")?;
    let target = registry.lookup(target)?;

    let oracle = DijetWidthOracle;
    let rescaler = CouplingRescaler::new(&oracle, opts)?;
    let rescaled = rescaler.rescale(&curve, &source, target)?;
    let contours = extract(&rescaled);
    let limit = RescaledLimit::from_contours(&contours, &target.name)?;
    let mut report = RescaleReport::build(
        &curve,
        &source,
        target,
        rescaler.engine().oracle_name(),
        &rescaled,
        &contours,
    )?;
    report.provenance = report.provenance.stamped(timestamp());
    Ok(RescaleOutcome { limit, report })
}

/// Stages the run report as canonical JSON.
pub fn stage_report(
    outputs: &mut OutputSet,
    path: &Path,
    report: &RescaleReport,
) -> Result<(), ReintError> {
    let mut bytes = serde_io::to_canonical_json_bytes(report)?;
    bytes.push(b'\n');
    outputs.stage_bytes(path, &bytes)
}

pub fn run(args: &RescaleArgs) -> Result<(), Box<dyn Error>> {
    let registry = load_registry(args.benchmarks.as_deref())?;
    let config = load_config(args.config.as_deref())?;
    let outcome = rescale_limit(
        &args.limit,
        &args.source_info,
        &args.target,
        &registry,
        config.rescale,
    )?;

    let mut outputs = OutputSet::new();
    outputs.stage_json(&args.out, &outcome.limit)?;
    if let Some(path) = &args.report {
        stage_report(&mut outputs, path, &outcome.report)?;
    }
    outputs.commit()?;
    tracing::info!(
        out = %args.out.display(),
        contours = outcome.limit.mmed_contours.len(),
        "rescaled limit written"
    );
    Ok(())
}
