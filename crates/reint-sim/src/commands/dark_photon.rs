use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use reint_core::errors::ReintError;
use reint_core::BenchmarkRegistry;
use reint_dp::{DarkPhotonLimit, DarkPhotonMapper, DarkPhotonOpts, ThresholdPolicy};
use reint_rescale::RescaledLimit;

use crate::io::{load_config, load_registry, read_json, OutputSet};

#[derive(Args, Debug)]
pub struct DarkPhotonArgs {
    /// Rescaled-limit JSON produced by `reint rescale`.
    #[arg(long)]
    pub input: PathBuf,
    /// Output dark photon JSON.
    #[arg(long)]
    pub out: PathBuf,
    /// Benchmark to interpret the input under; defaults to the one it names.
    #[arg(long)]
    pub benchmark: Option<String>,
    /// Dark coupling strength; defaults to gdm^2 / 4 pi.
    #[arg(long)]
    pub alpha_d: Option<f64>,
    /// Drop threshold-band points instead of flagging them.
    #[arg(long)]
    pub exclude_threshold: bool,
    /// YAML file with extra benchmarks.
    #[arg(long)]
    pub benchmarks: Option<PathBuf>,
    /// YAML pipeline configuration.
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Applies command-line overrides on top of the configured options.
pub fn mapper_opts(
    mut opts: DarkPhotonOpts,
    alpha_d: Option<f64>,
    exclude_threshold: bool,
) -> DarkPhotonOpts {
    if alpha_d.is_some() {
        opts.alpha_d = alpha_d;
    }
    if exclude_threshold {
        opts.policy = ThresholdPolicy::Exclude;
    }
    opts
}

pub fn map_limit(
    input: &RescaledLimit,
    benchmark: Option<&str>,
    registry: &BenchmarkRegistry,
    opts: DarkPhotonOpts,
) -> Result<DarkPhotonLimit, ReintError> {
    let benchmark = registry.lookup(benchmark.unwrap_or(&input.benchmark))?;
    let mapper = DarkPhotonMapper::new(opts)?;
    DarkPhotonMapper::check_benchmark(benchmark)?;
    let alpha_d = mapper.alpha_d_for(benchmark);
    let contours = input.into_contours(benchmark)?;
    let results = mapper.map(&contours, benchmark, alpha_d)?;
    DarkPhotonLimit::from_results(&results, &benchmark.name, alpha_d)
}

pub fn run(args: &DarkPhotonArgs) -> Result<(), Box<dyn Error>> {
    let registry = load_registry(args.benchmarks.as_deref())?;
    let config = load_config(args.config.as_deref())?;
    let input: RescaledLimit = read_json(&args.input)?;
    let opts = mapper_opts(config.dark_photon, args.alpha_d, args.exclude_threshold);
    let limit = map_limit(&input, args.benchmark.as_deref(), &registry, opts)?;

    let mut outputs = OutputSet::new();
    outputs.stage_json(&args.out, &limit)?;
    outputs.commit()?;
    tracing::info!(
        out = %args.out.display(),
        points = limit.point_count(),
        "dark photon limit written"
    );
    Ok(())
}
