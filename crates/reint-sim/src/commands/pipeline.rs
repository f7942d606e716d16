use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use reint_core::MINIMAL_DARK_PHOTON;

use crate::commands::dark_photon::{map_limit, mapper_opts};
use crate::commands::rescale::{rescale_limit, stage_report};
use crate::io::{load_config, load_registry, OutputSet};

#[derive(Args, Debug)]
pub struct PipelineArgs {
    /// Limit JSON with `mmed`, `mdm` and `gq_limit` arrays.
    #[arg(long)]
    pub limit: PathBuf,
    /// Source-info JSON describing the coupling configuration of the limit.
    #[arg(long)]
    pub source_info: PathBuf,
    /// Vector benchmark to rescale to before the dark photon mapping.
    #[arg(long, default_value = MINIMAL_DARK_PHOTON)]
    pub target: String,
    /// Output rescaled-limit JSON.
    #[arg(long)]
    pub rescaled_out: PathBuf,
    /// Output dark photon JSON.
    #[arg(long)]
    pub out: PathBuf,
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
    /// Optional run report JSON.
    #[arg(long)]
    pub report: Option<PathBuf>,
}

pub fn run(args: &PipelineArgs) -> Result<(), Box<dyn Error>> {
    let registry = load_registry(args.benchmarks.as_deref())?;
    let config = load_config(args.config.as_deref())?;
    let rescaled = rescale_limit(
        &args.limit,
        &args.source_info,
        &args.target,
        &registry,
        config.rescale,
    )?;
    let opts = mapper_opts(config.dark_photon, args.alpha_d, args.exclude_threshold);
    let dark_photon = map_limit(&rescaled.limit, None, &registry, opts)?;

    let mut outputs = OutputSet::new();
    outputs.stage_json(&args.rescaled_out, &rescaled.limit)?;
    outputs.stage_json(&args.out, &dark_photon)?;
    if let Some(path) = &args.report {
        stage_report(&mut outputs, path, &rescaled.report)?;
    }
    outputs.commit()?;
    tracing::info!(
        benchmark = %args.target,
        points = dark_photon.point_count(),
        "pipeline finished"
    );
    Ok(())
}
