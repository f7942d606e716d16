use std::error::Error;
use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use reint_core::{serde_io, BenchmarkSpec};

use crate::io::load_registry;

#[derive(Args, Debug)]
pub struct BenchmarksArgs {
    /// YAML file with extra benchmarks.
    #[arg(long)]
    pub benchmarks: Option<PathBuf>,
}

pub fn run(args: &BenchmarksArgs) -> Result<(), Box<dyn Error>> {
    let registry = load_registry(args.benchmarks.as_deref())?;
    let listing: Vec<BenchmarkSpec> = registry.iter().map(BenchmarkSpec::from_benchmark).collect();
    let bytes = serde_io::to_pretty_json_bytes(&listing)?;
    std::io::stdout().lock().write_all(&bytes)?;
    Ok(())
}
