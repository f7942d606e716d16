use std::error::Error;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use commands::{
    benchmarks::{self, BenchmarksArgs},
    dark_photon::{self, DarkPhotonArgs},
    pipeline::{self, PipelineArgs},
    rescale::{self, RescaleArgs},
};

mod commands;
mod config;
mod io;
mod logging;

#[derive(Parser, Debug)]
#[command(name = "reint", about = "Dijet coupling-limit reinterpretation", version)]
struct Cli {
    /// Debug-level logging.
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Rescale a coupling limit to another benchmark.
    Rescale(RescaleArgs),
    /// Map a rescaled vector-mediator limit onto dark photon parameters.
    DarkPhoton(DarkPhotonArgs),
    /// Rescale and map in one go.
    Pipeline(PipelineArgs),
    /// List registered benchmarks as JSON.
    Benchmarks(BenchmarksArgs),
}

fn dispatch(command: &Command) -> Result<(), Box<dyn Error>> {
    match command {
        Command::Rescale(args) => rescale::run(args),
        Command::DarkPhoton(args) => dark_photon::run(args),
        Command::Pipeline(args) => pipeline::run(args),
        Command::Benchmarks(args) => benchmarks::run(args),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_cli_logger(cli.verbose);
    match dispatch(&cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "run failed");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
