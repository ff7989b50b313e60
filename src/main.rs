use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod api;
mod batch;
mod cli;
mod deploy;
mod generator;
mod model;
mod workflow;

use cli::{Command, RootArgs};

fn main() -> Result<()> {
    let args = RootArgs::parse();
    init_tracing(args.verbose);

    match &args.command {
        Command::Init(args) => workflow::run_init(args),
        Command::Generate(args) => workflow::run_generate(args),
        Command::Deploy(args) => workflow::run_deploy(args),
        Command::Status(args) => workflow::run_status(args),
        Command::Clear(args) => workflow::run_clear(args),
    }
}

/// Logs go to stderr so `--json` output on stdout stays parseable.
fn init_tracing(verbose: bool) {
    let default_directive = if verbose {
        "staff_onboard=debug"
    } else {
        "staff_onboard=info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
