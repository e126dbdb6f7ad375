mod cli;
mod logging;

use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use irrigation_flow::{load_observations, summarize, write_table, TrialConfig, WaterBalance};

use crate::cli::{Cli, Command, ComputeArgs, SummarizeArgs, TrialArgs};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Compute(args) => compute(args),
        Command::Summarize(args) => summarize_cmd(args),
    }
}

fn load_trial(args: &TrialArgs) -> Result<TrialConfig> {
    let mut config = match &args.config {
        Some(path) => TrialConfig::from_path(path)
            .with_context(|| format!("reading config {}", path.display()))?,
        None => TrialConfig::default(),
    };
    args.override_geometry(&mut config.geometry);
    config.geometry.validate()?;
    info!(
        acreage_row = config.geometry.acreage_row(),
        rows_diverted = config.geometry.rows_diverted,
        "field geometry"
    );
    Ok(config)
}

fn compute(args: ComputeArgs) -> Result<()> {
    let config = load_trial(&args.trial)?;

    let observations = load_observations(&args.input, &config.input)
        .with_context(|| format!("loading {}", args.input.display()))?;
    let mut computed = WaterBalance::new(config.geometry).compute(observations)?;

    write_table(&mut computed, &args.output)
        .with_context(|| format!("writing {}", args.output.display()))?;

    if let Some(path) = &args.summary {
        let mut table = summarize(&computed)?;
        write_table(&mut table, path).with_context(|| format!("writing {}", path.display()))?;
    }
    Ok(())
}

fn summarize_cmd(args: SummarizeArgs) -> Result<()> {
    let config = load_trial(&args.trial)?;

    let observations = load_observations(&args.input, &config.input)
        .with_context(|| format!("loading {}", args.input.display()))?;
    let computed = WaterBalance::new(config.geometry).compute(observations)?;

    let mut table = summarize(&computed)?;
    write_table(&mut table, &args.output)
        .with_context(|| format!("writing {}", args.output.display()))?;
    Ok(())
}
