use std::path::PathBuf;

use clap::{Parser, Subcommand};

use irrigation_flow::FieldGeometry;

/// Surface-irrigation water balance from bucket and flume readings.
#[derive(Parser)]
#[command(
    name = "irrigation-flow",
    version,
    about = "Inflow, outflow and infiltration for furrow irrigation trials"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Compute the water balance for every observation.
    Compute(ComputeArgs),
    /// Compute, then write replicate means per plot and date.
    Summarize(SummarizeArgs),
}

/// Arguments for the `compute` subcommand.
#[derive(clap::Args)]
pub struct ComputeArgs {
    /// Observation CSV.
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output table (.csv or .parquet).
    #[arg(short, long)]
    pub output: PathBuf,

    /// Also write the per-plot summary here.
    #[arg(long)]
    pub summary: Option<PathBuf>,

    #[command(flatten)]
    pub trial: TrialArgs,
}

/// Arguments for the `summarize` subcommand.
#[derive(clap::Args)]
pub struct SummarizeArgs {
    /// Observation CSV.
    #[arg(short, long)]
    pub input: PathBuf,

    /// Summary table (.csv or .parquet).
    #[arg(short, long)]
    pub output: PathBuf,

    #[command(flatten)]
    pub trial: TrialArgs,
}

/// Config file plus per-field geometry overrides.
#[derive(clap::Args)]
pub struct TrialArgs {
    /// Path to TOML trial configuration.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Bucket volume [L].
    #[arg(long)]
    pub bucket_size_l: Option<f64>,

    /// Furrow spacing [in].
    #[arg(long)]
    pub row_spacing_in: Option<f64>,

    /// Field run length [ft].
    #[arg(long)]
    pub field_length_ft: Option<f64>,

    /// Rows diverted into the flume.
    #[arg(long)]
    pub rows_diverted: Option<u32>,
}

impl TrialArgs {
    /// Apply any overrides given on the command line.
    pub fn override_geometry(&self, geometry: &mut FieldGeometry) {
        if let Some(v) = self.bucket_size_l {
            geometry.bucket_size_l = v;
        }
        if let Some(v) = self.row_spacing_in {
            geometry.row_spacing_in = v;
        }
        if let Some(v) = self.field_length_ft {
            geometry.field_length_ft = v;
        }
        if let Some(v) = self.rows_diverted {
            geometry.rows_diverted = v;
        }
    }
}
