use std::path::Path;

use clap::Parser;
use condor_utils::{Result, logging, reduce};

/// Aggregation step run by the reduce jobs: sum the parents' `.out` files
/// in the working directory and write the sum to `<ID>.out`.
#[derive(Parser)]
#[command(name = "add")]
#[command(about = "Sum parent job outputs into <ID>.out", long_about = None)]
struct Cli {
    /// Identifier of this job; the sum is written to `<ID>.out`.
    #[arg(value_name = "ID")]
    id: String,

    /// Comma-joined identifiers of the parent jobs to sum.
    #[arg(value_name = "PARENTS")]
    parents: String,
}

fn main() -> Result<()> {
    logging::init();
    let cli = Cli::parse();

    let parents = reduce::split_parents(&cli.parents);
    reduce::reduce_outputs(Path::new("."), &cli.id, &parents)?;

    Ok(())
}
