use std::path::PathBuf;

use clap::Parser;
use condor_utils::{Result, logging, report};

/// Total/available units per resource class (CPUs and CUDA device models)
/// over `condor_status -json` machine ads.
#[derive(Parser)]
#[command(name = "free_resources")]
#[command(about = "Report available resources per class from condor_status -json", long_about = None)]
struct Cli {
    /// Machine-ad JSON dump; reads standard input when omitted.
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,
}

fn main() -> Result<()> {
    logging::init();
    let cli = Cli::parse();

    // 1) Parse machine ads.
    let text = report::read_input(cli.input.as_deref())?;
    let ads = report::parse_machine_ads(&text)?;

    // 2) Aggregate + print.
    let resources = report::build_resource_report(&ads);
    print!("{}", report::render_resource_report(&resources));

    Ok(())
}
