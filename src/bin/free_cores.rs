use std::path::PathBuf;

use clap::Parser;
use condor_utils::{Result, logging, report};

/// Per-node free CPU/GPU table over `condor_status -json` machine ads.
#[derive(Parser)]
#[command(name = "free_cores")]
#[command(about = "Report free CPUs/GPUs per node from condor_status -json", long_about = None)]
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
    let cores = report::build_core_report(&ads)?;
    print!("{}", report::render_core_report(&cores));

    Ok(())
}
