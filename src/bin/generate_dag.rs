use clap::Parser;
use condor_utils::dag::{TreeBuilder, render_dag};
use condor_utils::{Result, logging};

/// Build a map-reduce job DAG over the given values and print it in
/// DAGMan's input syntax.
#[derive(Parser)]
#[command(name = "generate_dag")]
#[command(about = "Emit a DAGMan map-reduce tree over the given values", long_about = None)]
struct Cli {
    /// Input values; each becomes one map job, in order.
    #[arg(value_name = "VALUE", required = true)]
    values: Vec<String>,
}

fn main() -> Result<()> {
    logging::init();
    let cli = Cli::parse();

    // 1) Fold the values into the reduction tree.
    let graph = TreeBuilder::new().build(&cli.values)?;

    // 2) Serialize for DAGMan.
    print!("{}", render_dag(&graph));

    Ok(())
}
