//! Aquapig CLI entrypoint.
//!
//! Provides a thin wrapper over the `cli` module: parse args, run the
//! pipeline, and exit with appropriate status. For programmatic use, prefer
//! the library API (`aquapig::pipeline`).

use clap::Parser;

mod cli;

fn main() -> aquapig::Result<()> {
    let args = cli::CliArgs::parse();
    cli::run(args)
}
