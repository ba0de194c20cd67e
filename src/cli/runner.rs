use tracing::info;
use tracing_subscriber::EnvFilter;

use aquapig::config::{Dirs, RunConfig};
use aquapig::pipeline::Pipeline;

use super::args::CliArgs;

pub fn run(args: CliArgs) -> aquapig::Result<()> {
    let default_level = if args.log { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    info!(runconfig = %args.runconfig.display(), "reading runconfig");
    let config = RunConfig::from_file(&args.runconfig)?;

    let pipeline = Pipeline {
        runconfig_path: args.runconfig,
        config,
        dirs: Dirs::new(args.input_dir, args.work_dir, args.output_dir),
        chla_model: args.chla_model,
        phyco_model: args.phyco_model,
    };

    let root = pipeline.run()?;
    info!(catalog_root = %root.display(), "done");
    Ok(())
}
