use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "aquapig", version, about = "Aquatic pigments post-processing CLI")]
pub struct CliArgs {
    /// Run configuration JSON produced by the upstream stage
    pub runconfig: PathBuf,

    /// Directory holding the staged input datasets
    #[arg(long, default_value = "input")]
    pub input_dir: PathBuf,

    /// Scratch directory for retrieval work products and intermediates
    #[arg(long, default_value = "work")]
    pub work_dir: PathBuf,

    /// Directory receiving the distributable artifacts and the catalog
    #[arg(long, default_value = "output")]
    pub output_dir: PathBuf,

    /// Chlorophyll-a retrieval model executable
    #[arg(long)]
    pub chla_model: PathBuf,

    /// Phycocyanin retrieval model executable
    #[arg(long)]
    pub phyco_model: PathBuf,

    /// Enable debug logging
    #[arg(long, default_value_t = false)]
    pub log: bool,
}
