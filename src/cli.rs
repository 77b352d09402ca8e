use std::path::PathBuf;

use clap::Parser;

/// Command line options for the orbit pipeline.
#[derive(Parser, Debug)]
#[command(author, version, about = "Two-body satellite orbit visualiser")]
pub struct CliOptions {
    /// Path to the pipeline TOML configuration file.
    #[arg(long, value_name = "FILE", default_value = "config/orbit.toml")]
    pub config: PathBuf,

    /// Print configuration and derived parameters without writing artifacts.
    #[arg(long)]
    pub dry_run: bool,

    /// Skip the GIF animation and the frame sequence.
    #[arg(long)]
    pub skip_animation: bool,
}
