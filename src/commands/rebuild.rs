//! # Rebuild Command Implementation
//!
//! This module implements the `rebuild` subcommand, which regenerates
//! every output from the checkouts already on disk. No network access
//! happens here: whatever state the work tree is in is what gets built.
//!
//! This is the recovery hatch after a deleted or mangled site tree, and
//! the natural follow-up to `pull`.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use ghp_builder::builder::SiteBuilder;
use ghp_builder::config::Config;
use ghp_builder::defaults;
use ghp_builder::output::{emoji, OutputConfig};

/// Rebuild every output from the existing checkouts, without pulling
#[derive(Args, Debug)]
pub struct RebuildArgs {
    /// Path to the .ghp-builder.yaml configuration file.
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = defaults::CONFIG_FILE,
        env = "GHP_BUILDER_CONFIG"
    )]
    pub config: PathBuf,

    /// Base directory holding the work and site trees.
    #[arg(short, long, value_name = "DIR", default_value = ".", env = "GHP_BUILDER_DIR")]
    pub directory: PathBuf,
}

/// Execute the `rebuild` command.
pub fn execute(args: RebuildArgs, color_flag: &str) -> Result<()> {
    let out = OutputConfig::from_env_and_flag(color_flag);
    let config_path = &args.config;

    let config = Config::from_file(config_path).map_err(|e| {
        anyhow::anyhow!(
            "Failed to load config from {}: {}",
            config_path.display(),
            e
        )
    })?;
    let builder = SiteBuilder::from_config(&config, &args.directory)?;

    println!(
        "{} Rebuilding site into {}",
        emoji(&out, "🔨", "[BUILD]"),
        builder.site_root().display()
    );
    let built = builder.rebuild()?;

    println!(
        "\n{} Rebuilt {} outputs in {}",
        emoji(&out, "✅", "[OK]"),
        built,
        builder.site_root().display()
    );
    Ok(())
}
