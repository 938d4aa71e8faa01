//! # Pull Command Implementation
//!
//! This module implements the `pull` subcommand, which updates every
//! checkout from its remote without touching the site tree. It is the
//! fetch half of `build`, useful for inspecting incoming changes before
//! regenerating anything.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use ghp_builder::builder::SiteBuilder;
use ghp_builder::config::Config;
use ghp_builder::defaults;
use ghp_builder::output::{emoji, OutputConfig};

/// Pull every checkout from its remote without rebuilding
#[derive(Args, Debug)]
pub struct PullArgs {
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

/// Execute the `pull` command.
pub fn execute(args: PullArgs, color_flag: &str) -> Result<()> {
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

    let statuses = builder.pull()?;
    let mut stale = 0;
    for status in &statuses {
        if status.changed {
            stale += 1;
            println!(
                "{} {}: new commits pulled",
                emoji(&out, "✅", "[OK]"),
                status.name
            );
        } else {
            println!(
                "{} {}: already up to date",
                emoji(&out, "ℹ️", "[INFO]"),
                status.name
            );
        }
    }

    if stale > 0 {
        println!(
            "\n{} {} checkout(s) changed but the site was not rebuilt. Run 'ghp-builder rebuild' to refresh it.",
            emoji(&out, "💡", "[TIP]"),
            stale
        );
    } else {
        println!("\n{} Everything up to date", emoji(&out, "✅", "[OK]"));
    }
    Ok(())
}
