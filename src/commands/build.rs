//! # Build Command Implementation
//!
//! This module implements the `build` subcommand, the incremental update
//! pass: every checkout is pulled, and only the ones with new commits
//! are rebuilt. A changed main site additionally triggers a rebuild of
//! every other output, because regenerating the site root clobbers the
//! subdirectories nested inside it.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use ghp_builder::builder::SiteBuilder;
use ghp_builder::config::Config;
use ghp_builder::defaults;
use ghp_builder::output::{emoji, OutputConfig};

/// Pull every repository and rebuild the outputs that changed
#[derive(Args, Debug)]
pub struct BuildArgs {
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

/// Execute the `build` command.
pub fn execute(args: BuildArgs, color_flag: &str) -> Result<()> {
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

    let report = builder.build()?;
    print_report(&out, &report);
    Ok(())
}

fn print_report(out: &OutputConfig, report: &ghp_builder::builder::BuildReport) {
    if report.main_changed {
        println!(
            "{} Main site changed; every output was refreshed",
            emoji(out, "🔨", "[BUILD]")
        );
    }
    for name in &report.rebuilt {
        println!("{} {}: updated and rebuilt", emoji(out, "✅", "[OK]"), name);
    }
    for name in &report.unchanged {
        println!(
            "{} {}: no new commits",
            emoji(out, "ℹ️", "[INFO]"),
            name
        );
    }

    if !report.main_changed && report.rebuilt.is_empty() {
        println!("\n{} Site already up to date", emoji(out, "✅", "[OK]"));
    } else {
        println!(
            "\n{} Build finished: {} updated, {} unchanged",
            emoji(out, "✅", "[OK]"),
            report.rebuilt.len(),
            report.unchanged.len()
        );
    }
}
