//! # Dwim Command Implementation
//!
//! This module implements the `dwim` subcommand, the default when the
//! binary is invoked without one. It inspects the on-disk state and runs
//! whichever pass fits: a full init when nothing exists yet, an
//! offline rebuild when checkouts exist but the site tree is missing,
//! and an incremental build otherwise.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use ghp_builder::builder::{DwimAction, SiteBuilder};
use ghp_builder::config::Config;
use ghp_builder::defaults;
use ghp_builder::output::{emoji, OutputConfig};

/// Look at the on-disk state and do the right thing
#[derive(Args, Debug)]
pub struct DwimArgs {
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

/// Execute the `dwim` command.
pub fn execute(args: DwimArgs, color_flag: &str) -> Result<()> {
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

    match builder.dwim()? {
        DwimAction::FullInit { checkout, built } => {
            println!(
                "{} No work directory found; ran a full init",
                emoji(&out, "🔄", "[CHECK]")
            );
            for name in &checkout.cloned {
                println!("{} cloned {}", emoji(&out, "✅", "[OK]"), name);
            }
            println!(
                "\n{} Site assembled: {} outputs in {}",
                emoji(&out, "✅", "[OK]"),
                built,
                builder.site_root().display()
            );
        }
        DwimAction::RebuildOnly { built } => {
            println!(
                "{} Site directory was missing; rebuilt it from the existing checkouts",
                emoji(&out, "🔨", "[BUILD]")
            );
            println!(
                "\n{} Rebuilt {} outputs in {}",
                emoji(&out, "✅", "[OK]"),
                built,
                builder.site_root().display()
            );
        }
        DwimAction::Incremental(report) => {
            if report.main_changed {
                println!(
                    "{} Main site changed; every output was refreshed",
                    emoji(&out, "🔨", "[BUILD]")
                );
            }
            for name in &report.rebuilt {
                println!("{} {}: updated and rebuilt", emoji(&out, "✅", "[OK]"), name);
            }
            for name in &report.unchanged {
                println!(
                    "{} {}: no new commits",
                    emoji(&out, "ℹ️", "[INFO]"),
                    name
                );
            }
            if !report.main_changed && report.rebuilt.is_empty() {
                println!("\n{} Site already up to date", emoji(&out, "✅", "[OK]"));
            } else {
                println!(
                    "\n{} Build finished: {} updated, {} unchanged",
                    emoji(&out, "✅", "[OK]"),
                    report.rebuilt.len(),
                    report.unchanged.len()
                );
            }
        }
    }
    Ok(())
}
