//! # Init Command Implementation
//!
//! This module implements the `init` subcommand, which bootstraps a site
//! directory from nothing: it clones every configured repository into the
//! work tree and then builds every output into the site tree.
//!
//! ## Functionality
//!
//! - **Checkout**: Repositories without a checkout are cloned at their
//!   configured branch. Existing checkouts are left alone, so `init` can
//!   be re-run safely after a partial failure.
//! - **Build**: Every output is built unconditionally afterwards, main
//!   site first, so a fresh directory ends up fully deployable.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use ghp_builder::builder::SiteBuilder;
use ghp_builder::config::Config;
use ghp_builder::defaults;
use ghp_builder::output::{emoji, OutputConfig};

/// Check out all configured repositories and build the site
#[derive(Args, Debug)]
pub struct InitArgs {
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

/// Execute the `init` command.
pub fn execute(args: InitArgs, color_flag: &str) -> Result<()> {
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
        "{} Checking out {} repositories into {}",
        emoji(&out, "🔄", "[CHECK]"),
        config.repos.len(),
        builder.work_root().display()
    );

    let report = builder.initial_checkout()?;
    for name in &report.cloned {
        println!("{} cloned {}", emoji(&out, "✅", "[OK]"), name);
    }
    for name in &report.skipped {
        println!(
            "{} {} already checked out, leaving it alone",
            emoji(&out, "ℹ️", "[INFO]"),
            name
        );
    }

    println!(
        "\n{} Building site into {}",
        emoji(&out, "🔨", "[BUILD]"),
        builder.site_root().display()
    );
    let built = builder.rebuild()?;

    println!(
        "\n{} Site assembled: {} outputs in {}",
        emoji(&out, "✅", "[OK]"),
        built,
        builder.site_root().display()
    );
    Ok(())
}
