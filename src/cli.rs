//! CLI argument parsing and command dispatch

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::commands;
use ghp_builder::defaults;

/// GitHub Pages Builder - Assemble one site from many repositories
#[derive(Parser, Debug)]
#[command(name = "ghp-builder")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute; running with none does the right thing
    /// for the current directory state
    #[command(subcommand)]
    command: Option<Commands>,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check out all configured repositories and build the site
    Init(commands::init::InitArgs),

    /// Pull every checkout from its remote without rebuilding
    Pull(commands::pull::PullArgs),

    /// Rebuild every output from the existing checkouts, without pulling
    Rebuild(commands::rebuild::RebuildArgs),

    /// Pull every repository and rebuild the outputs that changed
    Build(commands::build::BuildArgs),

    /// Look at the on-disk state and do the right thing
    Dwim(commands::dwim::DwimArgs),

    /// Generate shell completion scripts
    Completions(commands::completions::CompletionsArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        env_logger::Builder::from_env(
            env_logger::Env::default().default_filter_or(self.log_level.as_str()),
        )
        .init();

        match self.command {
            Some(Commands::Init(args)) => commands::init::execute(args, &self.color),
            Some(Commands::Pull(args)) => commands::pull::execute(args, &self.color),
            Some(Commands::Rebuild(args)) => commands::rebuild::execute(args, &self.color),
            Some(Commands::Build(args)) => commands::build::execute(args, &self.color),
            Some(Commands::Dwim(args)) => commands::dwim::execute(args, &self.color),
            Some(Commands::Completions(args)) => commands::completions::execute(args),
            None => {
                // Bare invocation: behave exactly like `dwim` with default
                // arguments. The env override still applies because clap
                // never saw the flags.
                let args = commands::dwim::DwimArgs {
                    config: std::env::var_os("GHP_BUILDER_CONFIG")
                        .map(PathBuf::from)
                        .unwrap_or_else(|| PathBuf::from(defaults::CONFIG_FILE)),
                    directory: std::env::var_os("GHP_BUILDER_DIR")
                        .map(PathBuf::from)
                        .unwrap_or_else(|| PathBuf::from(".")),
                };
                commands::dwim::execute(args, &self.color)
            }
        }
    }
}
