//! # CLI Command Implementations
//!
//! This module contains the implementation for each subcommand of the
//! `ghp-builder` command-line tool. Each subcommand is defined in its own
//! file to keep the logic separated and maintainable.
//!
//! ## Structure
//!
//! Each command module typically contains:
//! - An `Args` struct that defines the command-specific arguments and
//!   options, derived using `clap`.
//! - An `execute` function that takes the parsed `Args` and the global
//!   `--color` flag, loads the configuration, and drives the site builder.
//!
//! The commands map one-to-one onto builder passes: `init` checks out and
//! builds everything, `pull` only fetches, `rebuild` only builds, `build`
//! does an incremental pass, and `dwim` picks among them from the on-disk
//! state.

pub mod build;
pub mod completions;
pub mod dwim;
pub mod init;
pub mod pull;
pub mod rebuild;
