//! # GitHub Pages Site Builder Library
//!
//! This library provides the core functionality for assembling one
//! deployable static site out of several independently tracked GitHub
//! Pages repositories. It is designed to be used by the `ghp-builder`
//! command-line tool but can also be embedded in other applications that
//! maintain multi-repository sites.
//!
//! ## Quick Example
//!
//! ```
//! use ghp_builder::config::Config;
//!
//! let yaml = r#"
//! username: someone
//! repos:
//!   - name: blog
//!     path: ""
//!   - name: docs
//! "#;
//!
//! let config = Config::parse(yaml).unwrap();
//! config.validate().unwrap();
//!
//! // "blog" occupies the site root; "docs" lands in a subdirectory.
//! assert!(config.repos[0].is_main());
//! assert_eq!(config.repos[1].site_path(), "docs");
//! assert_eq!(config.remote_url("docs"), "https://github.com/someone/docs");
//! ```
//!
//! ## Core Concepts
//!
//! - **Configuration (`config`)**: the `.ghp-builder.yaml` schema, with
//!   up-front validation of the site layout before any external work runs.
//! - **Repository Units (`repository`)**: one checkout plus one output
//!   location per source repository, with checkout/pull/build operations.
//! - **Site Assembly (`builder`)**: ordering across units, including the
//!   clobber-recovery rule for the main site that occupies the site root.
//! - **External Tools (`git`, `generator`)**: trait-fronted wrappers
//!   around the system git command and the static-site generator.
//! - **Filesystem (`filesystem`)**: exclusion-aware verbatim copies and
//!   remove-then-recreate output replacement.
//!
//! ## Execution Flow
//!
//! A typical `dwim` run executes the following high-level steps:
//!
//! 1.  **Validate**: parse the configuration and reject invalid layouts.
//! 2.  **Inspect**: check which of the work and site roots exist on disk.
//! 3.  **Checkout**: clone any repository that has no checkout yet.
//! 4.  **Update**: pull the main site first, then every other repository.
//! 5.  **Build**: regenerate or copy outputs, rebuilding all subsites
//!     whenever the main site changed underneath them.
//!
//! Every step is strictly sequential, and the first failing external
//! command aborts the run.

pub mod builder;
pub mod config;
pub mod defaults;
pub mod error;
pub mod filesystem;
pub mod generator;
pub mod git;
pub mod output;
pub mod repository;

#[cfg(test)]
mod copy_proptest;
