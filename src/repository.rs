//! # Repository Units
//!
//! This module provides `PagesRepo`, one external site source with a
//! checkout location and a build output location. A unit knows how to
//! check itself out, detect upstream change, and build itself; ordering
//! across units is the site builder's concern.
//!
//! ## Design
//!
//! A unit's identity (name, remote URL, branch) and its two paths are
//! fixed at construction. Everything else is derived from disk state at
//! call time; in particular the generation opt-out is re-read on every
//! build, so committing or removing the marker file takes effect on the
//! next run without any cached state.
//!
//! External effects go through the `GitOperations` and `SiteGenerator`
//! traits, which allows the update-and-rebuild logic to be tested with
//! mock implementations that never touch the network.

use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::defaults;
use crate::error::Result;
use crate::filesystem::{self, ExcludeList};
use crate::generator::SiteGenerator;
use crate::git::GitOperations;

/// One external site source with a checkout and a build output location.
#[derive(Debug)]
pub struct PagesRepo {
    name: String,
    url: String,
    branch: String,
    checkout: PathBuf,
    output: PathBuf,
}

impl PagesRepo {
    pub fn new(
        name: String,
        url: String,
        branch: String,
        checkout: PathBuf,
        output: PathBuf,
    ) -> Self {
        Self {
            name,
            url,
            branch,
            checkout,
            output,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn checkout_dir(&self) -> &Path {
        &self.checkout
    }

    pub fn output_dir(&self) -> &Path {
        &self.output
    }

    /// Whether a checkout is already present on disk.
    ///
    /// An existing but empty directory counts as not checked out; git is
    /// happy to clone into it.
    pub fn is_checked_out(&self) -> Result<bool> {
        if !self.checkout.exists() {
            return Ok(false);
        }
        Ok(!filesystem::dir_is_empty(&self.checkout)?)
    }

    /// Whether this repository's output is produced by the site generator.
    ///
    /// Decided by the absence of the opt-out marker at the top of the
    /// checkout, re-read on every call rather than cached.
    pub fn should_generate(&self) -> bool {
        !self.checkout.join(defaults::NOJEKYLL_MARKER).exists()
    }

    /// Clones the remote at the configured branch into the checkout
    /// directory, which must not already hold a checkout.
    pub fn checkout(&self, git: &dyn GitOperations) -> Result<()> {
        info!(
            "cloning {} ({}) into {}",
            self.url,
            self.branch,
            self.checkout.display()
        );
        git.clone_branch(&self.url, &self.branch, &self.checkout)
    }

    /// Pulls the checkout and reports whether its revision changed.
    pub fn pull(&self, git: &dyn GitOperations) -> Result<bool> {
        let before = git.head_commit(&self.checkout)?;
        git.pull(&self.checkout)?;
        let after = git.head_commit(&self.checkout)?;
        debug!("{}: {} -> {}", self.name, before, after);
        Ok(before != after)
    }

    /// Builds this repository's output from its checkout.
    ///
    /// Generated repositories hand the checkout to the site generator.
    /// Opted-out repositories get a verbatim copy with the exclusion set
    /// applied, replacing any previous output wholesale.
    pub fn build(&self, generator: &dyn SiteGenerator, excludes: &ExcludeList) -> Result<()> {
        if self.should_generate() {
            info!("generating {} into {}", self.name, self.output.display());
            if let Some(parent) = self.output.parent() {
                filesystem::ensure_dir(parent)?;
            }
            generator.generate(&self.checkout, &self.output)
        } else {
            info!("copying {} into {}", self.name, self.output.display());
            filesystem::remove_tree(&self.output)?;
            let copied = filesystem::copy_tree(&self.checkout, &self.output, excludes)?;
            debug!("{}: copied {} files", self.name, copied);
            Ok(())
        }
    }

    /// Pulls, and rebuilds only if the revision changed. Returns whether
    /// it changed.
    pub fn update_and_build(
        &self,
        git: &dyn GitOperations,
        generator: &dyn SiteGenerator,
        excludes: &ExcludeList,
    ) -> Result<bool> {
        let changed = self.pull(git)?;
        if changed {
            self.build(generator, excludes)?;
        }
        Ok(changed)
    }
}
