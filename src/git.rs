//! # Git Process Wrappers
//!
//! Thin wrappers around the system `git` command. The builder needs exactly
//! three operations: clone-with-branch, pull, and resolving the current
//! revision identifier.
//!
//! This uses the system git command, which automatically handles:
//! - SSH keys from ~/.ssh/
//! - Git credential helpers
//! - Personal access tokens
//! - Any authentication configured in ~/.gitconfig
//!
//! The subcommands that operate on an existing checkout take the working
//! directory explicitly rather than changing the process working directory,
//! so callers never have to restore it.

use std::path::Path;
use std::process::Command;

use log::debug;

use crate::error::{Error, Result};

/// Trait for git operations - allows mocking in tests
pub trait GitOperations: Send + Sync {
    /// Clones `url` at `branch` into `target_dir`.
    ///
    /// The parent of `target_dir` must exist; git creates the directory
    /// itself, which must not already hold a checkout.
    fn clone_branch(&self, url: &str, branch: &str, target_dir: &Path) -> Result<()>;

    /// Runs `git pull` inside an existing checkout.
    fn pull(&self, workdir: &Path) -> Result<()>;

    /// Resolves the identifier of the checkout's current revision.
    fn head_commit(&self, workdir: &Path) -> Result<String>;
}

/// The default implementation of `GitOperations`, which uses the system's
/// `git` command to perform real Git operations.
pub struct SystemGit;

impl GitOperations for SystemGit {
    fn clone_branch(&self, url: &str, branch: &str, target_dir: &Path) -> Result<()> {
        debug!("git clone -b {} {} {}", branch, url, target_dir.display());
        let output = Command::new("git")
            .args(["clone", "-b", branch, url])
            .arg(target_dir)
            .output()
            .map_err(|e| Error::GitClone {
                url: url.to_string(),
                branch: branch.to_string(),
                message: e.to_string(),
                hint: spawn_failure_hint(&e),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let hint = clone_failure_hint(&stderr);
            return Err(Error::GitClone {
                url: url.to_string(),
                branch: branch.to_string(),
                message: stderr,
                hint,
            });
        }

        Ok(())
    }

    fn pull(&self, workdir: &Path) -> Result<()> {
        run_in(workdir, &["pull"])?;
        Ok(())
    }

    fn head_commit(&self, workdir: &Path) -> Result<String> {
        let stdout = run_in(workdir, &["rev-parse", "HEAD"])?;
        Ok(stdout.trim().to_string())
    }
}

/// Run a git subcommand inside `workdir` and return its stdout.
fn run_in(workdir: &Path, args: &[&str]) -> Result<String> {
    debug!("git {} (in {})", args.join(" "), workdir.display());
    let output = Command::new("git")
        .args(args)
        .current_dir(workdir)
        .output()
        .map_err(|e| Error::GitCommand {
            command: args.join(" "),
            dir: workdir.display().to_string(),
            stderr: e.to_string(),
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        return Err(Error::GitCommand {
            command: args.join(" "),
            dir: workdir.display().to_string(),
            stderr,
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Hint for a clone that could not even be spawned.
fn spawn_failure_hint(e: &std::io::Error) -> Option<String> {
    if e.kind() == std::io::ErrorKind::NotFound {
        Some("is git installed and on your PATH?".to_string())
    } else {
        None
    }
}

/// Map common clone failures onto a hint about the likely configuration fix.
fn clone_failure_hint(stderr: &str) -> Option<String> {
    if stderr.contains("Authentication failed")
        || stderr.contains("Permission denied")
        || stderr.contains("Could not read from remote repository")
    {
        Some(
            "make sure your SSH keys or credentials grant access to this repository".to_string(),
        )
    } else if stderr.contains("Remote branch") && stderr.contains("not found") {
        Some("check the 'branch' setting for this repository".to_string())
    } else if stderr.contains("not found") || stderr.contains("does not appear to be") {
        Some("check the repository name and the url-template".to_string())
    } else {
        None
    }
}
