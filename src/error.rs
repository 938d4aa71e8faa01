//! # Error Handling
//!
//! Centralized error type for the `ghp-builder` library, built on `thiserror`.
//! Every failure mode the builder can hit has a variant here; the binary layer
//! wraps these in `anyhow` for user-facing reporting.
//!
//! The taxonomy is deliberately small:
//!
//! - Configuration problems (`ConfigParse`, `ConfigValidation`) are detected
//!   up front, before any checkout or build work begins.
//! - External-tool failures (`GitClone`, `GitCommand`, `Generator`) are fatal
//!   and abort the current subcommand; the underlying tool's stderr is
//!   preserved in the message so nothing is swallowed.
//! - Filesystem failures (`Filesystem`, `Io`) propagate unchanged.
//!
//! There is no retry layer and no partial-completion recovery: the first
//! error halts the run, matching the strictly sequential execution model.
//!
//! A note on pulls: a `git pull` that fails because the checkout has
//! uncommitted local changes surfaces as a plain `GitCommand` error carrying
//! git's own stderr. Distinguishing that case would require an extra
//! `git status` call, and the builder restricts itself to clone, pull, and
//! rev-parse.

use thiserror::Error;

/// Main error type for ghp-builder operations
#[derive(Error, Debug)]
pub enum Error {
    /// The configuration file could not be parsed.
    ///
    /// Includes the parser message and optionally a hint about how to fix
    /// the file.
    #[error("Configuration parsing error: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    ConfigParse {
        message: String,
        /// Optional hint for how to fix the configuration issue
        hint: Option<String>,
    },

    /// The configuration parsed but describes an invalid site layout
    /// (for example two repositories claiming the site root).
    #[error("Configuration validation error: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    ConfigValidation {
        message: String,
        /// Optional hint for how to fix the configuration issue
        hint: Option<String>,
    },

    /// `git clone` failed for a repository.
    #[error("Git clone error for {url}@{branch}: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    GitClone {
        url: String,
        branch: String,
        message: String,
        /// Optional hint for how to resolve the clone issue
        hint: Option<String>,
    },

    /// A git command other than clone failed inside a checkout directory.
    #[error("Git command failed in {dir}: git {command} - {stderr}")]
    GitCommand {
        command: String,
        dir: String,
        stderr: String,
    },

    /// The static-site generator exited unsuccessfully (or could not be run).
    #[error("Site generator failed for {dir}: {message}")]
    Generator { dir: String, message: String },

    /// A filesystem operation failed; the message carries the path context.
    #[error("Filesystem operation error: {message}")]
    Filesystem { message: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A glob pattern error, wrapped from `glob::PatternError`.
    #[error("Glob pattern error: {0}")]
    Glob(#[from] glob::PatternError),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
