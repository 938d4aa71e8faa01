//! # Filesystem Operations
//!
//! Directory-tree helpers for the builder: exclusion-aware verbatim copies,
//! remove-then-recreate output replacement, and small existence checks.
//!
//! The copy operation is deliberately not a merge. A repository's output
//! directory is removed and recreated from scratch on every build, so stale
//! files from earlier revisions can never linger in the published site.

use std::fs;
use std::path::Path;

use glob::Pattern;
use log::{debug, warn};
use walkdir::WalkDir;

use crate::defaults;
use crate::error::{Error, Result};

/// Compiled glob patterns excluded from verbatim copies.
///
/// Patterns are matched against entry basenames at every depth, so `.git`
/// drops a `.git` directory anywhere in the tree, not only at the root.
#[derive(Debug)]
pub struct ExcludeList {
    patterns: Vec<Pattern>,
}

impl ExcludeList {
    /// Builds the exclusion list from the built-in entries plus extra
    /// configured patterns.
    pub fn with_defaults(extra: &[String]) -> Result<Self> {
        let mut patterns = Vec::with_capacity(defaults::COPY_EXCLUDES.len() + extra.len());
        for raw in defaults::COPY_EXCLUDES {
            patterns.push(Pattern::new(raw)?);
        }
        for raw in extra {
            patterns.push(Pattern::new(raw)?);
        }
        Ok(Self { patterns })
    }

    /// Whether a basename matches any exclusion pattern.
    pub fn is_excluded(&self, name: &str) -> bool {
        self.patterns.iter().any(|p| p.matches(name))
    }
}

/// Create a directory and its parents if they do not exist yet.
pub fn ensure_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|e| Error::Filesystem {
        message: format!("cannot create {}: {}", path.display(), e),
    })
}

/// Whether a directory exists and contains no entries.
pub fn dir_is_empty(path: &Path) -> Result<bool> {
    let mut entries = fs::read_dir(path).map_err(|e| Error::Filesystem {
        message: format!("cannot read {}: {}", path.display(), e),
    })?;
    Ok(entries.next().is_none())
}

/// Remove a path of any kind; missing paths are not an error.
///
/// Symlinks are removed without following them, so a link into a checkout
/// can never cause the checkout itself to be deleted.
pub fn remove_tree(path: &Path) -> Result<()> {
    let metadata = match fs::symlink_metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(e) => {
            return Err(Error::Filesystem {
                message: format!("cannot stat {}: {}", path.display(), e),
            })
        }
    };

    let result = if metadata.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    };
    result.map_err(|e| Error::Filesystem {
        message: format!("cannot remove {}: {}", path.display(), e),
    })
}

/// Copy a directory tree verbatim, skipping excluded entries at every
/// depth. Returns the number of files copied.
///
/// The destination is created if missing. Regular files and directories
/// are copied; anything else (symlinks, sockets) is skipped with a
/// warning, since the published site must be self-contained.
pub fn copy_tree(src: &Path, dst: &Path, excludes: &ExcludeList) -> Result<u64> {
    let mut copied = 0u64;

    let walker = WalkDir::new(src).follow_links(false).into_iter();
    for entry in walker.filter_entry(|e| {
        // The root itself is never excluded; exclusions apply to entries
        // inside the tree.
        if e.depth() == 0 {
            return true;
        }
        let name = e.file_name().to_string_lossy();
        !excludes.is_excluded(&name)
    }) {
        let entry = entry.map_err(|e| Error::Filesystem {
            message: format!("walk failed under {}: {}", src.display(), e),
        })?;

        let relative = entry
            .path()
            .strip_prefix(src)
            .map_err(|_| Error::Filesystem {
                message: format!("path escapes {}: {}", src.display(), entry.path().display()),
            })?;
        let target = dst.join(relative);

        let file_type = entry.file_type();
        if file_type.is_dir() {
            ensure_dir(&target)?;
        } else if file_type.is_file() {
            fs::copy(entry.path(), &target).map_err(|e| Error::Filesystem {
                message: format!(
                    "cannot copy {} to {}: {}",
                    entry.path().display(),
                    target.display(),
                    e
                ),
            })?;
            copied += 1;
        } else {
            warn!("skipping {}: not a regular file", entry.path().display());
        }
    }

    debug!("copied {} files from {} to {}", copied, src.display(), dst.display());
    Ok(copied)
}
