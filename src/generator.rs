//! # Site Generator Invocation
//!
//! Runs the external static-site generator for repositories that have not
//! opted out of generation. Only one operation is needed: build from a
//! source directory into an output directory, which jekyll and compatible
//! generators expose as `<program> build -s <source> -d <dest>`.
//!
//! The generator's own stdout and stderr are streamed through to the user
//! rather than captured; jekyll reports build progress and template errors
//! there, and swallowing them would leave failures unexplained.

use std::path::Path;
use std::process::Command;

use log::debug;

use crate::error::{Error, Result};

/// Trait for site generation - allows mocking in tests
pub trait SiteGenerator: Send + Sync {
    /// Generates the site from `source` into `dest`.
    fn generate(&self, source: &Path, dest: &Path) -> Result<()>;
}

/// The default implementation of `SiteGenerator`, invoking a generator
/// program from the configuration (by default `jekyll`).
pub struct CommandGenerator {
    program: String,
}

impl CommandGenerator {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl SiteGenerator for CommandGenerator {
    fn generate(&self, source: &Path, dest: &Path) -> Result<()> {
        debug!(
            "{} build -s {} -d {}",
            self.program,
            source.display(),
            dest.display()
        );
        let status = Command::new(&self.program)
            .arg("build")
            .arg("-s")
            .arg(source)
            .arg("-d")
            .arg(dest)
            .status()
            .map_err(|e| Error::Generator {
                dir: source.display().to_string(),
                message: spawn_failure_message(&self.program, &e),
            })?;

        if !status.success() {
            return Err(Error::Generator {
                dir: source.display().to_string(),
                message: format!("{} exited with {}", self.program, status),
            });
        }

        Ok(())
    }
}

fn spawn_failure_message(program: &str, e: &std::io::Error) -> String {
    if e.kind() == std::io::ErrorKind::NotFound {
        format!("cannot run '{}': not found on PATH", program)
    } else {
        format!("cannot run '{}': {}", program, e)
    }
}
