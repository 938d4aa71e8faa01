//! Shared test utilities for integration and E2E tests.
//!
//! This module provides common fixtures, helper functions, and config
//! snippets to reduce duplication across test files.
//!
//! ## Usage
//!
//! Add `mod common;` to your test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new().with_remote("blog", &[("index.md", "# hi")]);
//!     // ... test code
//! }
//! ```

use assert_fs::prelude::*;
use std::path::{Path, PathBuf};

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    pub use assert_cmd::cargo::cargo_bin_cmd;
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use assert_fs::TempDir;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::configs;
    pub use super::TestFixture;
}

/// Common configuration YAML snippets for testing.
///
/// These use the default GitHub URL template and are meant for tests that
/// never reach the network (validation failures, offline rebuilds).
#[allow(dead_code)]
pub mod configs {
    /// Minimal valid configuration with a single subsite.
    pub const MINIMAL: &str = r#"
username: tester
repos:
  - name: docs
"#;

    /// A main site plus two subsites.
    pub const WITH_MAIN: &str = r#"
username: tester
repos:
  - name: blog
    path: ""
  - name: docs
  - name: news
"#;

    /// Two repositories claiming the site root.
    pub const TWO_MAINS: &str = r#"
username: tester
repos:
  - name: blog
    path: ""
  - name: home
    path: ""
"#;

    /// Two repositories with the same name.
    pub const DUPLICATE_NAMES: &str = r#"
username: tester
repos:
  - name: docs
  - name: docs
"#;

    /// One output path nested inside another.
    pub const NESTED_PATHS: &str = r#"
username: tester
repos:
  - name: docs
  - name: api
    path: docs/api
"#;

    /// No repositories at all.
    pub const NO_REPOS: &str = r#"
username: tester
repos: []
"#;

    /// Invalid YAML for error testing.
    pub const INVALID_YAML: &str = "username: [unclosed";
}

/// A test fixture that provides a temporary directory with an optional
/// config file and local git repositories standing in for remotes.
///
/// Remote fixtures live under `remotes/` inside the temp directory and
/// are plain git repositories with a `gh-pages` branch, so `init` and
/// `build` can clone and pull them over `file://` URLs without touching
/// the network. Every remote carries a `.nojekyll` marker, which keeps
/// the build on the verbatim-copy path and avoids needing a generator
/// binary on the test machine.
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

impl TestFixture {
    /// Create a new test fixture with an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Add a `.ghp-builder.yaml` configuration file with the given content.
    pub fn with_config(self, content: &str) -> Self {
        self.temp_dir
            .child(".ghp-builder.yaml")
            .write_str(content)
            .expect("Failed to write config file");
        self
    }

    /// Add a `.ghp-builder.yaml` whose `url-template` points at this
    /// fixture's local remotes. `repos` is the YAML list body.
    pub fn with_pages_config(self, repos: &str) -> Self {
        let config = format!(
            "username: tester\nurl-template: \"{}\"\nrepos:\n{}",
            self.remote_template(),
            repos
        );
        self.with_config(&config)
    }

    /// Create a local git repository under `remotes/` with a `gh-pages`
    /// branch containing the given files plus a `.nojekyll` marker.
    pub fn with_remote(self, name: &str, files: &[(&str, &str)]) -> Self {
        let dir = self.remote_dir(name);
        std::fs::create_dir_all(&dir).expect("Failed to create remote directory");
        git(&dir, &["init", "--quiet"]);
        git(&dir, &["checkout", "-q", "-b", "gh-pages"]);
        std::fs::write(dir.join(".nojekyll"), "").expect("Failed to write marker");
        for (path, content) in files {
            write_file(&dir, path, content);
        }
        git(&dir, &["add", "-A"]);
        git(&dir, &["commit", "-q", "-m", "seed"]);
        self
    }

    /// Add a commit to an existing remote fixture.
    #[allow(dead_code)]
    pub fn commit_to_remote(&self, name: &str, path: &str, content: &str) {
        let dir = self.remote_dir(name);
        write_file(&dir, path, content);
        git(&dir, &["add", "-A"]);
        git(&dir, &["commit", "-q", "-m", "update"]);
    }

    /// The `url-template` value that resolves names against this
    /// fixture's `remotes/` directory.
    pub fn remote_template(&self) -> String {
        format!("file://{}/remotes/{{name}}", self.temp_dir.path().display())
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Get the path to the config file.
    pub fn config_path(&self) -> PathBuf {
        self.temp_dir.path().join(".ghp-builder.yaml")
    }

    /// Path of a checkout inside the work tree.
    #[allow(dead_code)]
    pub fn work_path(&self, name: &str) -> PathBuf {
        self.temp_dir.path().join("work").join(name)
    }

    /// Path inside the site tree.
    pub fn site_path(&self, rel: &str) -> PathBuf {
        if rel.is_empty() {
            self.temp_dir.path().join("site")
        } else {
            self.temp_dir.path().join("site").join(rel)
        }
    }

    fn remote_dir(&self, name: &str) -> PathBuf {
        self.temp_dir.path().join("remotes").join(name)
    }

    /// Create a command configured to run in this fixture's directory.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("ghp-builder");
        cmd.current_dir(self.path());
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

fn write_file(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create parent directory");
    }
    std::fs::write(path, content).expect("Failed to write file");
}

/// Run a git command in `dir`, panicking on failure. Identity comes from
/// environment variables so the fixtures work without global git config.
fn git(dir: &Path, args: &[&str]) {
    let output = std::process::Command::new("git")
        .args(args)
        .current_dir(dir)
        .env("GIT_AUTHOR_NAME", "fixture")
        .env("GIT_AUTHOR_EMAIL", "fixture@example.invalid")
        .env("GIT_COMMITTER_NAME", "fixture")
        .env("GIT_COMMITTER_EMAIL", "fixture@example.invalid")
        .output()
        .expect("failed to run git");
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_creates_temp_dir() {
        let fixture = TestFixture::new();
        assert!(fixture.path().exists());
    }

    #[test]
    fn test_fixture_with_config() {
        let fixture = TestFixture::new().with_config("username: tester");
        assert!(fixture.config_path().exists());
    }

    #[test]
    fn test_configs_are_valid_yaml() {
        // The invalid constant is excluded on purpose
        let configs = [
            configs::MINIMAL,
            configs::WITH_MAIN,
            configs::TWO_MAINS,
            configs::DUPLICATE_NAMES,
            configs::NESTED_PATHS,
            configs::NO_REPOS,
        ];

        for config in configs {
            serde_yaml::from_str::<serde_yaml::Value>(config).expect("Config should be valid YAML");
        }
    }

    #[test]
    fn test_invalid_yaml_is_actually_invalid() {
        let result = serde_yaml::from_str::<serde_yaml::Value>(configs::INVALID_YAML);
        assert!(result.is_err(), "INVALID_YAML should not parse");
    }
}
