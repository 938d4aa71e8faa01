//! # Configuration Schema and Parsing
//!
//! This module defines the data structures that represent the
//! `.ghp-builder.yaml` configuration file, as well as the logic for parsing
//! and validating it.
//!
//! ## Key Components
//!
//! - **`Config`**: the whole file. A username, an optional URL template and
//!   generator override, extra copy exclusions, and the repository list.
//!
//! - **`RepoSpec`**: one repository descriptor with `{name, branch, path}`.
//!   The `path` is the repository's output location relative to the site
//!   root; an empty path designates the main site occupying the root itself,
//!   and an omitted path defaults to the repository name.
//!
//! ## Validation
//!
//! [`Config::validate`] rejects invalid site layouts before any checkout or
//! build work begins: duplicate names, more than one repository claiming the
//! site root, overlapping output paths, malformed URL templates, and bad
//! exclude globs. Every command validates up front so failures are cheap.

use crate::defaults;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use url::Url;

/// A single repository descriptor from the configuration file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepoSpec {
    /// Repository name on the hosting service. Also names the checkout
    /// directory under the work root.
    pub name: String,
    /// The branch to clone and pull.
    #[serde(default = "default_branch")]
    pub branch: String,
    /// Output path relative to the site root.
    ///
    /// An empty string designates this repository as the main site whose
    /// output occupies the site root itself. When omitted the repository
    /// name is used.
    #[serde(default)]
    pub path: Option<String>,
}

impl RepoSpec {
    /// The path of this repository's output relative to the site root.
    pub fn site_path(&self) -> &str {
        self.path.as_deref().unwrap_or(&self.name)
    }

    /// Whether this repository's output occupies the site root itself.
    pub fn is_main(&self) -> bool {
        self.site_path().is_empty()
    }
}

/// Get the default branch for repository descriptors
///
/// # Examples
///
/// ```
/// use ghp_builder::config::default_branch;
///
/// assert_eq!(default_branch(), "gh-pages");
/// ```
pub fn default_branch() -> String {
    defaults::BRANCH.to_string()
}

fn default_url_template() -> String {
    defaults::URL_TEMPLATE.to_string()
}

fn default_generator() -> String {
    defaults::GENERATOR.to_string()
}

/// The `.ghp-builder.yaml` configuration schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Username or organization substituted into the URL template.
    pub username: String,
    /// Template for remote URLs.
    ///
    /// `{username}` and `{name}` are substituted per repository. Templates
    /// without `://` (scp-style addresses such as
    /// `git@github.com:{username}/{name}.git`) are passed to git verbatim.
    #[serde(default = "default_url_template", rename = "url-template")]
    pub url_template: String,
    /// Program invoked to generate sites; defaults to `jekyll`.
    #[serde(default = "default_generator")]
    pub generator: String,
    /// Extra glob patterns excluded from verbatim copies, on top of the
    /// built-in set (version-control metadata and the opt-out marker).
    #[serde(default)]
    pub exclude: Vec<String>,
    /// The repositories making up the site.
    pub repos: Vec<RepoSpec>,
}

impl Config {
    /// Parses a YAML string into a `Config`.
    ///
    /// Parse failures are reported with the YAML error location and, for
    /// common mistakes, a hint about the expected shape.
    pub fn parse(yaml_content: &str) -> Result<Config> {
        serde_yaml::from_str::<Config>(yaml_content).map_err(|e| {
            let message = e.to_string();
            let hint = parse_hint(&message);
            Error::ConfigParse { message, hint }
        })
    }

    /// Loads and parses a configuration file from disk.
    pub fn from_file(path: &Path) -> Result<Config> {
        let content = std::fs::read_to_string(path).map_err(Error::Io)?;
        Self::parse(&content)
    }

    /// The remote URL for a repository, built from the URL template.
    pub fn remote_url(&self, name: &str) -> String {
        self.url_template
            .replace("{username}", &self.username)
            .replace("{name}", name)
    }

    /// The repository designated as the main site, if any.
    pub fn main_repo(&self) -> Option<&RepoSpec> {
        self.repos.iter().find(|r| r.is_main())
    }

    /// Validates the configuration before any checkout or build work begins.
    ///
    /// Checks, in order: the username, the URL template, the generator, the
    /// exclude globs, then every repository descriptor, and finally the
    /// cross-repository invariants (unique names, at most one main site,
    /// disjoint output paths). The first violation is returned.
    pub fn validate(&self) -> Result<()> {
        if self.username.is_empty() {
            return Err(Error::ConfigValidation {
                message: "username is empty".to_string(),
                hint: Some("set 'username' to your GitHub user or organization".to_string()),
            });
        }
        if self.username.chars().any(char::is_whitespace) || self.username.contains('/') {
            return Err(Error::ConfigValidation {
                message: format!("username '{}' contains invalid characters", self.username),
                hint: Some("use the bare account name, without slashes or spaces".to_string()),
            });
        }

        if !self.url_template.contains("{name}") {
            return Err(Error::ConfigValidation {
                message: format!(
                    "url-template '{}' does not contain '{{name}}'",
                    self.url_template
                ),
                hint: Some(
                    "the template needs '{name}' so each repository gets its own URL".to_string(),
                ),
            });
        }
        if self.url_template.contains("://") {
            // Substitute a sample name so the placeholder itself cannot
            // trip the parser.
            let sample = self.remote_url("example");
            if let Err(e) = Url::parse(&sample) {
                return Err(Error::ConfigValidation {
                    message: format!("url-template produces an invalid URL '{}': {}", sample, e),
                    hint: Some(
                        "scp-style addresses like git@host:{username}/{name}.git are accepted as-is"
                            .to_string(),
                    ),
                });
            }
        }

        if self.generator.is_empty() {
            return Err(Error::ConfigValidation {
                message: "generator is empty".to_string(),
                hint: Some("name the program to run, e.g. 'jekyll', or omit the key".to_string()),
            });
        }

        for pattern in &self.exclude {
            if let Err(e) = glob::Pattern::new(pattern) {
                return Err(Error::ConfigValidation {
                    message: format!("invalid exclude pattern '{}': {}", pattern, e),
                    hint: Some(
                        "exclude entries are glob patterns matched against file names".to_string(),
                    ),
                });
            }
        }

        if self.repos.is_empty() {
            return Err(Error::ConfigValidation {
                message: "no repositories configured".to_string(),
                hint: Some("add at least one entry under 'repos'".to_string()),
            });
        }
        for repo in &self.repos {
            repo.validate()?;
        }

        let mut seen = HashSet::new();
        for repo in &self.repos {
            if !seen.insert(repo.name.as_str()) {
                return Err(Error::ConfigValidation {
                    message: format!("duplicate repository name '{}'", repo.name),
                    hint: Some(
                        "checkout directories are named by repository, so names must be unique"
                            .to_string(),
                    ),
                });
            }
        }

        let mains: Vec<&str> = self
            .repos
            .iter()
            .filter(|r| r.is_main())
            .map(|r| r.name.as_str())
            .collect();
        if mains.len() > 1 {
            return Err(Error::ConfigValidation {
                message: format!(
                    "multiple repositories claim the site root: {}",
                    mains.join(", ")
                ),
                hint: Some("at most one repos entry may have an empty path".to_string()),
            });
        }

        for (i, a) in self.repos.iter().enumerate() {
            for b in &self.repos[i + 1..] {
                if a.is_main() || b.is_main() {
                    continue;
                }
                if !paths_overlap(a.site_path(), b.site_path()) {
                    continue;
                }
                if a.site_path() == b.site_path() {
                    return Err(Error::ConfigValidation {
                        message: format!(
                            "repositories '{}' and '{}' share the output path '{}'",
                            a.name,
                            b.name,
                            a.site_path()
                        ),
                        hint: Some("give each repository its own path".to_string()),
                    });
                }
                let (inner, outer) = nested_of(a, b);
                return Err(Error::ConfigValidation {
                    message: format!(
                        "output path of '{}' ('{}') is nested inside output path of '{}' ('{}')",
                        inner.name,
                        inner.site_path(),
                        outer.name,
                        outer.site_path()
                    ),
                    hint: Some(
                        "rebuilding the outer repository would wipe the inner one".to_string(),
                    ),
                });
            }
        }

        Ok(())
    }
}

impl RepoSpec {
    fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(Error::ConfigValidation {
                message: "repository with an empty name".to_string(),
                hint: Some("every repos entry needs a 'name'".to_string()),
            });
        }
        if self.name.chars().any(char::is_whitespace)
            || self.name.contains('/')
            || self.name.contains('\\')
            || self.name == "."
            || self.name == ".."
        {
            return Err(Error::ConfigValidation {
                message: format!("repository name '{}' is not a valid directory name", self.name),
                hint: None,
            });
        }
        if self.branch.is_empty() || self.branch.chars().any(char::is_whitespace) {
            return Err(Error::ConfigValidation {
                message: format!("repository '{}' has an invalid branch '{}'", self.name, self.branch),
                hint: None,
            });
        }
        if let Some(path) = &self.path {
            if !path.is_empty() {
                for segment in path.split('/') {
                    if segment.is_empty() || segment == "." || segment == ".." {
                        return Err(Error::ConfigValidation {
                            message: format!(
                                "repository '{}' has an invalid path '{}'",
                                self.name, path
                            ),
                            hint: Some(
                                "paths are relative, with no leading, trailing or '..' segments"
                                    .to_string(),
                            ),
                        });
                    }
                }
            }
        }
        Ok(())
    }
}

/// Whether one site path is equal to or contained in the other.
fn paths_overlap(a: &str, b: &str) -> bool {
    let a_segs: Vec<&str> = a.split('/').collect();
    let b_segs: Vec<&str> = b.split('/').collect();
    let n = a_segs.len().min(b_segs.len());
    a_segs[..n] == b_segs[..n]
}

/// Orders an overlapping pair as (inner, outer).
fn nested_of<'a>(a: &'a RepoSpec, b: &'a RepoSpec) -> (&'a RepoSpec, &'a RepoSpec) {
    if a.site_path().len() > b.site_path().len() {
        (a, b)
    } else {
        (b, a)
    }
}

/// Map a YAML parser message onto a hint for common configuration mistakes.
fn parse_hint(message: &str) -> Option<String> {
    if message.contains("missing field `username`") {
        Some("add 'username: <github-user-or-org>' at the top level".to_string())
    } else if message.contains("missing field `repos`") {
        Some("add a 'repos:' list with one entry per repository".to_string())
    } else if message.contains("missing field `name`") {
        Some("every repos entry needs a 'name'".to_string())
    } else if message.contains("invalid type") {
        Some("check the indentation; repos entries look like '- name: blog'".to_string())
    } else {
        None
    }
}
