//! Default values for ghp-builder configuration.
//!
//! This module provides centralized default values used across commands,
//! ensuring consistency and avoiding duplication.

/// Default configuration file name, looked up in the current directory.
///
/// Can be overridden with the `-c/--config` CLI flag or the
/// `GHP_BUILDER_CONFIG` environment variable.
pub const CONFIG_FILE: &str = ".ghp-builder.yaml";

/// Default branch for Pages repositories.
///
/// Most project sites publish from `gh-pages`; user/organization sites
/// (`*.github.io`) typically override this with `master` or `main`.
pub const BRANCH: &str = "gh-pages";

/// Template for building a repository's remote URL.
///
/// `{username}` and `{name}` are substituted from the configuration.
pub const URL_TEMPLATE: &str = "https://github.com/{username}/{name}";

/// Program invoked as `<program> build -s <source> -d <dest>` for
/// repositories that do not opt out of generation.
pub const GENERATOR: &str = "jekyll";

/// Marker file that opts a repository out of site generation.
///
/// When present at the top of a checkout the repository's files are
/// published verbatim instead of being run through the generator.
pub const NOJEKYLL_MARKER: &str = ".nojekyll";

/// Name of the checkout root inside the base directory.
pub const WORK_DIR: &str = "work";

/// Name of the assembled-site root inside the base directory.
pub const SITE_DIR: &str = "site";

/// Entries dropped from verbatim copies into the published site.
///
/// Matched as glob patterns against entry basenames at every depth.
/// More entries may be needed over time; arbitrary repositories can
/// carry other files that must never appear in the output.
pub const COPY_EXCLUDES: &[&str] = &[".git", ".gitignore", NOJEKYLL_MARKER];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_copy_excludes_cover_marker_and_metadata() {
        assert!(COPY_EXCLUDES.contains(&".git"));
        assert!(COPY_EXCLUDES.contains(&NOJEKYLL_MARKER));
    }

    #[test]
    fn test_url_template_has_placeholders() {
        assert!(URL_TEMPLATE.contains("{username}"));
        assert!(URL_TEMPLATE.contains("{name}"));
    }

    #[test]
    fn test_copy_excludes_are_valid_globs() {
        for pattern in COPY_EXCLUDES {
            assert!(glob::Pattern::new(pattern).is_ok(), "bad pattern: {}", pattern);
        }
    }
}
