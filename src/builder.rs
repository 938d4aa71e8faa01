//! # Site Assembly Orchestration
//!
//! `SiteBuilder` owns the configured repository units and runs checkout,
//! pull, and build passes across them in a fixed order: the main unit (the
//! one whose output occupies the site root) always goes first, because its
//! regeneration can clobber every sibling's subdirectory.
//!
//! The clobber-recovery rule lives in [`SiteBuilder::update_main`]: when
//! the main unit's source changed, its rebuilt output has replaced the
//! whole site root, so every other unit is rebuilt unconditionally
//! afterwards, whether or not its own source changed.
//!
//! All passes are strictly sequential; the first failing external command
//! aborts the run with its error.

use std::fmt;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::config::Config;
use crate::defaults;
use crate::error::Result;
use crate::filesystem::{self, ExcludeList};
use crate::generator::{CommandGenerator, SiteGenerator};
use crate::git::{GitOperations, SystemGit};
use crate::repository::PagesRepo;

/// Outcome of an initial checkout pass.
#[derive(Debug, Default)]
pub struct CheckoutReport {
    /// Repositories cloned by this pass.
    pub cloned: Vec<String>,
    /// Repositories that already had a checkout and were left alone.
    pub skipped: Vec<String>,
}

/// Per-repository outcome of a pull pass.
#[derive(Debug)]
pub struct RepoStatus {
    pub name: String,
    pub changed: bool,
}

/// Outcome of an incremental build pass.
#[derive(Debug)]
pub struct BuildReport {
    /// Whether the main unit changed (and therefore every other unit was
    /// rebuilt to recover from the clobbered site root).
    pub main_changed: bool,
    /// Non-main repositories rebuilt because their own source changed.
    pub rebuilt: Vec<String>,
    /// Non-main repositories whose source did not change.
    pub unchanged: Vec<String>,
}

/// What a `dwim` pass decided to do, based on which of the work and site
/// roots existed when it ran.
#[derive(Debug)]
pub enum DwimAction {
    /// Neither root existed: full checkout followed by a full build.
    FullInit {
        checkout: CheckoutReport,
        built: usize,
    },
    /// Checkouts existed but the site root did not: rebuild outputs only,
    /// without touching the network.
    RebuildOnly { built: usize },
    /// Both roots existed: a normal incremental build.
    Incremental(BuildReport),
}

/// Owns the repository units and the external tools, and orchestrates
/// checkout, pull, and build ordering across them.
pub struct SiteBuilder {
    repos: Vec<PagesRepo>,
    main: Option<usize>,
    work_root: PathBuf,
    site_root: PathBuf,
    excludes: ExcludeList,
    git: Box<dyn GitOperations>,
    generator: Box<dyn SiteGenerator>,
}

impl fmt::Debug for SiteBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SiteBuilder")
            .field("repos", &self.repos)
            .field("main", &self.main)
            .field("work_root", &self.work_root)
            .field("site_root", &self.site_root)
            .field("excludes", &self.excludes)
            .finish_non_exhaustive()
    }
}

impl SiteBuilder {
    /// Builds the unit list from a validated configuration, rooting all
    /// checkouts and outputs under `directory`.
    ///
    /// The configuration is validated here as well, so an invalid site
    /// layout is rejected before any checkout or build work begins.
    pub fn from_config(config: &Config, directory: &Path) -> Result<Self> {
        config.validate()?;

        let work_root = directory.join(defaults::WORK_DIR);
        let site_root = directory.join(defaults::SITE_DIR);
        let excludes = ExcludeList::with_defaults(&config.exclude)?;

        let mut repos = Vec::with_capacity(config.repos.len());
        let mut main = None;
        for spec in &config.repos {
            let output = if spec.is_main() {
                site_root.clone()
            } else {
                site_root.join(spec.site_path())
            };
            if spec.is_main() {
                main = Some(repos.len());
            }
            repos.push(PagesRepo::new(
                spec.name.clone(),
                config.remote_url(&spec.name),
                spec.branch.clone(),
                work_root.join(&spec.name),
                output,
            ));
        }

        Ok(Self {
            repos,
            main,
            work_root,
            site_root,
            excludes,
            git: Box::new(SystemGit),
            generator: Box::new(CommandGenerator::new(config.generator.as_str())),
        })
    }

    /// Creates a `SiteBuilder` with custom git and generator
    /// implementations.
    ///
    /// This is primarily used for testing to inject mock operations.
    #[cfg(test)]
    pub fn with_tools(
        config: &Config,
        directory: &Path,
        git: Box<dyn GitOperations>,
        generator: Box<dyn SiteGenerator>,
    ) -> Result<Self> {
        let mut builder = Self::from_config(config, directory)?;
        builder.git = git;
        builder.generator = generator;
        Ok(builder)
    }

    pub fn work_root(&self) -> &Path {
        &self.work_root
    }

    pub fn site_root(&self) -> &Path {
        &self.site_root
    }

    /// Units in processing order: the main unit first, then the rest in
    /// configuration order.
    fn ordered(&self) -> impl Iterator<Item = &PagesRepo> + '_ {
        let main = self.main.into_iter().map(|i| &self.repos[i]);
        let rest = self
            .repos
            .iter()
            .enumerate()
            .filter(move |(i, _)| Some(*i) != self.main)
            .map(|(_, r)| r);
        main.chain(rest)
    }

    /// Creates both roots if missing and clones every unit that has no
    /// checkout yet. Existing checkouts are left alone, so re-running
    /// after a partial failure picks up where it stopped.
    pub fn initial_checkout(&self) -> Result<CheckoutReport> {
        filesystem::ensure_dir(&self.work_root)?;
        filesystem::ensure_dir(&self.site_root)?;

        let mut report = CheckoutReport::default();
        for repo in self.ordered() {
            if repo.is_checked_out()? {
                debug!("{} is already checked out", repo.name());
                report.skipped.push(repo.name().to_string());
            } else {
                repo.checkout(&*self.git)?;
                report.cloned.push(repo.name().to_string());
            }
        }
        Ok(report)
    }

    /// Builds every unit unconditionally, main first. Used when checkouts
    /// are current but outputs are stale or missing. Returns the number of
    /// units built.
    pub fn rebuild(&self) -> Result<usize> {
        filesystem::ensure_dir(&self.site_root)?;
        for repo in self.ordered() {
            repo.build(&*self.generator, &self.excludes)?;
        }
        Ok(self.repos.len())
    }

    /// Pulls every unit without building, reporting which ones changed.
    pub fn pull(&self) -> Result<Vec<RepoStatus>> {
        let mut statuses = Vec::with_capacity(self.repos.len());
        for repo in self.ordered() {
            let changed = repo.pull(&*self.git)?;
            statuses.push(RepoStatus {
                name: repo.name().to_string(),
                changed,
            });
        }
        Ok(statuses)
    }

    /// Pulls and conditionally builds the main unit; on change, rebuilds
    /// every other unit too.
    ///
    /// The main unit's output occupies the site root, so regenerating it
    /// may have deleted or overwritten the subdirectories belonging to
    /// other units. Returns whether the main unit changed.
    pub fn update_main(&self) -> Result<bool> {
        let main = match self.main {
            Some(index) => &self.repos[index],
            None => return Ok(false),
        };

        if !main.update_and_build(&*self.git, &*self.generator, &self.excludes)? {
            return Ok(false);
        }

        info!("main site changed; rebuilding all subsites");
        for (index, repo) in self.repos.iter().enumerate() {
            if Some(index) != self.main {
                repo.build(&*self.generator, &self.excludes)?;
            }
        }
        Ok(true)
    }

    /// Incremental pass: `update_main`, then an independent
    /// update-and-build for every other unit.
    pub fn build(&self) -> Result<BuildReport> {
        filesystem::ensure_dir(&self.site_root)?;

        let main_changed = self.update_main()?;
        let mut report = BuildReport {
            main_changed,
            rebuilt: Vec::new(),
            unchanged: Vec::new(),
        };
        for (index, repo) in self.repos.iter().enumerate() {
            if Some(index) == self.main {
                continue;
            }
            if repo.update_and_build(&*self.git, &*self.generator, &self.excludes)? {
                report.rebuilt.push(repo.name().to_string());
            } else {
                report.unchanged.push(repo.name().to_string());
            }
        }
        Ok(report)
    }

    /// Inspects the on-disk state and runs whichever pass it calls for:
    /// full init when nothing exists yet, output rebuild when checkouts
    /// exist but the site does not, and an incremental build otherwise.
    pub fn dwim(&self) -> Result<DwimAction> {
        if !self.work_root.exists() {
            info!("no work directory; running initial checkout and full build");
            let checkout = self.initial_checkout()?;
            let built = self.rebuild()?;
            return Ok(DwimAction::FullInit { checkout, built });
        }
        if !self.site_root.exists() {
            info!("work directory present but no site; rebuilding outputs");
            let built = self.rebuild()?;
            return Ok(DwimAction::RebuildOnly { built });
        }
        Ok(DwimAction::Incremental(self.build()?))
    }
}
