//! Orchestrates fleet scans.
//!
//! Repositories are processed one at a time, in listing order. The first
//! failure is logged and ends the scan; repositories after it are not
//! visited in that run.

mod config;
mod error;

pub use config::RunnerConfig;
pub use error::{RepositoryFailure, ScanError};

use crate::cache::{self, FleetCache};
use crate::directory::{fetch_all, Organization, RepositoryDescriptor, RepositoryPages};
use crate::freshness::{check_fresh, Freshness};
use crate::policy::{self, PolicyStatus};
use crate::process::{CommandRunner, Toolchain};
use crate::summary::{RepositoryOutcome, ScanSummary, SkipReason};
use crate::sync::sync;
use tracing::{debug, error, info, info_span, Instrument};

/// Drives a full scan over every package of the fleet.
pub struct Runner<S, R> {
    config: RunnerConfig,
    organization: Organization,
    tools: Toolchain,
    source: S,
    commands: R,
}

impl<S: RepositoryPages, R: CommandRunner> Runner<S, R> {
    /// Builds a runner.
    ///
    /// `source` is only queried when no cached listing exists; `commands`
    /// runs every git and version-detection invocation.
    pub fn new(
        config: RunnerConfig,
        organization: Organization,
        tools: Toolchain,
        source: S,
        commands: R,
    ) -> Self {
        Self {
            config,
            organization,
            tools,
            source,
            commands,
        }
    }

    /// Executes the scan.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError`] for cache and transport failures, and
    /// [`ScanError::Repository`] for the first repository that fails
    /// synchronization or an enabled check.
    pub async fn run(&self) -> Result<ScanSummary, ScanError> {
        let mut summary = ScanSummary::new(
            self.config.check_repository_settings(),
            self.config.check_updates(),
        );

        if self.config.clear_cache() {
            cache::clear(self.config.cache_dir())?;
        }

        let fleet = self.load_fleet(&mut summary).await?;
        summary.repositories_total = fleet.len();

        for repository in fleet.repositories() {
            let outcome = match skip_reason(&self.organization, repository) {
                Some(reason) => {
                    debug!(repo = %repository.name, reason = reason.as_str(), "Skipping repository");
                    RepositoryOutcome::Skipped {
                        repository: repository.name.clone(),
                        reason,
                    }
                }
                None => {
                    let span = info_span!("inspect", repo = %repository.name);
                    if let Err(cause) = self.inspect(repository).instrument(span).await {
                        error!(repo = %repository.name, error = %cause, "Repository check failed");
                        return Err(ScanError::Repository {
                            repository: repository.name.clone(),
                            cause,
                        });
                    }
                    RepositoryOutcome::Checked {
                        repository: repository.name.clone(),
                    }
                }
            };
            summary.record(&outcome);
        }

        info!(
            checked = summary.packages_checked,
            skipped = summary.repositories_skipped,
            "Scan complete"
        );
        Ok(summary)
    }

    /// Reads the cached listing, fetching and caching it when absent.
    async fn load_fleet(&self, summary: &mut ScanSummary) -> Result<FleetCache, ScanError> {
        let cache_dir = self.config.cache_dir();

        if let Some(fleet) = cache::load(cache_dir)? {
            info!(path = %cache_dir.display(), "Use cached repository list");
            summary.cache_reused = true;
            return Ok(fleet);
        }

        let repositories = fetch_all(&self.source, self.organization.name()).await?;
        let fleet = FleetCache::new(repositories);
        cache::save(cache_dir, &fleet)?;
        Ok(fleet)
    }

    /// Synchronizes one package and runs the enabled checks on it.
    async fn inspect(&self, repository: &RepositoryDescriptor) -> Result<(), RepositoryFailure> {
        info!("Checking repository");

        let working_copy = sync(
            &self.commands,
            &self.tools,
            repository,
            self.config.cache_dir(),
        )
        .await?;

        if self.config.check_repository_settings() {
            match policy::validate(&self.organization, repository)? {
                PolicyStatus::Compliant => debug!("Repository settings comply"),
                PolicyStatus::Exempt => debug!("Repository exempt from policy"),
            }
        }

        if self.config.check_updates() {
            if let Freshness::Outdated { details } =
                check_fresh(&self.commands, &self.tools, &working_copy).await?
            {
                return Err(RepositoryFailure::Outdated { details });
            }
        }

        Ok(())
    }
}

fn skip_reason(organization: &Organization, repository: &RepositoryDescriptor) -> Option<SkipReason> {
    if repository.archived {
        Some(SkipReason::Archived)
    } else if repository.private {
        Some(SkipReason::Private)
    } else if organization.is_internal(&repository.name) {
        Some(SkipReason::Internal)
    } else {
        None
    }
}
