//! Concurrent owner collection.
//!
//! Runs one lookup task per repository under a global concurrency ceiling and
//! merges the results into a shared store. `OwnershipCollector::run` returns
//! only after every task has finished.

mod stats;
mod store;

pub use stats::CollectorStats;
pub use store::{OwnershipMap, OwnershipStore};

use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

use crate::config::CollectorConfig;
use crate::host::{repository_url, Repository, RepositoryHost};
use crate::owners::{parse_owners, KnownOwners, NO_OWNER};

use stats::StatCounters;

/// Result of looking for an owner file in one repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OwnerFileLookup {
    /// Found at `paths[index]`.
    Found {
        path: String,
        index: usize,
        content: Vec<u8>,
    },
    /// None of the candidate paths could be fetched.
    Missing {
        /// Failures other than "not found" that were folded into this outcome.
        errors: usize,
    },
}

/// Try each candidate path in order and return the first one that downloads.
///
/// Every fetch failure moves on to the next path. Failures other than
/// "not found" are logged and counted but otherwise treated the same.
pub async fn lookup_owner_file(
    host: &dyn RepositoryHost,
    org: &str,
    repo: &str,
    paths: &[String],
) -> OwnerFileLookup {
    let mut errors = 0;

    for (index, path) in paths.iter().enumerate() {
        match host.fetch_file(org, repo, path).await {
            Ok(content) => {
                return OwnerFileLookup::Found {
                    path: path.clone(),
                    index,
                    content,
                };
            }
            Err(e) if e.is_not_found() => {
                debug!(repo = %repo, path = %path, "Owner file not at path");
            }
            Err(e) => {
                errors += 1;
                warn!(repo = %repo, path = %path, error = %e, "Failed to fetch owner file");
            }
        }
    }

    OwnerFileLookup::Missing { errors }
}

/// Collects the owners of many repositories concurrently.
pub struct OwnershipCollector {
    host: Arc<dyn RepositoryHost>,
    site: String,
    max_concurrent: usize,
    owner_file_paths: Arc<[String]>,
    counters: Arc<StatCounters>,
}

impl OwnershipCollector {
    /// Create a collector. `site` is the host name used in report URLs.
    pub fn new(
        host: Arc<dyn RepositoryHost>,
        config: &CollectorConfig,
        site: impl Into<String>,
    ) -> Self {
        Self {
            host,
            site: site.into(),
            max_concurrent: config.max_concurrent.max(1),
            owner_file_paths: config.owner_file_paths.clone().into(),
            counters: Arc::new(StatCounters::default()),
        }
    }

    /// Cumulative statistics across runs.
    pub fn stats(&self) -> CollectorStats {
        self.counters.snapshot(self.max_concurrent)
    }

    /// Look up the owners of every repository in `repos`.
    ///
    /// Exactly one entry per distinct repository is returned. Repositories
    /// without an owner file (or, when `known` is set, without a matching
    /// owner) map to `"None"`.
    pub async fn run(
        &self,
        org: &str,
        repos: &[Repository],
        known: Option<Arc<KnownOwners>>,
    ) -> OwnershipMap {
        info!(
            org = %org,
            repos = repos.len(),
            max_concurrent = self.max_concurrent,
            filtered = known.is_some(),
            "Collecting repository owners"
        );

        let store = Arc::new(OwnershipStore::new());
        let semaphore = Arc::new(Semaphore::new(self.max_concurrent));
        let mut join_set = JoinSet::new();
        let org: Arc<str> = Arc::from(org);

        for repo in repos {
            let task = RepoTask {
                host: Arc::clone(&self.host),
                org: Arc::clone(&org),
                repo: repo.name.clone(),
                url: repository_url(&self.site, &org, &repo.name),
                paths: Arc::clone(&self.owner_file_paths),
                known: known.clone(),
                store: Arc::clone(&store),
                counters: Arc::clone(&self.counters),
            };
            let semaphore = Arc::clone(&semaphore);

            join_set.spawn(async move {
                let _permit = match semaphore.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(_) => {
                        error!(repo = %task.repo, "Semaphore closed unexpectedly");
                        task.store.record(task.url, NO_OWNER.to_string()).await;
                        return;
                    }
                };
                task.run().await;
            });
        }

        while let Some(result) = join_set.join_next().await {
            if let Err(e) = result {
                self.counters.record_panic();
                error!(error = %e, "Owner lookup task failed");
            }
        }

        // A task that panicked never wrote its entry.
        for repo in repos {
            let url = repository_url(&self.site, &org, &repo.name);
            store.record_if_absent(url, NO_OWNER.to_string()).await;
        }

        let records = store.take().await;

        let stats = self.stats();
        info!(
            org = %org,
            records = records.len(),
            found_primary = stats.found_primary,
            found_fallback = stats.found_fallback,
            missing = stats.missing,
            fetch_errors = stats.fetch_errors,
            "Owner collection complete"
        );

        records
    }
}

/// Everything one repository lookup needs, owned so it can move into a task.
struct RepoTask {
    host: Arc<dyn RepositoryHost>,
    org: Arc<str>,
    repo: String,
    url: String,
    paths: Arc<[String]>,
    known: Option<Arc<KnownOwners>>,
    store: Arc<OwnershipStore>,
    counters: Arc<StatCounters>,
}

impl RepoTask {
    async fn run(self) {
        let _active = StatCounters::enter(&self.counters);

        let lookup = lookup_owner_file(self.host.as_ref(), &self.org, &self.repo, &self.paths).await;

        let owner = match lookup {
            OwnerFileLookup::Found {
                path,
                index,
                content,
            } => {
                self.counters.record_found(index);
                debug!(repo = %self.repo, path = %path, bytes = content.len(), "Parsing owner file");
                match parse_owners(&content, self.known.as_deref()) {
                    Some(owner) => owner,
                    None => {
                        debug!(repo = %self.repo, "No known owner in owner file");
                        NO_OWNER.to_string()
                    }
                }
            }
            OwnerFileLookup::Missing { errors } => {
                self.counters.record_missing(errors);
                warn!(repo = %self.repo, "CODEOWNERS does not exist in repo");
                NO_OWNER.to_string()
            }
        };

        self.store.record(self.url, owner).await;
    }
}
