//! End-to-end owner report run.
//!
//! List repositories, load the optional known-owner set, collect owners
//! concurrently, then write the CSV report.

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::collector::{CollectorStats, OwnershipCollector};
use crate::config::Config;
use crate::host::{HostError, RepositoryHost};
use crate::owners::{KnownOwners, KnownOwnersError};
use crate::report::{write_csv, ReportError, ResultTable};

/// Errors that abort a run.
#[derive(Debug, Error)]
pub enum JobError {
    #[error("Failed to list repositories for {org}: {source}")]
    ListRepositories {
        org: String,
        #[source]
        source: HostError,
    },

    #[error(transparent)]
    KnownOwners(#[from] KnownOwnersError),

    #[error(transparent)]
    Report(#[from] ReportError),
}

/// Per-run inputs that are not part of the configuration file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    /// Organization whose repositories are scanned.
    pub org: String,
    /// Optional newline-delimited list of owners of interest.
    pub known_owners_file: Option<PathBuf>,
}

impl RunOptions {
    pub fn new(org: impl Into<String>) -> Self {
        Self {
            org: org.into(),
            known_owners_file: None,
        }
    }

    pub fn with_known_owners_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.known_owners_file = Some(path.into());
        self
    }
}

/// Collected report, not yet written.
#[derive(Debug, Clone)]
pub struct OwnerReport {
    pub org: String,
    /// Number of repositories listed for the organization.
    pub repositories: usize,
    pub table: ResultTable,
    pub stats: CollectorStats,
}

/// Outcome of a completed run.
#[derive(Debug, Clone)]
pub struct ReportSummary {
    pub org: String,
    pub repositories: usize,
    pub rows: usize,
    pub output_path: PathBuf,
    pub stats: CollectorStats,
}

/// Collect the owner report without writing it.
pub async fn build_report(
    config: &Config,
    host: Arc<dyn RepositoryHost>,
    options: &RunOptions,
) -> Result<OwnerReport, JobError> {
    info!(org = %options.org, backend = host.name(), "Listing repositories");
    let repos = host
        .list_repositories(&options.org)
        .await
        .map_err(|source| JobError::ListRepositories {
            org: options.org.clone(),
            source,
        })?;
    info!(org = %options.org, count = repos.len(), "Repositories listed");

    let known = match &options.known_owners_file {
        Some(path) => Some(Arc::new(KnownOwners::load(path).await?)),
        None => None,
    };

    let collector = OwnershipCollector::new(host, &config.collector, config.github.site.clone());
    let records = collector.run(&options.org, &repos, known).await;

    Ok(OwnerReport {
        org: options.org.clone(),
        repositories: repos.len(),
        table: ResultTable::from_records(&records),
        stats: collector.stats(),
    })
}

/// Collect the owner report and write it to `<output.base_name>.csv`.
pub async fn run_report(
    config: &Config,
    host: Arc<dyn RepositoryHost>,
    options: &RunOptions,
) -> Result<ReportSummary, JobError> {
    let report = build_report(config, host, options).await?;
    let output_path = write_csv(&report.table, &config.output.base_name)?;

    Ok(ReportSummary {
        org: report.org,
        repositories: report.repositories,
        rows: report.table.len(),
        output_path,
        stats: report.stats,
    })
}
