pub mod collector;
pub mod config;
pub mod host;
pub mod job;
pub mod owners;
pub mod report;
pub mod testing;

pub use collector::{
    lookup_owner_file, CollectorStats, OwnerFileLookup, OwnershipCollector, OwnershipMap,
    OwnershipStore,
};
pub use config::{
    load_config, load_config_from_str, load_default_config, validate_config, CollectorConfig,
    Config, ConfigError, GitHubConfig, OutputConfig, DEFAULT_MAX_CONCURRENT,
};
pub use host::{repository_url, GitHubClient, HostError, Repository, RepositoryHost};
pub use job::{build_report, run_report, JobError, OwnerReport, ReportSummary, RunOptions};
pub use owners::{parse_owners, KnownOwners, KnownOwnersError, NO_OWNER};
pub use report::{report_path, write_csv, write_csv_to, ReportError, ResultTable};
