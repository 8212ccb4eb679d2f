#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

pub mod cache;
pub mod config;
pub mod directory;
pub mod freshness;
pub mod policy;
pub mod process;
pub mod runner;
pub mod summary;
pub mod sync;
pub mod versioning;

pub use cache::{CacheError, FleetCache};
pub use config::{load_settings, ConfigError, Settings, ToolPaths};
pub use directory::{
    fetch_all, DirectoryError, GitHubDirectory, Organization, RepositoryDescriptor,
    RepositoryPages,
};
pub use freshness::{check_fresh, Freshness, FreshnessError};
pub use policy::{PolicyStatus, PolicyViolation};
pub use process::{CommandOutput, CommandRunner, ProcessError, SystemCommandRunner, Toolchain};
pub use runner::{RepositoryFailure, Runner, RunnerConfig, ScanError};
pub use summary::{RepositoryOutcome, ScanSummary, SkipReason};
pub use sync::{sync, SyncError, WorkingCopy};
pub use versioning::{check_versioning, PackageVersion, VersionRecord, VersionSource, VersioningError};
