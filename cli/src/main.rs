//! CLI for the overseer fleet scanner.
//!
//! Scans every package repository of the organization, lists packages, or
//! checks the release versions of a single working copy.

use clap::{ArgAction, Args, Parser, Subcommand};
use overseer::{
    check_versioning, fetch_all, load_settings, ConfigError, DirectoryError, GitHubDirectory,
    Organization, RepositoryDescriptor, Runner, RunnerConfig, ScanError, ScanSummary, Settings,
    SystemCommandRunner, Toolchain, VersionRecord, VersioningError,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use thiserror::Error;
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Overseer - Keep the package fleet consistent.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbose logging.
    #[arg(long, global = true)]
    verbose: bool,

    /// Path to a configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Organization to inspect.
    #[arg(long, global = true, env = "OVERSEER_ORG")]
    org: Option<String>,

    /// GitHub Personal Access Token.
    #[arg(long, global = true, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Command,
}

impl Cli {
    /// The token to authenticate with; a blank value means anonymous.
    fn token(&self) -> Option<&str> {
        self.token
            .as_deref()
            .filter(|token| !token.trim().is_empty())
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check every package repository of the organization.
    Scan(ScanArgs),

    /// Print the package list.
    List,

    /// Check version consistency of a package release.
    Libcheck(LibcheckArgs),
}

#[derive(Args, Debug)]
struct ScanArgs {
    /// Directory holding the repository list and working copies.
    #[arg(long)]
    cache_dir: Option<PathBuf>,

    /// Remove the cache directory before scanning.
    #[arg(long, overrides_with = "no_clear_cache")]
    clear_cache: bool,

    /// Keep the cache directory (default).
    #[arg(long, overrides_with = "clear_cache")]
    no_clear_cache: bool,

    /// Check packages for upstream updates.
    #[arg(
        long,
        action = ArgAction::Set,
        num_args = 0..=1,
        default_missing_value = "true",
        default_value_t = true,
        overrides_with = "no_check_updates"
    )]
    check_updates: bool,

    /// Skip the upstream update check.
    #[arg(long, overrides_with = "check_updates")]
    no_check_updates: bool,

    /// Check repository settings against the organization policy.
    #[arg(
        long,
        action = ArgAction::Set,
        num_args = 0..=1,
        default_missing_value = "true",
        default_value_t = true,
        overrides_with = "no_check_repository_settings"
    )]
    check_repository_settings: bool,

    /// Skip the repository settings check.
    #[arg(long, overrides_with = "check_repository_settings")]
    no_check_repository_settings: bool,
}

impl ScanArgs {
    // Of each `--x` / `--no-x` pair only the last one given survives parsing.

    fn clear_cache(&self) -> bool {
        self.clear_cache && !self.no_clear_cache
    }

    fn check_updates(&self) -> bool {
        self.check_updates && !self.no_check_updates
    }

    fn check_repository_settings(&self) -> bool {
        self.check_repository_settings && !self.no_check_repository_settings
    }
}

#[derive(Args, Debug)]
struct LibcheckArgs {
    /// Package working copy to check.
    #[arg(long, default_value = ".")]
    path: PathBuf,

    /// Version the release is expected to carry (e.g., a pushed tag).
    #[arg(long)]
    reference: Option<String>,
}

/// Any failure that ends the process with a non-zero exit code.
#[derive(Error, Debug)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Directory(#[from] DirectoryError),

    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error(transparent)]
    Versioning(#[from] VersioningError),
}

impl CliError {
    /// Whether the failure was already logged where it happened.
    fn is_reported(&self) -> bool {
        matches!(self, Self::Scan(ScanError::Repository { .. }))
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if !e.is_reported() {
                error!(error = %e, "Overseer failed");
            }
            ExitCode::from(1)
        }
    }
}

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise the level is `info`, or `debug` with
/// `--verbose`.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(fmt::layer().compact().with_target(false))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let current_dir = std::env::current_dir().map_err(|source| ConfigError::IoError {
        path: ".".to_string(),
        source,
    })?;
    let mut settings = load_settings(cli.config.as_deref(), &current_dir)?;
    let token = cli.token().map(str::to_string);
    if let Some(org) = cli.org {
        settings.org = org;
    }

    match cli.command {
        Command::Scan(args) => {
            if let Some(cache_dir) = &args.cache_dir {
                settings.cache_dir = cache_dir.clone();
            }
            settings.validate(Path::new("<command line>"))?;

            let config = RunnerConfig::new(settings.cache_dir.clone())
                .with_clear_cache(args.clear_cache())
                .with_check_updates(args.check_updates())
                .with_check_repository_settings(args.check_repository_settings());
            let directory = directory(&settings, token.as_deref())?;
            let runner = Runner::new(
                config,
                settings.organization(),
                Toolchain::resolve(&settings.tools),
                directory,
                SystemCommandRunner,
            );
            let summary = runner.run().await?;
            print_summary(&summary);
        }
        Command::List => {
            settings.validate(Path::new("<command line>"))?;
            let directory = directory(&settings, token.as_deref())?;
            let organization = settings.organization();
            let repositories = fetch_all(&directory, organization.name()).await?;
            print_packages(&organization, &repositories);
        }
        Command::Libcheck(args) => {
            let record = check_versioning(
                &SystemCommandRunner,
                &Toolchain::resolve(&settings.tools),
                &args.path,
                args.reference.as_deref(),
            )
            .await?;
            print_versions(&record);
        }
    }

    Ok(())
}

fn directory(settings: &Settings, token: Option<&str>) -> Result<GitHubDirectory, DirectoryError> {
    GitHubDirectory::new(&settings.api_url, token, settings.request_timeout())
}

/// Prints the final scan summary.
fn print_summary(summary: &ScanSummary) {
    let enabled = |on: bool| if on { "on" } else { "off" };

    println!("\nSummary:");
    println!(
        "  Repository list: {}",
        if summary.cache_reused {
            "cached"
        } else {
            "fetched"
        }
    );
    println!("  Repositories: {}", summary.repositories_total);
    println!("  Packages checked: {}", summary.packages_checked);
    println!("  Repositories skipped: {}", summary.repositories_skipped);
    println!(
        "  Repository settings check: {}",
        enabled(summary.check_repository_settings)
    );
    println!("  Update check: {}", enabled(summary.check_updates));
}

/// Prints one row per package: name, URL, last update, open issues.
fn print_packages(organization: &Organization, repositories: &[RepositoryDescriptor]) {
    let rows: Vec<[String; 4]> = organization
        .packages(repositories)
        .into_iter()
        .map(|repo| {
            [
                repo.name.clone(),
                organization.package_url(&repo.name),
                repo.updated_at.to_rfc3339(),
                repo.open_issues_count.to_string(),
            ]
        })
        .collect();

    let header = ["Name", "Url", "Updated", "Issues"].map(String::from);
    let mut widths = header.clone().map(|cell| cell.len());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.len());
        }
    }

    for row in std::iter::once(&header).chain(&rows) {
        println!(
            "{:<w0$}  {:<w1$}  {:<w2$}  {:>w3$}",
            row[0],
            row[1],
            row[2],
            row[3],
            w0 = widths[0],
            w1 = widths[1],
            w2 = widths[2],
            w3 = widths[3],
        );
    }
}

/// Prints the versions a successful release check agreed on.
fn print_versions(record: &VersionRecord) {
    println!("\nVersions:");
    println!("  Package: {}", record.manifest_version);
    println!("  Upstream: {}", record.upstream_version);
    println!(
        "  Latest tag: {}",
        record.tag_version.as_deref().unwrap_or("(none)")
    );
    println!("  README header: {}", record.readme_header_version);
    println!("  README install: {}", record.readme_install_version);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("overseer").chain(args.iter().copied())).unwrap()
    }

    fn scan_args(args: &[&str]) -> ScanArgs {
        match parse(args).command {
            Command::Scan(scan) => scan,
            other => panic!("expected scan, got {other:?}"),
        }
    }

    #[test]
    fn scan_checks_default_on() {
        let scan = scan_args(&["scan"]);

        assert!(scan.check_updates());
        assert!(scan.check_repository_settings());
        assert!(!scan.clear_cache());
        assert_eq!(scan.cache_dir, None);
    }

    #[test]
    fn scan_checks_can_be_disabled_with_value() {
        let scan = scan_args(&[
            "scan",
            "--check-updates=false",
            "--check-repository-settings=false",
        ]);

        assert!(!scan.check_updates());
        assert!(!scan.check_repository_settings());
    }

    #[test]
    fn bare_check_flag_means_true() {
        let scan = scan_args(&["scan", "--check-updates", "--clear-cache"]);

        assert!(scan.check_updates());
        assert!(scan.clear_cache());
    }

    #[test]
    fn negated_flags_disable_checks() {
        let scan = scan_args(&[
            "scan",
            "--no-check-updates",
            "--no-check-repository-settings",
            "--no-clear-cache",
        ]);

        assert!(!scan.check_updates());
        assert!(!scan.check_repository_settings());
        assert!(!scan.clear_cache());
    }

    #[test]
    fn last_of_a_flag_pair_wins() {
        let scan = scan_args(&[
            "scan",
            "--no-check-updates",
            "--check-updates",
            "--clear-cache",
            "--no-clear-cache",
        ]);

        assert!(scan.check_updates());
        assert!(!scan.clear_cache());
    }

    #[test]
    fn empty_token_variable_is_anonymous() {
        temp_env::with_var("GITHUB_TOKEN", Some(""), || {
            assert_eq!(parse(&["list"]).token(), None);
        });
        temp_env::with_var("GITHUB_TOKEN", Some("ghp_abc123"), || {
            assert_eq!(parse(&["list"]).token(), Some("ghp_abc123"));
        });
    }

    #[test]
    fn libcheck_defaults_to_current_directory() {
        match parse(&["libcheck", "--reference", "1.3.1-2"]).command {
            Command::Libcheck(args) => {
                assert_eq!(args.path, PathBuf::from("."));
                assert_eq!(args.reference.as_deref(), Some("1.3.1-2"));
            }
            other => panic!("expected libcheck, got {other:?}"),
        }
    }

    #[test]
    fn only_repository_failures_are_logged_by_the_runner() {
        let failure = CliError::Scan(ScanError::Repository {
            repository: "zlib".to_string(),
            cause: overseer::RepositoryFailure::Outdated {
                details: "upstream 1.3.1 -> 1.3.2".to_string(),
            },
        });
        let config = CliError::Config(ConfigError::MissingFile {
            path: "overseer.toml".to_string(),
        });

        assert!(failure.is_reported());
        assert!(!config.is_reported());
    }
}
