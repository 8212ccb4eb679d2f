//! Release version consistency check.
//!
//! The manifest is the single writable source of a package's version. The
//! latest git tag, the `nvchecker` state and two places in the README are
//! maintained separately and must agree with it:
//!
//! | source                    | expected value           |
//! |---------------------------|--------------------------|
//! | reference (if supplied)   | manifest version         |
//! | latest reachable tag      | manifest version         |
//! | `.github/oldver.json`     | upstream part            |
//! | README first line `@v..`  | upstream part            |
//! | README `zig fetch` line   | manifest version         |

mod error;
mod record;
mod sources;
mod version;

pub use error::{VersionSource, VersioningError};
pub use record::VersionRecord;
pub use version::{PackageVersion, ParseVersionError};

use crate::process::{run_checked, CommandRunner, Toolchain};
use std::path::Path;
use tracing::{debug, info, info_span, Instrument};

/// Package manifest holding the version.
pub const MANIFEST_FILE: &str = "build.zig.zon";

/// `nvchecker` state recording the tracked upstream version.
pub const TRACKER_STATE_FILE: &str = ".github/oldver.json";

/// Package documentation.
pub const README_FILE: &str = "README.md";

/// Checks that every version source in `dir` agrees with the manifest.
///
/// Steps run in order and stop at the first disagreement:
/// 1. read and validate the manifest version
/// 2. derive the upstream version by dropping the build number
/// 3. compare with `reference`, if given
/// 4. compare with the latest tag reachable from `HEAD`, if any
/// 5. compare the upstream version with the `nvchecker` state
/// 6. compare the upstream version with the README title
/// 7. require a README install line for the exact manifest version
///
/// # Errors
///
/// Returns [`VersioningError::Mismatch`] naming both sources when two
/// disagree, or another [`VersioningError`] when a source is missing or
/// unreadable.
pub async fn check_versioning<R: CommandRunner>(
    runner: &R,
    tools: &Toolchain,
    dir: &Path,
    reference: Option<&str>,
) -> Result<VersionRecord, VersioningError> {
    let span = info_span!("check_versioning", dir = %dir.display());
    check(runner, tools, dir, reference).instrument(span).await
}

async fn check<R: CommandRunner>(
    runner: &R,
    tools: &Toolchain,
    dir: &Path,
    reference: Option<&str>,
) -> Result<VersionRecord, VersioningError> {
    let manifest_path = dir.join(MANIFEST_FILE);
    let manifest = sources::read_text(&manifest_path)?;
    let manifest_version = sources::manifest_version(&manifest)?.ok_or_else(|| {
        VersioningError::MissingManifestVersion {
            path: manifest_path.display().to_string(),
        }
    })?;
    info!(version = %manifest_version, "Detected package version");

    let package: PackageVersion =
        manifest_version
            .parse()
            .map_err(|_| VersioningError::InvalidVersion {
                path: manifest_path.display().to_string(),
                version: manifest_version.clone(),
            })?;
    let upstream_version = package.upstream().to_string();
    info!(
        version = %upstream_version,
        build = package.build(),
        "Detected upstream version"
    );

    if let Some(reference) = reference.filter(|reference| !reference.is_empty()) {
        ensure_equal(
            VersionSource::Manifest,
            &manifest_version,
            VersionSource::Reference,
            reference,
        )?;
    }

    let tag_version = latest_tag(runner, tools, dir).await?;
    match &tag_version {
        Some(tag) => ensure_equal(
            VersionSource::Manifest,
            &manifest_version,
            VersionSource::GitTag,
            tag,
        )?,
        None => debug!("No tags yet"),
    }

    let tracked = sources::tracker_version(&dir.join(TRACKER_STATE_FILE))?;
    ensure_equal(
        VersionSource::ManifestUpstream,
        &upstream_version,
        VersionSource::TrackerState,
        &tracked,
    )?;

    let readme_path = dir.join(README_FILE);
    let readme = sources::read_text(&readme_path)?;

    let readme_header_version = sources::readme_header_version(&readme)?;
    ensure_equal(
        VersionSource::ManifestUpstream,
        &upstream_version,
        VersionSource::ReadmeHeader,
        &readme_header_version,
    )?;

    let installs = sources::readme_install_versions(&readme)?;
    let readme_install_version = match installs.iter().find(|v| **v == manifest_version) {
        Some(version) => version.clone(),
        None => {
            return Err(match installs.into_iter().next() {
                Some(found) => VersioningError::Mismatch {
                    expected_source: VersionSource::Manifest,
                    expected: manifest_version,
                    found_source: VersionSource::ReadmeInstall,
                    found,
                },
                None => VersioningError::MissingInstallLine {
                    path: readme_path.display().to_string(),
                    version: manifest_version,
                },
            });
        }
    };

    Ok(VersionRecord {
        manifest_version,
        tag_version,
        upstream_version,
        readme_header_version,
        readme_install_version,
    })
}

/// Returns the most recent tag (by author date) merged into `HEAD`.
async fn latest_tag<R: CommandRunner>(
    runner: &R,
    tools: &Toolchain,
    dir: &Path,
) -> Result<Option<String>, VersioningError> {
    let output = run_checked(
        runner,
        tools.git(),
        &["tag", "--sort=-authordate", "--merged=HEAD"],
        dir,
    )
    .await?;

    Ok(output
        .stdout
        .lines()
        .next()
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string))
}

fn ensure_equal(
    expected_source: VersionSource,
    expected: &str,
    found_source: VersionSource,
    found: &str,
) -> Result<(), VersioningError> {
    if expected == found {
        return Ok(());
    }
    Err(VersioningError::Mismatch {
        expected_source,
        expected: expected.to_string(),
        found_source,
        found: found.to_string(),
    })
}
