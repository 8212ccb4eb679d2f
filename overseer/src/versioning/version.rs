//! Package version grammar.
//!
//! A package version is the upstream version followed by a build number:
//! `<major>.<minor>.<patch>-<build>`. Every number is either `0` or has no
//! leading zero.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error returned for strings outside the package version grammar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{0}' is not a <major>.<minor>.<patch>-<build> version")]
pub struct ParseVersionError(pub String);

/// A validated `<major>.<minor>.<patch>-<build>` version.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PackageVersion {
    upstream: String,
    build: String,
}

impl PackageVersion {
    /// The `<major>.<minor>.<patch>` part.
    pub fn upstream(&self) -> &str {
        &self.upstream
    }

    /// The build number after the dash.
    pub fn build(&self) -> &str {
        &self.build
    }
}

impl FromStr for PackageVersion {
    type Err = ParseVersionError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseVersionError(value.to_string());

        let (upstream, build) = value.split_once('-').ok_or_else(invalid)?;
        let parts: Vec<&str> = upstream.split('.').collect();
        if parts.len() != 3 || !parts.iter().all(|part| is_number(part)) || !is_number(build) {
            return Err(invalid());
        }

        Ok(Self {
            upstream: upstream.to_string(),
            build: build.to_string(),
        })
    }
}

impl fmt::Display for PackageVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.upstream, self.build)
    }
}

/// `0`, or a non-empty digit run without a leading zero.
fn is_number(value: &str) -> bool {
    !value.is_empty()
        && value.bytes().all(|b| b.is_ascii_digit())
        && (value == "0" || !value.starts_with('0'))
}
