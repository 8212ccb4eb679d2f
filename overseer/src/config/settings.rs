//! Scanner settings deserialization and validation.

use crate::config::{ConfigError, ToolPaths};
use crate::directory::Organization;
use serde::Deserialize;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Parsed contents of an `overseer.toml` file.
///
/// Every key is optional; missing keys take the organization defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Settings {
    /// Organization that owns the fleet.
    #[serde(default = "default_org")]
    pub org: String,

    /// Base URL of the hosting API.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Directory holding the repository list and working copies.
    #[serde(default = "default_cache_dir")]
    pub cache_dir: PathBuf,

    /// Timeout applied to each directory page request.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Organization meta-repositories that are never treated as packages.
    #[serde(default = "default_internal_repositories")]
    pub internal_repositories: BTreeSet<String>,

    /// Explicit tool locations.
    #[serde(default)]
    pub tools: ToolPaths,
}

pub(crate) fn default_org() -> String {
    "zig-devel".to_string()
}

pub(crate) fn default_api_url() -> String {
    "https://api.github.com".to_string()
}

pub(crate) fn default_cache_dir() -> PathBuf {
    PathBuf::from(".zd_cache")
}

pub(crate) fn default_request_timeout_secs() -> u64 {
    10
}

pub(crate) fn default_internal_repositories() -> BTreeSet<String> {
    [".github", "toolset"].into_iter().map(String::from).collect()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            org: default_org(),
            api_url: default_api_url(),
            cache_dir: default_cache_dir(),
            request_timeout_secs: default_request_timeout_secs(),
            internal_repositories: default_internal_repositories(),
            tools: ToolPaths::default(),
        }
    }
}

impl Settings {
    /// Loads and validates settings from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read, parsed, or fails
    /// validation.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        debug!(path = %path.display(), "Loading settings");

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;

        let settings: Settings = toml::from_str(&content).map_err(|e| ConfigError::TomlError {
            path: path.display().to_string(),
            source: e,
        })?;

        settings.validate(path)?;
        Ok(settings)
    }

    /// Validates field values.
    pub fn validate(&self, path: &Path) -> Result<(), ConfigError> {
        let path_str = path.display().to_string();

        if self.org.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                path: path_str,
                message: "org must not be empty".to_string(),
            });
        }

        if Url::parse(&self.api_url).is_err() {
            return Err(ConfigError::ValidationError {
                path: path_str,
                message: format!("api-url is not a valid URL: {}", self.api_url),
            });
        }

        if self.request_timeout_secs == 0 {
            return Err(ConfigError::ValidationError {
                path: path_str,
                message: "request-timeout-secs must be greater than zero".to_string(),
            });
        }

        if self.cache_dir.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError {
                path: path_str,
                message: "cache-dir must not be empty".to_string(),
            });
        }

        Ok(())
    }

    /// Returns the per-request timeout for directory fetches.
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Builds the organization view used by the validators.
    #[must_use]
    pub fn organization(&self) -> Organization {
        Organization::new(&self.org, self.internal_repositories.iter().cloned())
    }
}
