//! Scanner configuration.
//!
//! Settings come from an optional `overseer.toml` file. Command-line flags
//! are layered on top by the caller.

mod error;
mod settings;
mod tools;

pub use error::ConfigError;
pub use settings::Settings;
pub use tools::ToolPaths;

use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Default configuration file name looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "overseer.toml";

/// Environment variable naming a configuration file.
pub const CONFIG_ENV: &str = "OVERSEER_CONFIG";

/// Resolves and loads the effective settings.
///
/// Lookup order:
/// 1. `explicit` path (must exist)
/// 2. path in the `OVERSEER_CONFIG` environment variable (must exist)
/// 3. `overseer.toml` inside `search_dir`, if present
/// 4. built-in defaults
///
/// # Errors
///
/// Returns [`ConfigError::MissingFile`] if an explicitly requested file does
/// not exist, or any error from [`Settings::load`].
pub fn load_settings(explicit: Option<&Path>, search_dir: &Path) -> Result<Settings, ConfigError> {
    let requested = explicit
        .map(Path::to_path_buf)
        .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from));

    if let Some(path) = requested {
        if !path.exists() {
            return Err(ConfigError::MissingFile {
                path: path.display().to_string(),
            });
        }
        info!(path = %path.display(), "Using configuration file");
        return Settings::load(&path);
    }

    let local = search_dir.join(CONFIG_FILE_NAME);
    if local.exists() {
        info!(path = %local.display(), "Using configuration file");
        return Settings::load(&local);
    }

    debug!("No configuration file found, using defaults");
    Ok(Settings::default())
}
