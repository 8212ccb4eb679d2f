//! On-disk snapshot of the repository directory.
//!
//! The cache lives in a single directory that also holds the working copies.
//! Its presence is the only freshness signal: an existing directory is used
//! as-is regardless of age until the caller clears it. Hand edits to
//! `repos.jsonl` are picked up without any validation beyond parsing.

mod error;
mod fleet_cache;

pub use error::CacheError;
pub use fleet_cache::FleetCache;

use chrono::{DateTime, Utc};
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// File name of the repository list inside the cache directory.
pub const INDEX_FILE: &str = "repos.jsonl";

/// Returns the path of the repository list for `cache_dir`.
pub fn index_path(cache_dir: &Path) -> PathBuf {
    cache_dir.join(INDEX_FILE)
}

/// Loads the cached repository list.
///
/// Returns `Ok(None)` when the cache directory does not exist. The capture
/// time is taken from the list's modification time.
///
/// # Errors
///
/// Returns [`CacheError`] if the directory exists but the list is missing,
/// unreadable, or contains a malformed line.
pub fn load(cache_dir: &Path) -> Result<Option<FleetCache>, CacheError> {
    if !cache_dir.exists() {
        debug!(path = %cache_dir.display(), "No cache directory");
        return Ok(None);
    }

    let path = index_path(cache_dir);
    let file = match File::open(&path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(CacheError::MissingIndex {
                path: path.display().to_string(),
            });
        }
        Err(e) => return Err(io_error(&path, e)),
    };

    let captured_at = file
        .metadata()
        .and_then(|metadata| metadata.modified())
        .map(DateTime::<Utc>::from)
        .map_err(|e| io_error(&path, e))?;

    let mut repositories = Vec::new();
    for (index, line) in BufReader::new(file).lines().enumerate() {
        let line = line.map_err(|e| io_error(&path, e))?;
        if line.trim().is_empty() {
            continue;
        }
        let repository =
            serde_json::from_str(&line).map_err(|source| CacheError::MalformedEntry {
                path: path.display().to_string(),
                line: index + 1,
                source,
            })?;
        repositories.push(repository);
    }

    info!(
        path = %cache_dir.display(),
        count = repositories.len(),
        captured_at = %captured_at,
        "Loaded cached repository list"
    );
    Ok(Some(FleetCache::captured(repositories, captured_at)))
}

/// Writes the repository list, one JSON object per line.
///
/// The list is written to a temporary file and renamed into place, so a
/// crash never leaves a truncated list behind.
///
/// # Errors
///
/// Returns [`CacheError`] on filesystem or serialization failures.
pub fn save(cache_dir: &Path, cache: &FleetCache) -> Result<(), CacheError> {
    fs::create_dir_all(cache_dir).map_err(|e| io_error(cache_dir, e))?;

    let path = index_path(cache_dir);
    let staging = cache_dir.join(format!("{INDEX_FILE}.tmp"));

    let file = File::create(&staging).map_err(|e| io_error(&staging, e))?;
    let mut writer = BufWriter::new(file);
    for repository in cache.repositories() {
        let line = serde_json::to_string(repository).map_err(|source| CacheError::Serialize {
            name: repository.name.clone(),
            source,
        })?;
        writeln!(writer, "{line}").map_err(|e| io_error(&staging, e))?;
    }
    writer.flush().map_err(|e| io_error(&staging, e))?;
    drop(writer);

    fs::rename(&staging, &path).map_err(|e| io_error(&path, e))?;

    info!(path = %path.display(), count = cache.len(), "Saved repository list");
    Ok(())
}

/// Removes the cache directory and every working copy inside it.
///
/// A missing directory is not an error.
///
/// # Errors
///
/// Returns [`CacheError`] if the directory exists but cannot be removed.
pub fn clear(cache_dir: &Path) -> Result<(), CacheError> {
    match fs::remove_dir_all(cache_dir) {
        Ok(()) => {
            info!(path = %cache_dir.display(), "Cleared cache");
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(io_error(cache_dir, e)),
    }
}

fn io_error(path: &Path, source: io::Error) -> CacheError {
    CacheError::IoError {
        path: path.display().to_string(),
        source,
    }
}
