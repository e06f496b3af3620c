// src/config/path_resolve.rs

//! Resolves the base clone directory and target paths inside it.

use crate::constants::DEFAULT_BASE_DIR_NAME;
use crate::errors::{io_error_with_path, AppError, Result};
use std::path::{Path, PathBuf};

/// The default base directory: `<home>/nice-repos`.
///
/// # Errors
/// Returns `AppError::ConfigError` if the home directory cannot be determined.
pub fn default_base_dir() -> Result<PathBuf> {
    let base_dirs = directories::BaseDirs::new().ok_or_else(|| {
        AppError::ConfigError("could not determine the home directory".to_string())
    })?;
    Ok(base_dirs.home_dir().join(DEFAULT_BASE_DIR_NAME))
}

/// Turns a configured base directory into an absolute path, or falls back to
/// [`default_base_dir`] when none is configured.
pub(super) fn resolve_base_dir(configured: Option<&Path>) -> Result<PathBuf> {
    match configured {
        Some(path) if path.as_os_str().is_empty() => Err(AppError::ConfigError(
            "base directory must not be empty".to_string(),
        )),
        Some(path) => std::path::absolute(path).map_err(|e| io_error_with_path(e, path)),
        None => default_base_dir(),
    }
}

/// Joins the base directory and a directory name into the clone target.
///
/// ```
/// use nice_clone::config::path_resolve::resolve_target_path;
/// use std::path::Path;
///
/// let target = resolve_target_path(Path::new("/srv/nice-repos"), "nice");
/// assert_eq!(target, Path::new("/srv/nice-repos/nice"));
/// ```
pub fn resolve_target_path(base_dir: &Path, dir_name: &str) -> PathBuf {
    base_dir.join(dir_name)
}
