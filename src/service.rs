//! The clone orchestrator.
//!
//! [`CloneService::clone_repo`] validates a [`CloneRequest`], picks the
//! directory name, resolves the target path under the configured base
//! directory, refuses to touch anything that already exists, and hands the
//! actual clone to a [`GitClient`] on the blocking pool. A watchdog cancels
//! the clone once it has gone `clone_timeout` without progress.
//! Every failure comes back as an [`AppError`] whose status code is stable.

use crate::cancellation::CancellationToken;
use crate::config::path_resolve::resolve_target_path;
use crate::config::Config;
use crate::errors::{io_error_with_path, AppError, GitError, Result};
use crate::git::{derive_dir_name, redact_url, GitClient};
use crate::progress::ProgressReporter;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

/// Inbound clone request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloneRequest {
    /// Remote repository URL. Required; `None` or blank is rejected.
    #[serde(default)]
    pub url: Option<String>,
    /// Optional directory name overriding the one derived from `url`.
    #[serde(default)]
    pub dir_name: Option<String>,
}

impl CloneRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            dir_name: None,
        }
    }

    pub fn with_dir_name(mut self, dir_name: impl Into<String>) -> Self {
        self.dir_name = Some(dir_name.into());
        self
    }
}

/// Outcome of a successful clone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloneResult {
    /// Absolute path of the new working copy.
    pub target_path: PathBuf,
    /// Directory name inside the base directory.
    pub dir_name: String,
}

/// Per-call knobs that do not come from the request body.
#[derive(Clone, Default)]
pub struct CloneOptions {
    /// Receives transfer progress.
    pub progress: Option<Arc<dyn ProgressReporter>>,
    /// Cancelled by the orchestrator when the clone stalls; callers may cancel
    /// it too. Clients record progress on it.
    pub token: CancellationToken,
}

/// Target paths with a clone currently running.
type InFlight = Arc<Mutex<HashSet<PathBuf>>>;

/// Releases a target path claim when dropped.
struct PathClaim {
    in_flight: InFlight,
    path: PathBuf,
}

impl PathClaim {
    /// Claims `path`, or returns `None` if another clone holds it.
    fn acquire(in_flight: &InFlight, path: &Path) -> Option<Self> {
        let mut guard = in_flight.lock().unwrap_or_else(PoisonError::into_inner);
        if !guard.insert(path.to_path_buf()) {
            return None;
        }
        Some(Self {
            in_flight: Arc::clone(in_flight),
            path: path.to_path_buf(),
        })
    }
}

impl Drop for PathClaim {
    fn drop(&mut self) {
        self.in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.path);
    }
}

/// Clones repositories into a fixed base directory.
///
/// The service is cheap to share behind an `Arc`; the only state it keeps
/// between calls is the set of target paths with a clone in progress.
pub struct CloneService {
    base_dir: PathBuf,
    clone_timeout: Duration,
    client: Arc<dyn GitClient>,
    in_flight: InFlight,
}

impl CloneService {
    pub fn new(config: &Config, client: Arc<dyn GitClient>) -> Self {
        Self {
            base_dir: config.base_dir.clone(),
            clone_timeout: config.clone_timeout,
            client,
            in_flight: Arc::default(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn clone_timeout(&self) -> Duration {
        self.clone_timeout
    }

    /// Clones the requested repository and reports where it landed.
    ///
    /// # Errors
    /// - `InvalidArgument` if `url` is missing or blank, or `dir_name` is a path.
    /// - `AlreadyExists` if the target exists or another clone is writing it.
    ///   The client is not called.
    /// - `CloneFailed` for any client failure, including a clone that made no
    ///   progress for `clone_timeout`.
    /// - `IoError`/`Internal` for local faults (base directory creation, a
    ///   panicking client).
    pub async fn clone_repo(
        &self,
        request: CloneRequest,
        options: CloneOptions,
    ) -> Result<CloneResult> {
        let url = validate_url(request.url.as_deref())?;
        let dir_name = match explicit_dir_name(request.dir_name.as_deref())? {
            Some(name) => name,
            None => derive_dir_name(&url),
        };
        let target_path = resolve_target_path(&self.base_dir, &dir_name);
        tracing::info!(url = %redact_url(&url), path = %target_path.display(), "Preparing clone");

        tokio::fs::create_dir_all(&self.base_dir)
            .await
            .map_err(|e| io_error_with_path(e, &self.base_dir))?;

        let claim = PathClaim::acquire(&self.in_flight, &target_path).ok_or_else(|| {
            tracing::warn!(path = %target_path.display(), "Clone already in progress");
            AppError::AlreadyExists {
                path: target_path.clone(),
            }
        })?;

        let exists = tokio::fs::try_exists(&target_path)
            .await
            .map_err(|e| io_error_with_path(e, &target_path))?;
        if exists {
            tracing::warn!(path = %target_path.display(), "Target directory already exists");
            return Err(AppError::AlreadyExists { path: target_path });
        }

        self.run_clone(claim, &url, &target_path, options).await?;

        tracing::info!(path = %target_path.display(), "Clone succeeded");
        Ok(CloneResult {
            target_path,
            dir_name,
        })
    }

    async fn run_clone(
        &self,
        claim: PathClaim,
        url: &str,
        target_path: &Path,
        options: CloneOptions,
    ) -> Result<()> {
        let CloneOptions { progress, token } = options;
        let client = Arc::clone(&self.client);
        let worker_url = url.to_string();
        let worker_target = target_path.to_path_buf();
        let worker_token = token.clone();

        token.record_activity();
        // The claim moves into the worker so it outlives a timed-out request.
        let mut worker = tokio::task::spawn_blocking(move || {
            let _claim = claim;
            client.clone_repo(&worker_url, &worker_target, &worker_token, progress)
        });

        let outcome = loop {
            tokio::select! {
                joined = &mut worker => match joined {
                    Ok(result) => break result,
                    Err(join_error) => {
                        tracing::error!(error = %join_error, "Clone worker failed");
                        return Err(AppError::Internal(format!(
                            "clone worker failed: {}",
                            join_error
                        )));
                    }
                },
                _ = tokio::time::sleep(self.watchdog_period()) => {
                    if token.idle_time() >= self.clone_timeout {
                        tracing::warn!(
                            url = %redact_url(url),
                            idle_secs = token.idle_time().as_secs_f64(),
                            "Clone made no progress, cancelling"
                        );
                        token.cancel();
                        break Err(GitError::TimedOut(self.clone_timeout));
                    }
                }
            }
        };

        outcome.map_err(|source| {
            let url = redact_url(url);
            tracing::error!(%url, error = %source, "Clone failed");
            AppError::CloneFailed { url, source }
        })
    }

    /// How often the watchdog compares the clone's idle time to the limit.
    fn watchdog_period(&self) -> Duration {
        (self.clone_timeout / 4).clamp(Duration::from_millis(10), Duration::from_secs(1))
    }
}

fn validate_url(url: Option<&str>) -> Result<String> {
    match url.map(str::trim) {
        Some(url) if !url.is_empty() => Ok(url.to_string()),
        _ => {
            tracing::warn!("Rejected clone request without a repository url");
            Err(AppError::InvalidArgument(
                "missing a valid repository url".to_string(),
            ))
        }
    }
}

/// Returns the trimmed explicit name, `None` when absent or blank.
fn explicit_dir_name(dir_name: Option<&str>) -> Result<Option<String>> {
    let Some(name) = dir_name.map(str::trim).filter(|n| !n.is_empty()) else {
        return Ok(None);
    };
    if name == "." || name == ".." || name.contains(&['/', '\\'][..]) {
        return Err(AppError::InvalidArgument(format!(
            "dirName must be a single directory name, got '{}'",
            name
        )));
    }
    Ok(Some(name.to_string()))
}
