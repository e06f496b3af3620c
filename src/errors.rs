//! Defines application-specific error types.
//!
//! `AppError` is the error every orchestrator operation returns. Each variant
//! maps to exactly one [`StatusCode`] and knows which part of itself may be
//! shown to a caller; everything else stays in the logs. `GitError` describes
//! failures of the underlying version-control client.

use crate::constants::MAX_PUBLIC_DETAIL_LEN;
use crate::status::StatusCode;
use std::path::PathBuf;
use thiserror::Error;

/// Application-specific errors used throughout `nice-clone`.
#[derive(Error, Debug)]
pub enum AppError {
    /// The request was missing required input or carried malformed input.
    #[error("{0}")]
    InvalidArgument(String),

    /// The target directory is already present, or another clone currently owns it.
    #[error("target directory already exists: {}", path.display())]
    AlreadyExists {
        /// The resolved target path.
        path: PathBuf,
    },

    /// The version-control client reported a failure.
    #[error("clone of '{url}' failed: {source}")]
    CloneFailed {
        /// The remote URL that was being cloned.
        url: String,
        /// The underlying client error.
        #[source]
        source: GitError,
    },

    /// No operation is registered for the requested route.
    #[error("no route for {0}")]
    NotFound(String),

    // --- I/O Errors ---
    /// Error occurring during file or directory access.
    #[error("I/O error accessing path '{path}': {source}")]
    IoError {
        /// The path that caused the I/O error.
        path: String,
        /// The underlying `std::io::Error`.
        #[source]
        source: std::io::Error,
    },

    // --- Configuration Errors ---
    /// Invalid configuration settings or combinations.
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// An unexpected internal fault (e.g., a panicked worker).
    #[error("internal error: {0}")]
    Internal(String),
}

/// Errors raised by a [`GitClient`](crate::git::GitClient) implementation.
#[derive(Error, Debug)]
pub enum GitError {
    /// libgit2 failed to clone the repository.
    #[error("{source}")]
    CloneFailed {
        /// The remote URL.
        url: String,
        /// The underlying `git2::Error`.
        #[source]
        source: git2::Error,
    },

    /// The clone was aborted through its cancellation token.
    #[error("clone cancelled")]
    Cancelled,

    /// The clone went this long without reporting progress.
    #[error("clone timed out after {}s without progress", .0.as_secs_f64())]
    TimedOut(std::time::Duration),

    /// Any other client failure.
    #[error(transparent)]
    Generic(#[from] anyhow::Error),
}

/// Result alias for orchestrator operations.
pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    /// The status code this error is reported under.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidArgument(_) => StatusCode::InvalidArgument,
            AppError::AlreadyExists { .. } => StatusCode::AlreadyExists,
            AppError::CloneFailed { .. } => StatusCode::CloneFailed,
            AppError::NotFound(_) => StatusCode::NotFound,
            AppError::IoError { .. } | AppError::ConfigError(_) | AppError::Internal(_) => {
                StatusCode::UnknownError
            }
        }
    }

    /// The short message that may leave the process.
    ///
    /// Unclassified faults never expose their detail. Client failures expose at
    /// most the first line of the client message, truncated.
    pub fn public_message(&self) -> String {
        match self {
            AppError::InvalidArgument(_) | AppError::AlreadyExists { .. } | AppError::NotFound(_) => {
                self.to_string()
            }
            AppError::CloneFailed { source, .. } => {
                format!("clone failed: {}", short_detail(&source.to_string()))
            }
            AppError::IoError { .. } | AppError::ConfigError(_) | AppError::Internal(_) => {
                "internal server error".to_string()
            }
        }
    }

    /// Whether this error signals a defect rather than a caller or remote problem.
    pub fn is_internal(&self) -> bool {
        self.status_code() == StatusCode::UnknownError
    }
}

fn short_detail(message: &str) -> String {
    let first_line = message.lines().next().unwrap_or_default().trim();
    if first_line.chars().count() <= MAX_PUBLIC_DETAIL_LEN {
        return first_line.to_string();
    }
    let truncated: String = first_line.chars().take(MAX_PUBLIC_DETAIL_LEN).collect();
    format!("{}...", truncated)
}

/// Helper function to create an `AppError::IoError` with path context.
///
/// # Arguments
/// * `source` - The original `std::io::Error`.
/// * `path` - The path associated with the error, convertible to `AsRef<std::path::Path>`.
///
/// # Returns
/// An `AppError::IoError` variant containing the path string and the source error.
pub fn io_error_with_path<P: AsRef<std::path::Path>>(source: std::io::Error, path: P) -> AppError {
    AppError::IoError {
        path: path.as_ref().display().to_string(),
        source,
    }
}
