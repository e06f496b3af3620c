// src/git/mod.rs
//! Git-facing pieces of the clone pipeline.
//!
//! This module provides:
//! - Credential-free renderings of remote URLs for logs and error messages.
//! - Directory name derivation from repository URLs (`https://`, `ssh://`,
//!   `file://` and `user@host:path` shorthand).
//! - The [`GitClient`] capability and its libgit2 implementation, with SSH
//!   authentication callbacks and cooperative cancellation.

mod clone;
mod url;

pub use clone::{Git2Client, GitClient};
pub use url::{derive_dir_name, is_ssh_shorthand, redact_url, strip_git_suffix};
