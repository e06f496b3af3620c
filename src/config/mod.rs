//! Defines the `Config` struct shared by the server and the command line.
//!
//! Values come from CLI flags and their environment variable fallbacks and are
//! validated once by [`ConfigBuilder`]. The base directory is resolved here,
//! so the orchestrator never looks at the environment itself.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

pub use builder::ConfigBuilder;
mod builder;
pub mod path_resolve;

/// Validated runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Absolute directory that receives every clone.
    pub base_dir: PathBuf,
    /// How long a clone may go without progress before it is cancelled.
    pub clone_timeout: Duration,
    /// Address the HTTP server binds to.
    pub bind_addr: SocketAddr,
}
