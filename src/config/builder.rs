// src/config/builder.rs

use super::path_resolve::resolve_base_dir;
use super::Config;
use crate::cli::{CloneArgs, CloneSettings, ServeArgs};
use crate::constants::{DEFAULT_CLONE_TIMEOUT_SECS, DEFAULT_PORT};
use crate::errors::{AppError, Result};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

/// A builder for creating a [`Config`] programmatically or from CLI arguments.
///
/// # Examples
///
/// ```
/// use nice_clone::ConfigBuilder;
/// use std::time::Duration;
///
/// let config = ConfigBuilder::new()
///     .base_dir("/srv/clones")
///     .clone_timeout_secs(30)
///     .port(8080)
///     .build()
///     .unwrap();
///
/// assert!(config.base_dir.ends_with("clones"));
/// assert_eq!(config.clone_timeout, Duration::from_secs(30));
/// assert_eq!(config.bind_addr.port(), 8080);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    base_dir: Option<PathBuf>,
    clone_timeout_secs: u64,
    host: IpAddr,
    port: u16,
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self {
            base_dir: None,
            clone_timeout_secs: DEFAULT_CLONE_TIMEOUT_SECS,
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: DEFAULT_PORT,
        }
    }
}

impl ConfigBuilder {
    /// Creates a builder with the defaults: `~/nice-repos`, 600 s, `127.0.0.1:9000`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder from the arguments of `nice-clone serve`.
    pub fn from_serve_args(args: &ServeArgs) -> Self {
        Self::new()
            .apply_clone_settings(&args.clone)
            .host(args.host)
            .port(args.port)
    }

    /// Creates a builder from the arguments of `nice-clone clone`.
    pub fn from_clone_args(args: &CloneArgs) -> Self {
        Self::new().apply_clone_settings(&args.clone)
    }

    fn apply_clone_settings(mut self, settings: &CloneSettings) -> Self {
        self.base_dir = settings.base_dir.clone();
        self.clone_timeout_secs = settings.clone_timeout;
        self
    }

    /// Sets the directory that receives clones.
    pub fn base_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(path.into());
        self
    }

    /// Sets how long a clone may go without progress, in seconds.
    pub fn clone_timeout_secs(mut self, secs: u64) -> Self {
        self.clone_timeout_secs = secs;
        self
    }

    pub fn host(mut self, host: IpAddr) -> Self {
        self.host = host;
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Validates the settings and builds the final [`Config`].
    ///
    /// # Errors
    /// Returns `AppError::ConfigError` if the timeout is zero, the base
    /// directory is empty, or no base directory is given and the home
    /// directory cannot be determined.
    pub fn build(self) -> Result<Config> {
        if self.clone_timeout_secs == 0 {
            return Err(AppError::ConfigError(
                "clone timeout must be at least one second".to_string(),
            ));
        }
        let base_dir = resolve_base_dir(self.base_dir.as_deref())?;
        log::debug!("Resolved base clone directory: {}", base_dir.display());

        Ok(Config {
            base_dir,
            clone_timeout: Duration::from_secs(self.clone_timeout_secs),
            bind_addr: SocketAddr::new(self.host, self.port),
        })
    }
}
