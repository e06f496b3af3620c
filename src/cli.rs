// src/cli.rs

use crate::constants::{DEFAULT_CLONE_TIMEOUT_SECS, DEFAULT_PORT};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::net::IpAddr;
use std::path::PathBuf;

/// Clones git repositories into a server-local directory.
///
/// `serve` exposes `POST /git/clone` over HTTP; `clone` runs the same
/// operation once from the terminal. Both answer with the same JSON envelope
/// (`ok`, `code`, `message`, `data`).
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Default log level when RUST_LOG is not set (e.g. "info", "debug").
    #[arg(long, global = true, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Log output format.
    #[arg(long, global = true, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP server.
    Serve(ServeArgs),
    /// Clone a single repository and print the result envelope.
    Clone(CloneArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    /// Address to bind to.
    #[arg(long, env = "NICE_CLONE_HOST", default_value = "127.0.0.1")]
    pub host: IpAddr,

    /// Port to listen on.
    #[arg(short, long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    #[command(flatten)]
    pub clone: CloneSettings,
}

#[derive(Args, Debug, Clone)]
pub struct CloneArgs {
    /// Repository URL (https://, ssh://, file:// or user@host:path).
    pub url: String,

    /// Directory name to clone into. Derived from the URL when omitted.
    #[arg(short, long, value_name = "NAME")]
    pub dir_name: Option<String>,

    #[command(flatten)]
    pub clone: CloneSettings,
}

/// Settings shared by every command that clones.
#[derive(Args, Debug, Clone)]
pub struct CloneSettings {
    /// Directory that receives clones [default: ~/nice-repos].
    #[arg(long, env = "NICE_REPOS_DIR", value_name = "PATH")]
    pub base_dir: Option<PathBuf>,

    /// Cancel a clone after this many seconds without progress.
    #[arg(long, env = "CLONE_TIMEOUT", value_name = "SECONDS", default_value_t = DEFAULT_CLONE_TIMEOUT_SECS)]
    pub clone_timeout: u64,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines.
    Pretty,
    /// One JSON object per event.
    Json,
}
