//! `nice-clone` is a library, command-line tool and HTTP service for cloning
//! git repositories into a managed base directory.
//!
//! A clone request names a remote URL and, optionally, a directory name. The
//! orchestrator derives the name from the URL when none is given, refuses to
//! overwrite anything that already exists, and runs the clone under a time
//! budget. Every outcome is reported through a uniform
//! [`ResponseEnvelope`](response::ResponseEnvelope) with a stable numeric
//! [`StatusCode`](status::StatusCode).
//!
//! # Example: Library Usage
//!
//! ```no_run
//! use nice_clone::prelude::*;
//! use std::sync::Arc;
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let config = ConfigBuilder::new().base_dir("/srv/nice-repos").build()?;
//! let service = CloneService::new(&config, Arc::new(Git2Client::new()));
//!
//! let request = CloneRequest::new("https://github.com/vercel/nice.git");
//! let envelope = ResponseEnvelope::from_result(
//!     service.clone_repo(request, CloneOptions::default()).await,
//! );
//! println!("{}", serde_json::to_string_pretty(&envelope)?);
//! # Ok(())
//! # }
//! ```

pub mod cancellation;
pub mod cli;
pub mod config;
pub mod constants;
pub mod errors;
pub mod git;
pub mod logging;
pub mod prelude;
pub mod progress;
pub mod response;
pub mod service;
pub mod signal;
pub mod status;
pub mod web;

pub use cancellation::CancellationToken;
pub use config::{Config, ConfigBuilder};
pub use service::{CloneOptions, CloneRequest, CloneResult, CloneService};
