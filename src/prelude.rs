//! The `nice-clone` prelude for convenient library usage.
//!
//! # Example
//!
//! ```
//! use nice_clone::prelude::*;
//!
//! assert_eq!(derive_dir_name("git@github.com:vercel/nice.git"), "nice");
//! let envelope: ResponseEnvelope<()> =
//!     ResponseEnvelope::error(StatusCode::NotFound, "no route for GET /x");
//! assert!(!envelope.ok);
//! ```

pub use crate::cancellation::CancellationToken;
pub use crate::config::{Config, ConfigBuilder};
pub use crate::errors::{AppError, GitError, Result};
pub use crate::git::{derive_dir_name, redact_url, Git2Client, GitClient};
pub use crate::progress::{NoOpProgress, ProgressReporter, TransferStage};
pub use crate::response::{ErrorInfo, ResponseEnvelope};
pub use crate::service::{CloneOptions, CloneRequest, CloneResult, CloneService};
pub use crate::status::StatusCode;
