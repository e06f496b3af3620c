// src/constants.rs

/// Name of the directory, under the user's home directory, that receives clones by default.
pub const DEFAULT_BASE_DIR_NAME: &str = "nice-repos";

/// Directory name used when nothing usable can be derived from a repository URL.
pub const FALLBACK_DIR_NAME: &str = "repo";

/// Suffix stripped from derived directory names.
pub const GIT_SUFFIX: &str = ".git";

/// Default idle limit, in seconds, for a running clone.
pub const DEFAULT_CLONE_TIMEOUT_SECS: u64 = 600;

/// Default port for `nice-clone serve`.
pub const DEFAULT_PORT: u16 = 9000;

/// Header carrying the correlation id of a request.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Maximum length of the client message echoed back in a `CloneFailed` envelope.
pub const MAX_PUBLIC_DETAIL_LEN: usize = 160;
