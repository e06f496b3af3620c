// src/status.rs

//! Business status codes carried in every response envelope.
//!
//! `0` means success; every other value is a failure. The ranges group related
//! failures: `1` is the generic failure, `1xxx` covers input and resource
//! errors, `2xxx` authentication and authorization, `9xxx` external
//! dependencies such as git.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of status codes reported to callers.
///
/// Serialized as a bare integer so clients can branch on `code` without
/// knowing the Rust names.
///
/// # Examples
/// ```
/// use nice_clone::status::StatusCode;
///
/// assert_eq!(StatusCode::CloneFailed.as_u32(), 9001);
/// assert_eq!(StatusCode::try_from(1002), Ok(StatusCode::AlreadyExists));
/// assert!(StatusCode::try_from(42).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u32", try_from = "u32")]
pub enum StatusCode {
    Ok,
    UnknownError,
    InvalidArgument,
    AlreadyExists,
    NotFound,
    Unauthenticated,
    PermissionDenied,
    CloneFailed,
}

impl StatusCode {
    /// Every defined code, in ascending numeric order.
    pub const ALL: [StatusCode; 8] = [
        StatusCode::Ok,
        StatusCode::UnknownError,
        StatusCode::InvalidArgument,
        StatusCode::AlreadyExists,
        StatusCode::NotFound,
        StatusCode::Unauthenticated,
        StatusCode::PermissionDenied,
        StatusCode::CloneFailed,
    ];

    pub const fn as_u32(self) -> u32 {
        match self {
            StatusCode::Ok => 0,
            StatusCode::UnknownError => 1,
            StatusCode::InvalidArgument => 1001,
            StatusCode::AlreadyExists => 1002,
            StatusCode::NotFound => 1003,
            StatusCode::Unauthenticated => 2001,
            StatusCode::PermissionDenied => 2003,
            StatusCode::CloneFailed => 9001,
        }
    }

    /// Stable upper-case name, used as the opaque `error.kind` of failure envelopes.
    pub const fn name(self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::UnknownError => "UNKNOWN_ERROR",
            StatusCode::InvalidArgument => "INVALID_ARGUMENT",
            StatusCode::AlreadyExists => "ALREADY_EXISTS",
            StatusCode::NotFound => "NOT_FOUND",
            StatusCode::Unauthenticated => "UNAUTHENTICATED",
            StatusCode::PermissionDenied => "PERMISSION_DENIED",
            StatusCode::CloneFailed => "GIT_CLONE_FAILED",
        }
    }

    pub const fn is_ok(self) -> bool {
        matches!(self, StatusCode::Ok)
    }
}

impl From<StatusCode> for u32 {
    fn from(code: StatusCode) -> Self {
        code.as_u32()
    }
}

/// Error returned when an integer is not one of the defined status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("unknown status code: {0}")]
pub struct UnknownStatusCode(pub u32);

impl TryFrom<u32> for StatusCode {
    type Error = UnknownStatusCode;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        StatusCode::ALL
            .into_iter()
            .find(|code| code.as_u32() == value)
            .ok_or(UnknownStatusCode(value))
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.as_u32())
    }
}
