// src/response.rs

//! The uniform response envelope returned by every operation.

use crate::errors::AppError;
use crate::status::StatusCode;
use axum::http::StatusCode as HttpStatus;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

/// Opaque failure descriptor attached to failed envelopes.
///
/// Carries only the stable error kind and the correlation id, never the
/// underlying error object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    pub kind: String,
    #[serde(rename = "traceId", skip_serializing_if = "Option::is_none")]
    pub trace_id: Option<String>,
}

/// Success/failure wrapper for every outbound payload.
///
/// `ok` is `true` exactly when `code` is [`StatusCode::Ok`], `data` is set and
/// `error` is not; failures carry `error` and never `data`.
///
/// # Examples
/// ```
/// use nice_clone::response::ResponseEnvelope;
/// use nice_clone::status::StatusCode;
///
/// let ok = ResponseEnvelope::ok("done");
/// assert!(ok.ok && ok.data.is_some() && ok.error.is_none());
///
/// let failed: ResponseEnvelope<()> = ResponseEnvelope::error(StatusCode::AlreadyExists, "taken");
/// assert!(!failed.ok && failed.data.is_none() && failed.error.is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope<T> {
    pub ok: bool,
    pub code: StatusCode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorInfo>,
}

impl<T> ResponseEnvelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            ok: true,
            code: StatusCode::Ok,
            message: None,
            data: Some(data),
            error: None,
        }
    }

    /// Builds a failure envelope. `code` must not be [`StatusCode::Ok`]; it is
    /// downgraded to [`StatusCode::UnknownError`] if it is.
    pub fn error(code: StatusCode, message: impl Into<String>) -> Self {
        let code = if code.is_ok() {
            StatusCode::UnknownError
        } else {
            code
        };
        Self {
            ok: false,
            code,
            message: Some(message.into()),
            data: None,
            error: Some(ErrorInfo {
                kind: code.name().to_string(),
                trace_id: None,
            }),
        }
    }

    /// Classifies an [`AppError`] into a failure envelope with its public message.
    pub fn from_error(error: &AppError) -> Self {
        Self::error(error.status_code(), error.public_message())
    }

    /// Wraps a result: `Ok` becomes a success envelope, `Err` is classified.
    pub fn from_result(result: Result<T, AppError>) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(e) => Self::from_error(&e),
        }
    }

    /// Attaches the correlation id to the failure descriptor, if any.
    pub fn with_trace_id(mut self, trace_id: Option<String>) -> Self {
        if let Some(info) = self.error.as_mut() {
            info.trace_id = trace_id;
        }
        self
    }
}

// Transport status is always 200; callers branch on `ok`/`code`.
impl<T: Serialize> IntoResponse for ResponseEnvelope<T> {
    fn into_response(self) -> Response {
        (HttpStatus::OK, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::GitError;
    use serde_json::{json, Value};
    use std::path::PathBuf;
    use std::time::Duration;

    #[test]
    fn test_ok_envelope_shape() {
        let env = ResponseEnvelope::ok(json!({"dirName": "nice"}));
        let value = serde_json::to_value(&env).unwrap();
        assert_eq!(
            value,
            json!({"ok": true, "code": 0, "data": {"dirName": "nice"}})
        );
    }

    #[test]
    fn test_error_envelope_shape() {
        let env: ResponseEnvelope<()> =
            ResponseEnvelope::error(StatusCode::InvalidArgument, "missing url")
                .with_trace_id(Some("abc".into()));
        let value = serde_json::to_value(&env).unwrap();
        assert_eq!(
            value,
            json!({
                "ok": false,
                "code": 1001,
                "message": "missing url",
                "error": {"kind": "INVALID_ARGUMENT", "traceId": "abc"}
            })
        );
    }

    #[test]
    fn test_error_with_ok_code_is_downgraded() {
        let env: ResponseEnvelope<()> = ResponseEnvelope::error(StatusCode::Ok, "odd");
        assert!(!env.ok);
        assert_eq!(env.code, StatusCode::UnknownError);
    }

    #[test]
    fn test_from_result_classifies_errors() {
        let result: Result<(), AppError> = Err(AppError::CloneFailed {
            url: "https://example.com/r.git".into(),
            source: GitError::TimedOut(Duration::from_secs(600)),
        });
        let env = ResponseEnvelope::from_result(result);
        assert!(!env.ok);
        assert_eq!(env.code, StatusCode::CloneFailed);
        assert_eq!(
            env.message.as_deref(),
            Some("clone failed: clone timed out after 600s without progress")
        );

        let result: Result<(), AppError> = Err(AppError::AlreadyExists {
            path: PathBuf::from("/x"),
        });
        assert_eq!(
            ResponseEnvelope::from_result(result).code,
            StatusCode::AlreadyExists
        );
    }

    #[test]
    fn test_success_ignores_trace_id() {
        let env = ResponseEnvelope::ok(1).with_trace_id(Some("id".into()));
        let value: Value = serde_json::to_value(&env).unwrap();
        assert!(value.get("error").is_none());
    }
}
