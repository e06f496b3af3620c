//! The exception boundary of the HTTP surface.
//!
//! Everything that can go wrong on the way in or out ends up here: classified
//! orchestrator errors, unreadable bodies, unknown routes and panics. Each is
//! logged with the request id and turned into a failure envelope; transport
//! status stays 200 throughout.

use crate::errors::AppError;
use crate::response::ResponseEnvelope;
use crate::status::StatusCode;
use axum::extract::rejection::JsonRejection;
use axum::extract::Request;
use axum::http::{HeaderValue, Method, Uri};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Extension;
use std::any::Any;
use tower_http::request_id::{MakeRequestId, RequestId};

/// Request id as a plain string, if the request carries one.
pub(crate) fn trace_id(request_id: &Option<Extension<RequestId>>) -> Option<String> {
    request_id
        .as_ref()
        .and_then(|Extension(id)| id.header_value().to_str().ok())
        .map(str::to_owned)
}

/// Wraps an orchestrator outcome, logging failures with their full detail.
pub(crate) fn respond<T>(
    result: Result<T, AppError>,
    trace_id: Option<String>,
) -> ResponseEnvelope<T> {
    if let Err(e) = &result {
        log_error(e, trace_id.as_deref());
    }
    ResponseEnvelope::from_result(result).with_trace_id(trace_id)
}

fn log_error(error: &AppError, trace_id: Option<&str>) {
    let trace_id = trace_id.unwrap_or("-");
    let code = error.status_code().as_u32();
    if error.is_internal() {
        tracing::error!(trace_id, code, error = ?error, "Unclassified internal error");
    } else {
        tracing::warn!(trace_id, code, error = %error, "Request failed");
    }
}

/// Maps an unreadable JSON body (wrong content type, malformed JSON, wrong
/// field types) to `InvalidArgument`.
pub(crate) fn rejection_envelope<T>(
    rejection: JsonRejection,
    trace_id: Option<String>,
) -> ResponseEnvelope<T> {
    let error = AppError::InvalidArgument(format!("invalid request body: {}", rejection.body_text()));
    respond(Err(error), trace_id)
}

/// Fallback for unknown routes and unsupported methods.
pub(crate) async fn not_found(
    method: Method,
    uri: Uri,
    request_id: Option<Extension<RequestId>>,
) -> ResponseEnvelope<()> {
    let error = AppError::NotFound(format!("{} {}", method, uri.path()));
    respond(Err(error), trace_id(&request_id))
}

/// Marks a response produced by [`handle_panic`].
#[derive(Debug, Clone, Copy)]
struct CaughtPanic;

fn panic_envelope(trace_id: Option<String>) -> ResponseEnvelope<()> {
    ResponseEnvelope::error(StatusCode::UnknownError, "internal server error").with_trace_id(trace_id)
}

/// Converts a panic inside a handler into an `UnknownError` envelope.
///
/// The panic hook has no access to the request, so the envelope carries no
/// trace id yet; [`trace_caught_panics`] adds it on the way out.
pub(crate) fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic payload");
    tracing::error!(panic = detail, "Handler panicked");
    let mut response = panic_envelope(None).into_response();
    response.extensions_mut().insert(CaughtPanic);
    response
}

/// Rewrites envelopes built by [`handle_panic`] to carry the request id.
pub(crate) async fn trace_caught_panics(request: Request, next: Next) -> Response {
    let trace_id = request
        .extensions()
        .get::<RequestId>()
        .and_then(|id| id.header_value().to_str().ok())
        .map(str::to_owned);
    let response = next.run(request).await;
    if response.extensions().get::<CaughtPanic>().is_none() {
        return response;
    }
    tracing::error!(
        trace_id = trace_id.as_deref().unwrap_or("-"),
        code = StatusCode::UnknownError.as_u32(),
        "Request aborted by a panic"
    );
    panic_envelope(trace_id).into_response()
}

/// Treats a blank `x-request-id` header as absent so a fresh id is generated.
pub(crate) async fn drop_blank_request_id(mut request: Request) -> Request {
    let blank = request
        .headers()
        .get(crate::constants::REQUEST_ID_HEADER)
        .is_some_and(|value| value.as_bytes().iter().all(u8::is_ascii_whitespace));
    if blank {
        request
            .headers_mut()
            .remove(crate::constants::REQUEST_ID_HEADER);
    }
    request
}

/// Generates UUID v4 request ids for requests without an `x-request-id` header.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct MakeTraceId;

impl MakeRequestId for MakeTraceId {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        let id = uuid::Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}
