// src/web/handlers.rs

use super::boundary::{rejection_envelope, respond, trace_id};
use super::openapi::{openapi_document, DOCS_PAGE};
use super::AppState;
use crate::response::ResponseEnvelope;
use crate::service::{CloneOptions, CloneRequest, CloneResult};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, State};
use axum::response::Html;
use axum::Extension;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tower_http::request_id::RequestId;

/// Payload of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
}

/// `POST /git/clone`
pub(crate) async fn clone_handler(
    State(state): State<Arc<AppState>>,
    request_id: Option<Extension<RequestId>>,
    payload: Result<Json<CloneRequest>, JsonRejection>,
) -> ResponseEnvelope<CloneResult> {
    let trace_id = trace_id(&request_id);
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejection_envelope(rejection, trace_id),
    };

    let result = state
        .service
        .clone_repo(request, CloneOptions::default())
        .await;
    respond(result, trace_id)
}

/// `GET /health`
pub(crate) async fn health_handler() -> ResponseEnvelope<HealthStatus> {
    ResponseEnvelope::ok(HealthStatus {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /docs/json`
pub(crate) async fn openapi_handler() -> Json<Value> {
    Json(openapi_document())
}

/// `GET /docs`
pub(crate) async fn docs_page_handler() -> Html<&'static str> {
    Html(DOCS_PAGE)
}
