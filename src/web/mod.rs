// src/web/mod.rs

//! HTTP surface: `POST /git/clone`, `GET /health`, `GET /docs` and `GET /docs/json`.

use crate::config::Config;
use crate::git::Git2Client;
use crate::service::CloneService;
use axum::body::Body;
use axum::http::Request;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::request_id::{PropagateRequestIdLayer, RequestId, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use tracing::Span;

mod boundary;
mod handlers;
mod openapi;

pub use handlers::HealthStatus;
pub use openapi::openapi_document;

// --- Shared State ---
pub(crate) struct AppState {
    service: Arc<CloneService>,
}

/// Builds the router around an existing orchestrator.
///
/// Unknown routes and unsupported methods resolve to `NotFound` envelopes.
/// Every response echoes the request's `x-request-id`, or a generated one.
pub fn create_router(service: Arc<CloneService>) -> Router {
    let state = Arc::new(AppState { service });

    let router = Router::new()
        .route(
            "/git/clone",
            post(handlers::clone_handler).fallback(boundary::not_found),
        )
        .route(
            "/health",
            get(handlers::health_handler).fallback(boundary::not_found),
        )
        .route(
            "/docs",
            get(handlers::docs_page_handler).fallback(boundary::not_found),
        )
        .route(
            "/docs/json",
            get(handlers::openapi_handler).fallback(boundary::not_found),
        )
        .fallback(boundary::not_found)
        .with_state(state);
    with_middleware(router)
}

/// Request id, tracing and panic handling shared by every route.
pub(crate) fn with_middleware(router: Router) -> Router {
    let middleware = ServiceBuilder::new()
        .layer(axum::middleware::map_request(boundary::drop_blank_request_id))
        .layer(SetRequestIdLayer::x_request_id(boundary::MakeTraceId))
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(axum::middleware::from_fn(boundary::trace_caught_panics))
        .layer(CatchPanicLayer::custom(boundary::handle_panic));
    router.layer(middleware)
}

fn make_request_span(request: &Request<Body>) -> Span {
    let request_id = request
        .extensions()
        .get::<RequestId>()
        .and_then(|id| id.header_value().to_str().ok())
        .unwrap_or("-");
    tracing::info_span!(
        "request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = %request_id,
    )
}

// --- Server Startup ---
pub async fn start_server(config: Config) -> anyhow::Result<()> {
    let service = Arc::new(CloneService::new(&config, Arc::new(Git2Client::new())));
    let app = create_router(service);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    let addr = listener.local_addr()?;
    tracing::info!(
        %addr,
        base_dir = %config.base_dir.display(),
        "nice-clone listening"
    );
    println!("nice-clone running at http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
