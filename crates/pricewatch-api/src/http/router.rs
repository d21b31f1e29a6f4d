//! Axum router configuration with middleware.
//!
//! Middleware: CORS, request tracing, panic recovery.

use std::any::Any as PanicPayload;

use axum::Router;
use axum::http::{Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::Span;

use crate::http::extractors::session::SESSION_HEADER;
use crate::http::handlers;
use crate::state::AppState;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(
            "/products/",
            get(handlers::product::list_products).post(handlers::product::create_product),
        )
        .route(
            "/products/{product_id}",
            delete(handlers::product::delete_product),
        )
        .route(
            "/products/{product_id}/price-history",
            get(handlers::product::price_history),
        )
        .route("/health", get(health_check))
        .layer(CatchPanicLayer::custom(panic_response as fn(_) -> _))
        .layer(cors)
        .layer(TraceLayer::new_for_http().make_span_with(request_span::<axum::body::Body>))
        .with_state(state)
}

/// Request span carrying the route and the caller, so failures logged while
/// handling the request keep that context.
fn request_span<B>(request: &Request<B>) -> Span {
    let session = request
        .headers()
        .get(SESSION_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-");
    tracing::info_span!(
        "request",
        method = %request.method(),
        uri = %request.uri(),
        session = %session,
    )
}

fn panic_response(payload: Box<dyn PanicPayload + Send>) -> Response {
    let message = payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string());
    tracing::error!(panic = %message, "handler panicked");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        axum::Json(serde_json::json!({ "detail": "Internal server error" })),
    )
        .into_response()
}

/// GET /health - Liveness check (no session required).
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
