//! Routing module for the meal planner application

use crate::error::AppError;
use crate::state::SharedState;
use axum::{
    extract::Request,
    http::{header::HeaderName, Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Router,
};
use std::time::Instant;
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Headers browsers may send on cross-origin requests
const ALLOWED_HEADERS: [&str; 9] = [
    "x-csrf-token",
    "x-requested-with",
    "accept",
    "accept-version",
    "content-length",
    "content-md5",
    "content-type",
    "date",
    "x-api-version",
];

/// Creates and configures the application router with all routes and middleware
///
/// Routes are served both at the root and under `/api`.
pub fn create_app_router(state: SharedState) -> Router {
    Router::new()
        .merge(api_routes())
        .nest("/api", api_routes())
        .fallback(fallback)
        .layer(axum::middleware::from_fn(log_requests))
        .layer(cors_layer())
        .with_state(state)
}

fn api_routes() -> Router<SharedState> {
    Router::new()
        .merge(crate::recipes::routes())
        .merge(crate::plans::routes())
}

/// Any origin, with credentials. The origin is mirrored back because
/// browsers reject a literal `*` alongside credentials.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::OPTIONS,
            Method::PATCH,
            Method::DELETE,
            Method::POST,
            Method::PUT,
        ])
        .allow_headers(ALLOWED_HEADERS.map(HeaderName::from_static))
}

/// Middleware: log every request with its outcome
async fn log_requests(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().clone();
    let started = Instant::now();

    let res = next.run(req).await;

    let status = res.status().as_u16();
    let elapsed_ms = started.elapsed().as_millis() as u64;
    if res.status().is_success() {
        tracing::info!(%method, %uri, status, elapsed_ms, "request");
    } else {
        tracing::warn!(%method, %uri, status, elapsed_ms, "request failed");
    }
    res
}

/// Handles methods a route does not support. Bare OPTIONS requests (without
/// the CORS preflight headers) get an empty 200.
pub async fn method_fallback(method: Method) -> Response {
    if method == Method::OPTIONS {
        return StatusCode::OK.into_response();
    }
    AppError::MethodNotAllowed.into_response()
}

/// Handles paths no route matches.
async fn fallback(method: Method) -> Response {
    if method == Method::OPTIONS {
        return StatusCode::OK.into_response();
    }
    AppError::RouteNotFound.into_response()
}
