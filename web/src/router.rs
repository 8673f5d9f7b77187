//! Router configuration for the Bookshelf API.

use crate::error::{panic_response, AppError};
use crate::handlers::{
    create_book, delete_book, get_book, health_check, list_books, openapi_json, replace_book,
    update_book,
};
use crate::middleware::request_logging_layer;
use crate::state::AppState;
use axum::{
    extract::OriginalUri,
    http::{Method, Uri},
    routing::get,
    Router,
};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Build the complete Axum router.
///
/// Routes:
/// - `GET /health`
/// - `GET /api-docs/openapi.json`
/// - `/api/books` and `/api/books/:id` (see [`crate::handlers::books`])
///
/// Unknown paths get a JSON 404 and wrong methods on a known path a JSON 405.
/// Every route is wrapped in panic recovery, HTTP tracing and request
/// logging. CORS is left to the caller (see [`cors_layer`]).
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route(
            "/books",
            get(list_books).post(create_book).fallback(method_not_allowed),
        )
        .route(
            "/books/",
            get(list_books).post(create_book).fallback(method_not_allowed),
        )
        .route(
            "/books/:id",
            get(get_book)
                .patch(update_book)
                .put(replace_book)
                .delete(delete_book)
                .fallback(method_not_allowed),
        );

    Router::new()
        .route("/health", get(health_check))
        .route("/api-docs/openapi.json", get(openapi_json))
        .nest("/api", api_routes)
        .fallback(route_not_found)
        .with_state(state)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
        .layer(request_logging_layer())
}

/// Build a CORS layer for the given origins.
///
/// An empty list allows any origin, which suits local development.
/// Origins that fail to parse as header values are skipped.
#[must_use]
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let allow_origin = if origins.is_empty() {
        AllowOrigin::from(Any)
    } else {
        let origins: Vec<_> = origins.iter().filter_map(|s| s.parse().ok()).collect();
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any)
}

#[allow(clippy::unused_async)]
async fn route_not_found(method: Method, uri: Uri) -> AppError {
    AppError::not_found(format!("cannot {method} {}", uri.path()))
}

// Nested routes see a stripped `Uri`; report the path the client sent.
#[allow(clippy::unused_async)]
async fn method_not_allowed(method: Method, OriginalUri(uri): OriginalUri) -> AppError {
    AppError::method_not_allowed(format!("cannot {method} {}", uri.path()))
}
