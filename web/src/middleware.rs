//! Request logging and correlation for every HTTP request.
//!
//! [`request_logging_layer`] wraps the router so that each request:
//!
//! 1. gets a correlation ID (from `X-Correlation-ID`, or a new UUID v4)
//! 2. runs inside an `http_request` span carrying that ID, method and path
//! 3. is logged once on completion with its status and latency
//! 4. is counted in the `http_requests_total` and
//!    `http_request_duration_seconds` metrics
//! 5. echoes the correlation ID back in the response header
//!
//! # Example
//!
//! ```ignore
//! use axum::Router;
//! use bookshelf_web::middleware::request_logging_layer;
//!
//! let app = Router::new()
//!     .route("/api/books", get(list_books))
//!     .layer(request_logging_layer());
//! ```

use axum::{extract::Request, http::HeaderValue, response::Response};
use std::task::{Context, Poll};
use std::time::Instant;
use tower::{Layer, Service};
use tracing::Instrument;
use uuid::Uuid;

/// Header name for correlation ID.
pub const CORRELATION_ID_HEADER: &str = "X-Correlation-ID";

/// Create the request logging layer.
#[must_use]
pub const fn request_logging_layer() -> RequestLoggingLayer {
    RequestLoggingLayer
}

/// Layer for request logging and correlation.
#[derive(Clone, Debug)]
pub struct RequestLoggingLayer;

impl<S> Layer<S> for RequestLoggingLayer {
    type Service = RequestLogging<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RequestLogging { inner }
    }
}

/// Middleware service produced by [`RequestLoggingLayer`].
#[derive(Clone, Debug)]
pub struct RequestLogging<S> {
    inner: S,
}

impl<S> Service<Request> for RequestLogging<S>
where
    S: Service<Request, Response = Response> + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request) -> Self::Future {
        let correlation_id = req
            .headers()
            .get(CORRELATION_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| Uuid::parse_str(s).ok())
            .unwrap_or_else(Uuid::new_v4);

        let method = req.method().clone();
        let path = req.uri().path().to_owned();
        let span = tracing::info_span!(
            "http_request",
            correlation_id = %correlation_id,
            method = %method,
            path = %path,
        );

        let started = Instant::now();
        let fut = self.inner.call(req);

        Box::pin(
            async move {
                let mut response = fut.await?;
                let elapsed = started.elapsed();
                let status = response.status();

                tracing::info!(
                    status = status.as_u16(),
                    latency_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
                    "request completed"
                );
                crate::metrics::record_request(&method, status, elapsed);

                if let Ok(header_value) = HeaderValue::from_str(&correlation_id.to_string()) {
                    response
                        .headers_mut()
                        .insert(CORRELATION_ID_HEADER, header_value);
                }

                Ok(response)
            }
            .instrument(span),
        )
    }
}
