//! Axum HTTP layer for Bookshelf.
//!
//! This crate is the imperative shell around [`bookshelf_core`]: it turns
//! HTTP requests into [`BookStore`](bookshelf_core::BookStore) calls and
//! store results into JSON responses.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │         HTTP Shell (Axum)               │  ← Routing, JSON, status codes
//! │  - Request parsing                      │  ← Panic recovery, CORS
//! │  - Response serialization               │  ← Logging, metrics
//! ├─────────────────────────────────────────┤
//! │         bookshelf-core                  │
//! │  - Book model and validation            │
//! │  - BookStore (one RwLock over a map)    │
//! │  - Pagination                           │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Request Flow
//!
//! 1. **HTTP Request** arrives at an Axum handler
//! 2. **Extract** path id, query and JSON body
//! 3. **Call** the store (validation happens there for create/replace)
//! 4. **Map** the result or [`AppError`] to a response
//!
//! # Example
//!
//! ```no_run
//! use bookshelf_core::BookStore;
//! use bookshelf_web::{build_router, AppState};
//!
//! # async fn run() -> Result<(), std::io::Error> {
//! let app = build_router(AppState::new(BookStore::new()));
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod router;
pub mod state;

// Re-export key types for convenience
pub use error::AppError;
pub use extractors::{BookId, Pagination};
pub use middleware::{request_logging_layer, CORRELATION_ID_HEADER};
pub use router::{build_router, cors_layer};
pub use state::AppState;

/// Result type alias for web handlers.
pub type WebResult<T> = Result<T, AppError>;
