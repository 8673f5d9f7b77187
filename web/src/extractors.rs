//! Custom Axum extractors.
//!
//! This module contains extractors for the books routes:
//! - `BookId`: the `:id` path segment, rejected as a JSON 404
//! - `Pagination`: `page`/`limit` from the query string, never rejected
//!
//! # Examples
//!
//! ```ignore
//! use bookshelf_web::extractors::{BookId, Pagination};
//!
//! async fn handler(BookId(id): BookId, Pagination(request): Pagination) -> String {
//!     format!("{id} page {}", request.page())
//! }
//! ```

use crate::error::AppError;
use axum::{
    async_trait,
    extract::{FromRequestParts, Path, Query},
    http::request::Parts,
};
use bookshelf_core::PageRequest;
use std::convert::Infallible;

/// Book identifier taken from the `:id` path segment.
///
/// A segment that cannot be decoded (for example invalid UTF-8) can never
/// name a stored book, so it is answered like any other unknown id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookId(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for BookId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<String>::from_request_parts(parts, state).await?;
        Ok(Self(id))
    }
}

/// Pagination parameters from the query string.
///
/// Only the first occurrence of `page` and `limit` counts. Missing,
/// malformed or out-of-range values fall back to the defaults, and other
/// parameters are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pagination(pub PageRequest);

#[async_trait]
impl<S> FromRequestParts<S> for Pagination
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let pairs = Query::<Vec<(String, String)>>::try_from_uri(&parts.uri)
            .map(|Query(pairs)| pairs)
            .unwrap_or_default();

        let first = |key: &str| {
            pairs
                .iter()
                .find(|(name, _)| name == key)
                .map(|(_, value)| value.as_str())
        };

        Ok(Self(PageRequest::parse(first("page"), first("limit"))))
    }
}
