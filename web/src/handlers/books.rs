//! Book API endpoints.
//!
//! Provides CRUD operations for books, mounted under `/api`:
//! - GET /api/books - List books with pagination
//! - GET /api/books/:id - Get one book
//! - POST /api/books - Create a book
//! - PATCH /api/books/:id - Partially update a book
//! - PUT /api/books/:id - Replace a book
//! - DELETE /api/books/:id - Delete a book
//!
//! Bodies are taken as `Result<Json<_>, JsonRejection>` rather than `Json<_>`
//! so each handler decides whether a malformed body or an unknown id is
//! reported first. Ids come through [`BookId`], which answers an undecodable
//! segment with the same 404 as an unknown id.

// Axum handlers must be async even when the store access is synchronous.
#![allow(clippy::unused_async)]

use crate::error::AppError;
use crate::extractors::{BookId, Pagination};
use crate::metrics;
use crate::WebResult;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use bookshelf_core::{Book, BookPatch, BookStore, NewBook, Page, StoreError};

// ============================================================================
// Handlers
// ============================================================================

/// List books with pagination.
///
/// Never fails on bad input: invalid `page`/`limit` values fall back to the
/// defaults, and only the first occurrence of each counts.
///
/// # Example
///
/// ```bash
/// curl "http://localhost:3000/api/books?page=2&limit=10"
/// # {"data":[...],"page":2,"limit":10,"total":12}
/// ```
#[tracing::instrument(skip_all)]
pub async fn list_books(
    State(store): State<BookStore>,
    Pagination(request): Pagination,
) -> WebResult<Json<Page<Book>>> {
    let page = store.page(request)?;
    tracing::debug!(
        page = page.page,
        limit = page.limit,
        returned = page.data.len(),
        total = page.total,
        "listed books"
    );
    Ok(Json(page))
}

/// Get a book by id.
///
/// # Example
///
/// ```bash
/// curl http://localhost:3000/api/books/0b5e6c1e-8f3a-4a57-9d2e-3f1c7a1f2b44
/// ```
#[tracing::instrument(skip_all, fields(book_id = %id))]
pub async fn get_book(
    State(store): State<BookStore>,
    BookId(id): BookId,
) -> WebResult<Json<Book>> {
    Ok(Json(store.get(&id)?))
}

/// Create a book. The id is generated by the server.
///
/// # Example
///
/// ```bash
/// curl -X POST http://localhost:3000/api/books \
///   -H "Content-Type: application/json" \
///   -d '{"title": "Dune", "author": "Frank Herbert", "year": 1965}'
/// ```
#[tracing::instrument(skip_all)]
pub async fn create_book(
    State(store): State<BookStore>,
    body: Result<Json<NewBook>, JsonRejection>,
) -> WebResult<(StatusCode, Json<Book>)> {
    let Json(payload) = body?;
    let book = store.create(payload)?;

    tracing::info!(book_id = %book.id, "book created");
    metrics::record_book_created();

    Ok((StatusCode::CREATED, Json(book)))
}

/// Partially update a book.
///
/// Only non-empty strings and non-zero years in the body overwrite the
/// stored fields. An unknown id is reported before a malformed body.
///
/// # Example
///
/// ```bash
/// curl -X PATCH http://localhost:3000/api/books/<id> \
///   -H "Content-Type: application/json" \
///   -d '{"year": 1966}'
/// ```
#[tracing::instrument(skip_all, fields(book_id = %id))]
pub async fn update_book(
    State(store): State<BookStore>,
    BookId(id): BookId,
    body: Result<Json<BookPatch>, JsonRejection>,
) -> WebResult<Json<Book>> {
    let patch = match body {
        Ok(Json(patch)) => patch,
        Err(rejection) => {
            if !store.exists(&id)? {
                return Err(StoreError::NotFound(id).into());
            }
            return Err(rejection.into());
        }
    };

    let book = store.update(&id, patch)?;
    tracing::info!(book_id = %book.id, "book updated");
    metrics::record_book_updated("patch");

    Ok(Json(book))
}

/// Replace a book, keeping only its id.
///
/// A malformed or incomplete body is reported before an unknown id.
///
/// # Example
///
/// ```bash
/// curl -X PUT http://localhost:3000/api/books/<id> \
///   -H "Content-Type: application/json" \
///   -d '{"title": "Dune Messiah", "author": "Frank Herbert", "year": 1969}'
/// ```
#[tracing::instrument(skip_all, fields(book_id = %id))]
pub async fn replace_book(
    State(store): State<BookStore>,
    BookId(id): BookId,
    body: Result<Json<NewBook>, JsonRejection>,
) -> WebResult<Json<Book>> {
    let Json(payload) = body?;
    let book = store.replace(&id, payload)?;

    tracing::info!(book_id = %book.id, "book replaced");
    metrics::record_book_updated("replace");

    Ok(Json(book))
}

/// Delete a book.
///
/// # Example
///
/// ```bash
/// curl -X DELETE http://localhost:3000/api/books/<id>
/// ```
#[tracing::instrument(skip_all, fields(book_id = %id))]
pub async fn delete_book(
    State(store): State<BookStore>,
    BookId(id): BookId,
) -> Result<StatusCode, AppError> {
    store.remove(&id)?;

    tracing::info!(book_id = %id, "book deleted");
    metrics::record_book_deleted();

    Ok(StatusCode::NO_CONTENT)
}
