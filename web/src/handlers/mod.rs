//! HTTP request handlers.
//!
//! This module contains all HTTP handlers organized by domain.

pub mod books;
pub mod docs;
pub mod health;

pub use books::{create_book, delete_book, get_book, list_books, replace_book, update_book};
pub use docs::openapi_json;
pub use health::health_check;
