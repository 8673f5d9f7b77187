//! # Bookshelf Core
//!
//! Domain types and the concurrent in-memory store behind the Bookshelf API.
//!
//! This crate has no knowledge of HTTP. It provides:
//!
//! - [`Book`], [`NewBook`] and [`BookPatch`]: the resource and its payloads
//! - [`validation`]: payload validation applied on create and full replace
//! - [`BookStore`]: a map from generated ids to books guarded by one
//!   reader/writer lock
//! - [`pagination`]: page/limit clamping and slicing
//! - [`seed`]: the demonstration data loaded at startup
//!
//! ## Example
//!
//! ```
//! use bookshelf_core::{BookStore, NewBook};
//!
//! # fn main() -> Result<(), bookshelf_core::StoreError> {
//! let store = BookStore::new();
//! let book = store.create(NewBook::new("Dune", "Frank Herbert").with_year(1965))?;
//!
//! assert_eq!(store.get(&book.id)?, book);
//! assert!(store.delete(&book.id)?);
//! assert!(!store.exists(&book.id)?);
//! # Ok(())
//! # }
//! ```

pub mod book;
pub mod error;
pub mod pagination;
pub mod seed;
pub mod store;
pub mod validation;

pub use book::{Book, BookPatch, NewBook};
pub use error::{Result, StoreError};
pub use pagination::{Page, PageRequest};
pub use store::BookStore;
pub use validation::{validate_payload, ValidationError};
