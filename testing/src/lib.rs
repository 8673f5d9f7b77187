//! # Bookshelf Testing
//!
//! Testing utilities for the Bookshelf crates.
//!
//! This crate provides:
//! - Fixtures: pre-filled stores and sample payloads
//! - Property-based testing strategies for books and patches
//!
//! ## Example
//!
//! ```
//! use bookshelf_testing::fixtures::store_with_titles;
//!
//! let (store, books) = store_with_titles(&["one", "two"]);
//! assert_eq!(store.list().ok(), Some(books));
//! ```

/// Fixtures for tests that need a populated store.
pub mod fixtures {
    use bookshelf_core::{Book, BookStore, NewBook};

    /// A complete payload with a year.
    #[must_use]
    pub fn sample_payload() -> NewBook {
        NewBook::new("T", "A").with_year(2020)
    }

    /// A fresh store holding one book per title, all by the same author.
    ///
    /// Returns the created books in creation order.
    ///
    /// # Panics
    ///
    /// Panics if a title is empty (the store rejects it).
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn store_with_titles(titles: &[&str]) -> (BookStore, Vec<Book>) {
        let store = BookStore::new();
        let books = titles
            .iter()
            .map(|title| {
                store
                    .create(NewBook::new(*title, "Fixture Author"))
                    .expect("fixture titles must be non-empty")
            })
            .collect();
        (store, books)
    }

    /// A fresh store holding `count` books titled `book-0`, `book-1`, ...
    #[must_use]
    pub fn store_with_books(count: usize) -> (BookStore, Vec<Book>) {
        let titles: Vec<String> = (0..count).map(|i| format!("book-{i}")).collect();
        let refs: Vec<&str> = titles.iter().map(String::as_str).collect();
        store_with_titles(&refs)
    }
}

/// Property-based testing strategies using proptest.
pub mod properties {
    use bookshelf_core::{BookPatch, NewBook};
    use proptest::prelude::*;

    /// Non-empty strings usable as a title or author.
    pub fn non_empty_text() -> impl Strategy<Value = String> {
        "[A-Za-z0-9 .,'-]{1,40}"
    }

    /// A year, including `0` (which means unset).
    pub fn any_year() -> impl Strategy<Value = Option<i64>> {
        prop_oneof![Just(None), Just(Some(0)), (-3000i64..3000).prop_map(Some)]
    }

    /// Payloads that pass validation.
    pub fn valid_new_book() -> impl Strategy<Value = NewBook> {
        (non_empty_text(), non_empty_text(), any_year()).prop_map(|(title, author, year)| {
            NewBook {
                title,
                author,
                year,
            }
        })
    }

    /// Payloads with at least one required field empty.
    pub fn invalid_new_book() -> impl Strategy<Value = NewBook> {
        prop_oneof![
            (non_empty_text(), any_year()).prop_map(|(author, year)| NewBook {
                title: String::new(),
                author,
                year,
            }),
            (non_empty_text(), any_year()).prop_map(|(title, year)| NewBook {
                title,
                author: String::new(),
                year,
            }),
        ]
    }

    /// Arbitrary partial updates, including empty strings and zero years.
    pub fn any_patch() -> impl Strategy<Value = BookPatch> {
        let text = prop_oneof![Just(None), Just(Some(String::new())), non_empty_text().prop_map(Some)];
        (text.clone(), text, any_year()).prop_map(|(title, author, year)| BookPatch {
            title,
            author,
            year,
        })
    }
}

// Re-export commonly used items
pub use fixtures::{sample_payload, store_with_books, store_with_titles};
