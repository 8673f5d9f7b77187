//! Demonstration data loaded into a fresh store at startup.

use crate::book::{Book, NewBook};
use crate::error::Result;
use crate::store::BookStore;

/// The two books every demo instance starts with.
#[must_use]
pub fn demo_books() -> Vec<NewBook> {
    vec![
        NewBook::new("Clean Architecture", "Robert C. Martin").with_year(2017),
        NewBook::new("The Go Programming Language", "Alan A. A. Donovan").with_year(2015),
    ]
}

/// Create the [`demo_books`] in `store`, each under a fresh id.
///
/// # Errors
///
/// Returns [`StoreError::Poisoned`](crate::StoreError::Poisoned) if the lock
/// is poisoned.
pub fn seed_demo_books(store: &BookStore) -> Result<Vec<Book>> {
    demo_books()
        .into_iter()
        .map(|payload| store.create(payload))
        .collect()
}
