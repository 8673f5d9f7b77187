//! Application state for Axum handlers.

use axum::extract::FromRef;
use bookshelf_core::BookStore;

/// Application state shared across all HTTP handlers.
///
/// It is cloned for each request; the clone shares the underlying
/// [`BookStore`], so every handler sees the same books. Tests build one
/// state per test for isolation.
#[derive(Clone, Debug, Default)]
pub struct AppState {
    /// The book store every handler reads and writes through.
    pub store: BookStore,
}

impl AppState {
    /// Create a new application state around an existing store.
    #[must_use]
    pub const fn new(store: BookStore) -> Self {
        Self { store }
    }
}

// Lets handlers extract `State<BookStore>` directly.
impl FromRef<AppState> for BookStore {
    fn from_ref(state: &AppState) -> Self {
        state.store.clone()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use bookshelf_core::NewBook;

    #[test]
    fn test_state_is_clone() {
        // Ensure AppState implements Clone (required for Axum)
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }

    #[test]
    fn test_extracted_store_shares_books() {
        let state = AppState::default();
        let book = state.store.create(NewBook::new("T", "A")).unwrap();

        let store = BookStore::from_ref(&state);
        assert_eq!(store.get(&book.id).unwrap(), book);
    }
}
