//! Errors produced by [`BookStore`](crate::BookStore) operations.

use crate::validation::ValidationError;
use thiserror::Error;

/// Errors that can occur during store operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No book is stored under the requested id.
    #[error("book not found")]
    NotFound(String),

    /// The payload failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A writer panicked while holding the store lock.
    ///
    /// The map may be inconsistent, so the store refuses further access.
    #[error("book store lock poisoned")]
    Poisoned,
}

impl StoreError {
    /// Whether this error means the id was unknown.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_hides_id() {
        let err = StoreError::NotFound("abc".to_string());
        assert_eq!(err.to_string(), "book not found");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_validation_is_transparent() {
        let err = StoreError::from(ValidationError::MissingAuthor);
        assert_eq!(err.to_string(), "author is required");
        assert!(!err.is_not_found());
    }
}
