//! Payload validation for create and full-replace requests.
//!
//! Partial updates are not validated: they only overwrite the fields they
//! carry with non-empty values.

use crate::book::NewBook;
use thiserror::Error;

/// A payload rejected before it reaches the store.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// `title` was missing or empty.
    #[error("title is required")]
    MissingTitle,

    /// `author` was missing or empty.
    #[error("author is required")]
    MissingAuthor,
}

/// Check that a payload carries the required fields.
///
/// Title is checked before author, so a payload missing both reports the
/// title.
///
/// # Errors
///
/// Returns the first [`ValidationError`] found.
pub fn validate_payload(payload: &NewBook) -> Result<(), ValidationError> {
    if payload.title.is_empty() {
        return Err(ValidationError::MissingTitle);
    }
    if payload.author.is_empty() {
        return Err(ValidationError::MissingAuthor);
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_payload() {
        assert_eq!(validate_payload(&NewBook::new("T", "A")), Ok(()));
    }

    #[test]
    fn test_missing_title() {
        let err = validate_payload(&NewBook::new("", "A")).unwrap_err();
        assert_eq!(err, ValidationError::MissingTitle);
        assert_eq!(err.to_string(), "title is required");
    }

    #[test]
    fn test_missing_author() {
        let err = validate_payload(&NewBook::new("T", "")).unwrap_err();
        assert_eq!(err.to_string(), "author is required");
    }

    #[test]
    fn test_title_reported_first() {
        assert_eq!(
            validate_payload(&NewBook::default()),
            Err(ValidationError::MissingTitle)
        );
    }
}
