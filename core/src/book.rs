//! The book resource and the payloads that create or modify it.
//!
//! `year` is optional everywhere. A year of `0` is indistinguishable from an
//! absent year, so it is normalized to `None` on the way in and omitted from
//! JSON on the way out.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A book held by the [`BookStore`](crate::BookStore).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Opaque identifier assigned on creation. Never changes afterwards.
    pub id: String,
    /// Title (never empty once stored).
    pub title: String,
    /// Author (never empty once stored).
    pub author: String,
    /// Publication year, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i64>,
}

impl Book {
    /// Build a stored book from a payload and an assigned id.
    #[must_use]
    pub fn from_payload(id: impl Into<String>, payload: NewBook) -> Self {
        Self {
            id: id.into(),
            title: payload.title,
            author: payload.author,
            year: normalize_year(payload.year),
        }
    }

    /// Merge a partial update into this book.
    ///
    /// Only non-empty strings and non-zero years overwrite the stored value.
    /// The id is never touched.
    pub fn apply(&mut self, patch: BookPatch) {
        if let Some(title) = patch.title.filter(|t| !t.is_empty()) {
            self.title = title;
        }
        if let Some(author) = patch.author.filter(|a| !a.is_empty()) {
            self.author = author;
        }
        if let Some(year) = normalize_year(patch.year) {
            self.year = Some(year);
        }
    }
}

/// Body of a create or full-replace request.
///
/// Missing `title`/`author` deserialize as empty strings so that validation,
/// not the JSON decoder, reports them. An `id` field in the body is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBook {
    /// Title of the book.
    #[serde(default)]
    pub title: String,
    /// Author of the book.
    #[serde(default)]
    pub author: String,
    /// Publication year. `0` means unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i64>,
}

impl NewBook {
    /// Create a payload without a year.
    #[must_use]
    pub fn new(title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            year: None,
        }
    }

    /// Set the publication year.
    #[must_use]
    pub const fn with_year(mut self, year: i64) -> Self {
        self.year = Some(year);
        self
    }
}

/// Body of a partial update request.
///
/// Every field is optional; absent, empty and zero values leave the stored
/// field as it was.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookPatch {
    /// New title, if any.
    #[serde(default)]
    pub title: Option<String>,
    /// New author, if any.
    #[serde(default)]
    pub author: Option<String>,
    /// New year, if any.
    #[serde(default)]
    pub year: Option<i64>,
}

impl BookPatch {
    /// A patch touching only the title.
    #[must_use]
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    /// A patch touching only the author.
    #[must_use]
    pub fn author(author: impl Into<String>) -> Self {
        Self {
            author: Some(author.into()),
            ..Self::default()
        }
    }

    /// A patch touching only the year.
    #[must_use]
    pub fn year(year: i64) -> Self {
        Self {
            year: Some(year),
            ..Self::default()
        }
    }
}

/// Generate a fresh book id (random UUID v4, hyphenated).
#[must_use]
pub fn new_book_id() -> String {
    Uuid::new_v4().to_string()
}

const fn normalize_year(year: Option<i64>) -> Option<i64> {
    match year {
        Some(0) | None => None,
        Some(y) => Some(y),
    }
}
