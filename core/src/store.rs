//! Concurrent in-memory book storage.
//!
//! [`BookStore`] owns every [`Book`]. One `RwLock` guards the whole map:
//! `list`, `page`, `get` and `exists` take it shared, every mutation takes it
//! exclusively. No I/O happens while the lock is held.
//!
//! Operations that check for a book and then mutate it (`update`, `replace`,
//! `remove`) do both inside a single exclusive critical section, so a
//! concurrent delete can never land between the check and the write.
//!
//! Books are listed in creation order. Each entry carries a sequence number
//! assigned on first insert; overwriting an entry keeps its position.

use crate::book::{new_book_id, Book, BookPatch, NewBook};
use crate::error::{Result, StoreError};
use crate::pagination::{paginate, Page, PageRequest};
use crate::validation::validate_payload;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Debug)]
struct Entry {
    seq: u64,
    book: Book,
}

#[derive(Debug, Default)]
struct Shelf {
    entries: HashMap<String, Entry>,
    next_seq: u64,
}

impl Shelf {
    /// Insert or overwrite, forcing the stored id to match the key.
    fn put(&mut self, id: &str, mut book: Book) {
        id.clone_into(&mut book.id);
        if let Some(entry) = self.entries.get_mut(id) {
            entry.book = book;
            return;
        }
        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries.insert(id.to_owned(), Entry { seq, book });
    }

    fn ordered(&self) -> Vec<&Entry> {
        let mut entries: Vec<&Entry> = self.entries.values().collect();
        entries.sort_unstable_by_key(|entry| entry.seq);
        entries
    }
}

/// Thread-safe CRUD over books keyed by id.
///
/// Cloning is cheap and every clone shares the same map, so one store can be
/// handed to each request handler.
///
/// # Example
///
/// ```
/// use bookshelf_core::{BookPatch, BookStore, NewBook};
///
/// # fn main() -> Result<(), bookshelf_core::StoreError> {
/// let store = BookStore::new();
/// let book = store.create(NewBook::new("Emma", "Jane Austen"))?;
///
/// let updated = store.update(&book.id, BookPatch::year(1815))?;
/// assert_eq!(updated.year, Some(1815));
/// assert_eq!(updated.title, "Emma");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct BookStore {
    shelf: Arc<RwLock<Shelf>>,
}

impl BookStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Shelf>> {
        self.shelf.read().map_err(|_| StoreError::Poisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Shelf>> {
        self.shelf.write().map_err(|_| StoreError::Poisoned)
    }

    /// Snapshot of every book, in creation order.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Poisoned`] if the lock is poisoned.
    pub fn list(&self) -> Result<Vec<Book>> {
        let shelf = self.read()?;
        Ok(shelf
            .ordered()
            .into_iter()
            .map(|entry| entry.book.clone())
            .collect())
    }

    /// One page of books, in creation order.
    ///
    /// Only the books on the requested page are cloned.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Poisoned`] if the lock is poisoned.
    pub fn page(&self, request: PageRequest) -> Result<Page<Book>> {
        let shelf = self.read()?;
        Ok(paginate(shelf.ordered(), request).map(|entry| entry.book.clone()))
    }

    /// Look up a book by id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no book has this id.
    pub fn get(&self, id: &str) -> Result<Book> {
        self.read()?
            .entries
            .get(id)
            .map(|entry| entry.book.clone())
            .ok_or_else(|| StoreError::NotFound(id.to_owned()))
    }

    /// Whether a book with this id exists.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Poisoned`] if the lock is poisoned.
    pub fn exists(&self, id: &str) -> Result<bool> {
        Ok(self.read()?.entries.contains_key(id))
    }

    /// Insert or overwrite the book stored at `id`.
    ///
    /// The stored book's `id` field is set to `id`, whatever it was before.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Poisoned`] if the lock is poisoned.
    pub fn put(&self, id: &str, book: Book) -> Result<()> {
        self.write()?.put(id, book);
        Ok(())
    }

    /// Remove the book at `id`, reporting whether one was removed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Poisoned`] if the lock is poisoned.
    pub fn delete(&self, id: &str) -> Result<bool> {
        Ok(self.write()?.entries.remove(id).is_some())
    }

    /// Validate a payload and store it under a freshly generated id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Validation`] if the payload is incomplete.
    pub fn create(&self, payload: NewBook) -> Result<Book> {
        validate_payload(&payload)?;
        let book = Book::from_payload(new_book_id(), payload);
        self.write()?.put(&book.id.clone(), book.clone());
        Ok(book)
    }

    /// Merge a partial update into an existing book.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no book has this id.
    pub fn update(&self, id: &str, patch: BookPatch) -> Result<Book> {
        let mut shelf = self.write()?;
        let entry = shelf
            .entries
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_owned()))?;
        entry.book.apply(patch);
        Ok(entry.book.clone())
    }

    /// Replace every field of an existing book except its id.
    ///
    /// The payload is validated before the existence check.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Validation`] if the payload is incomplete, or
    /// [`StoreError::NotFound`] if no book has this id.
    pub fn replace(&self, id: &str, payload: NewBook) -> Result<Book> {
        validate_payload(&payload)?;
        let book = Book::from_payload(id, payload);

        let mut shelf = self.write()?;
        if !shelf.entries.contains_key(id) {
            return Err(StoreError::NotFound(id.to_owned()));
        }
        shelf.put(id, book.clone());
        Ok(book)
    }

    /// Remove an existing book.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no book has this id.
    pub fn remove(&self, id: &str) -> Result<()> {
        if self.delete(id)? {
            Ok(())
        } else {
            Err(StoreError::NotFound(id.to_owned()))
        }
    }

    /// Number of stored books.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Poisoned`] if the lock is poisoned.
    pub fn len(&self) -> Result<usize> {
        Ok(self.read()?.entries.len())
    }

    /// Whether the store holds no books.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Poisoned`] if the lock is poisoned.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.read()?.entries.is_empty())
    }
}
