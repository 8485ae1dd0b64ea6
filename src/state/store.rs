//! The book repository seam
//!
//! Views never reach for a global book list; they are handed something that
//! implements `BookStore`. The SQLite catalog (`library::Library`) is the
//! real one, `MemoryStore` backs `--memory` runs and the headless tests.

use tracing::info;

use super::data::{Book, BookId, NewBook};
use crate::error::AppResult;

/// Books shipped with a fresh catalog: (title, author, read_me)
const SAMPLE_BOOKS: [(&str, &str, bool); 6] = [
    ("Ein Neues Land", "Shaun Tan", false),
    ("Bosch", "Laurinda Dixon", true),
    ("Dare to Lead", "Brené Brown", false),
    ("Blasting for Optimum Health Recipe Book", "NutriBullet", true),
    ("Drinking with the Saints", "Michael P. Foley", true),
    ("A Guide to Tea", "Adagio Teas", false),
];

pub trait BookStore {
    /// All books in manual order
    fn list(&self) -> AppResult<Vec<Book>>;

    /// Look up a single book by identity
    fn get(&self, id: BookId) -> AppResult<Option<Book>>;

    /// Validate and append a new book at the end of the manual order
    fn insert(&mut self, new_book: NewBook) -> AppResult<Book>;

    /// Overwrite every mutable field of the book with the same identity.
    /// Unknown identities are ignored.
    fn update(&mut self, book: &Book) -> AppResult<()>;

    /// Remove a book. Returns false when it was already gone.
    fn delete(&mut self, id: BookId) -> AppResult<bool>;

    /// Move `moved` to the position currently held by `target`.
    /// Returns false (and changes nothing) when either is unknown or both are the same book.
    fn reorder(&mut self, moved: BookId, target: BookId) -> AppResult<bool>;
}

/// Fill an empty store with the sample books.
/// Returns how many books were added (0 when the store already had some).
pub fn seed_samples_if_empty<S: BookStore + ?Sized>(store: &mut S) -> AppResult<usize> {
    if !store.list()?.is_empty() {
        return Ok(0);
    }

    for (title, author, read_me) in SAMPLE_BOOKS {
        let mut new_book = NewBook::new(title, author);
        new_book.read_me = read_me;
        store.insert(new_book)?;
    }

    info!("📚 Seeded {} sample books", SAMPLE_BOOKS.len());
    Ok(SAMPLE_BOOKS.len())
}

/// Move the element at `from` so it ends up at index `to`.
/// Everything in between shifts by one toward the vacated slot.
pub(crate) fn move_to_position<T>(items: &mut Vec<T>, from: usize, to: usize) {
    if from == to || from >= items.len() || to >= items.len() {
        return;
    }
    let item = items.remove(from);
    items.insert(to, item);
}

/// In-memory book store (nothing survives a restart)
#[derive(Debug)]
pub struct MemoryStore {
    books: Vec<Book>,
    next_id: i64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::with_books(Vec::new())
    }

    /// Build a store from already-identified books, keeping their order
    pub fn with_books(books: Vec<Book>) -> Self {
        let next_id = books.iter().map(|b| b.id().0).max().unwrap_or(0) + 1;
        Self { books, next_id }
    }

    fn position(&self, id: BookId) -> Option<usize> {
        self.books.iter().position(|b| b.id() == id)
    }
}

impl BookStore for MemoryStore {
    fn list(&self) -> AppResult<Vec<Book>> {
        Ok(self.books.clone())
    }

    fn get(&self, id: BookId) -> AppResult<Option<Book>> {
        Ok(self.position(id).map(|i| self.books[i].clone()))
    }

    fn insert(&mut self, new_book: NewBook) -> AppResult<Book> {
        let new_book = new_book.validate()?;
        let id = BookId(self.next_id);
        self.next_id = id.0 + 1;

        let book = new_book.into_book(id);
        self.books.push(book.clone());
        Ok(book)
    }

    fn update(&mut self, book: &Book) -> AppResult<()> {
        if let Some(i) = self.position(book.id()) {
            self.books[i] = book.clone();
        }
        Ok(())
    }

    fn delete(&mut self, id: BookId) -> AppResult<bool> {
        match self.position(id) {
            Some(i) => {
                self.books.remove(i);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn reorder(&mut self, moved: BookId, target: BookId) -> AppResult<bool> {
        if moved == target {
            return Ok(false);
        }
        let (Some(from), Some(to)) = (self.position(moved), self.position(target)) else {
            return Ok(false);
        };
        move_to_position(&mut self.books, from, to);
        Ok(true)
    }
}
