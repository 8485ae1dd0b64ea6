//! In-progress edits for the detail view
//!
//! The detail view works on a copy of the book. Nothing reaches the store
//! until the reader hits Save, which writes every field at once.

use super::data::Book;
use super::store::BookStore;
use crate::error::AppResult;

#[derive(Debug, Clone, PartialEq)]
pub struct BookDraft {
    /// The book as it was when the detail view opened
    original: Book,
    /// The working copy the view edits
    book: Book,
}

impl BookDraft {
    pub fn new(book: Book) -> Self {
        Self {
            original: book.clone(),
            book,
        }
    }

    pub fn book(&self) -> &Book {
        &self.book
    }

    /// Flip the bookmark. The list only regroups once it is shown again.
    pub fn toggle_read_me(&mut self) {
        self.book.read_me = !self.book.read_me;
    }

    /// Replace the review; whitespace-only text clears it
    pub fn set_review(&mut self, text: &str) {
        let text = text.trim_end();
        self.book.review = if text.trim().is_empty() {
            None
        } else {
            Some(text.to_string())
        };
    }

    /// Use new cover bytes (PNG)
    pub fn set_cover(&mut self, cover: Vec<u8>) {
        self.book.cover = Some(cover);
    }

    /// Check if anything differs from the stored book
    pub fn is_dirty(&self) -> bool {
        self.book != self.original
    }

    /// Throw away all edits
    pub fn discard(&mut self) {
        self.book = self.original.clone();
    }

    /// Write the whole working copy to the store
    pub fn commit<S: BookStore + ?Sized>(&mut self, store: &mut S) -> AppResult<()> {
        store.update(&self.book)?;
        self.original = self.book.clone();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::data::BookId;
    use crate::state::store::MemoryStore;

    fn stored() -> (MemoryStore, Book) {
        let book = Book::new(BookId(1), "Middlemarch", "George Eliot");
        (MemoryStore::with_books(vec![book.clone()]), book)
    }

    #[test]
    fn test_toggle_does_not_touch_store_until_commit() {
        let (mut store, book) = stored();
        let mut draft = BookDraft::new(book);

        draft.toggle_read_me();
        assert!(draft.is_dirty());
        assert!(!store.get(BookId(1)).unwrap().unwrap().read_me);

        draft.commit(&mut store).unwrap();
        assert!(store.get(BookId(1)).unwrap().unwrap().read_me);
        assert!(!draft.is_dirty());
    }

    #[test]
    fn test_commit_writes_review_cover_and_flag_together() {
        let (mut store, book) = stored();
        let mut draft = BookDraft::new(book);

        draft.set_review("Slow start, worth it.\n");
        draft.set_cover(vec![9, 9, 9]);
        draft.toggle_read_me();
        draft.commit(&mut store).unwrap();

        let saved = store.get(BookId(1)).unwrap().unwrap();
        assert_eq!(saved.review.as_deref(), Some("Slow start, worth it."));
        assert_eq!(saved.cover, Some(vec![9, 9, 9]));
        assert!(saved.read_me);
        assert_eq!(saved.title, "Middlemarch");
    }

    #[test]
    fn test_blank_review_clears_it() {
        let (_, mut book) = stored();
        book.review = Some("old".into());
        let mut draft = BookDraft::new(book);
        draft.set_review("  \n ");
        assert_eq!(draft.book().review, None);
    }

    #[test]
    fn test_discard_restores_original() {
        let (_, book) = stored();
        let mut draft = BookDraft::new(book.clone());
        draft.toggle_read_me();
        draft.set_review("draft text");

        draft.discard();

        assert_eq!(draft.book(), &book);
        assert!(!draft.is_dirty());
    }
}
