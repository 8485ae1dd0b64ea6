use tracing::{debug, warn};

use super::data::{Book, SortStyle};
use super::listing::{Listing, RowPath, SectionLabel};
use super::store::BookStore;
use crate::error::AppResult;

/// How the view should apply a fresh listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Refresh {
    /// false when only the order inside a section changed (or nothing did)
    pub animate: bool,
}

/// The list controller behind the library view.
///
/// Holds the active sort style and the listing currently on screen, and
/// decides which rows may be deleted or dragged.
#[derive(Debug, Clone)]
pub struct BookList {
    sort_style: SortStyle,
    listing: Listing,
}

impl BookList {
    /// An empty list; call `refresh` to load the store
    pub fn new(sort_style: SortStyle) -> Self {
        Self {
            sort_style,
            listing: Listing::build(&[], sort_style),
        }
    }

    pub fn sort_style(&self) -> SortStyle {
        self.sort_style
    }

    pub fn listing(&self) -> &Listing {
        &self.listing
    }

    /// The book shown at `path`, if any
    pub fn book_at(&self, path: RowPath) -> Option<&Book> {
        self.listing.book_at(path)
    }

    /// Re-read the store and regroup it under `sort_style`
    pub fn refresh<S: BookStore + ?Sized>(&mut self, store: &S, sort_style: SortStyle) -> AppResult<Refresh> {
        self.rebuild(store, sort_style, true)
    }

    fn rebuild<S: BookStore + ?Sized>(&mut self, store: &S, sort_style: SortStyle, animate: bool) -> AppResult<Refresh> {
        self.sort_style = sort_style;
        let books = store.list()?;
        self.listing = Listing::build(&books, sort_style);

        debug!(
            "📋 Listing rebuilt: {} books, sorted by {:?}",
            self.listing.book_count(),
            sort_style
        );
        Ok(Refresh { animate })
    }

    /// Every book row can be deleted; the add-new placeholder can't
    pub fn can_edit(&self, path: RowPath) -> bool {
        path.section != SectionLabel::AddNew && self.book_at(path).is_some()
    }

    /// Rows can only be dragged around the read-me section, and only in manual order
    pub fn can_move(&self, path: RowPath) -> bool {
        self.sort_style == SortStyle::ReadMe
            && path.section == SectionLabel::ReadMe
            && self.book_at(path).is_some()
    }

    /// Delete the book shown at `path` and regroup.
    /// Returns false when the row has no book behind it.
    pub fn delete<S: BookStore + ?Sized>(&mut self, store: &mut S, path: RowPath) -> AppResult<bool> {
        if !self.can_edit(path) {
            return Ok(false);
        }
        let Some(id) = self.book_at(path).map(Book::id) else {
            return Ok(false);
        };

        let removed = store.delete(id)?;
        self.refresh(store, self.sort_style)?;
        Ok(removed)
    }

    /// Move the book at `from` to the slot at `to`.
    ///
    /// Anything other than a move between two different rows of the
    /// read-me section in manual order leaves the store alone and just
    /// puts the current listing back on screen.
    pub fn move_row<S: BookStore + ?Sized>(&mut self, store: &mut S, from: RowPath, to: RowPath) -> AppResult<Refresh> {
        let endpoints = (self.book_at(from), self.book_at(to));

        let (Some(moved), Some(target)) = endpoints else {
            warn!("Move ignored, {:?} or {:?} has no book", from, to);
            return Ok(Refresh { animate: false });
        };

        if from == to || from.section != to.section || !self.can_move(from) || !self.can_move(to) {
            debug!("Move from {:?} to {:?} not allowed, keeping order", from, to);
            return Ok(Refresh { animate: false });
        }

        let (moved, target) = (moved.id(), target.id());
        store.reorder(moved, target)?;

        // Membership didn't change, only order
        self.rebuild(store, self.sort_style, false)
    }
}
