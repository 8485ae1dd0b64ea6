//! Shared data structures for the application state
//!
//! These structs represent the data model that flows between
//! the book store and the UI layer.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{AppError, AppResult};

/// Stable identity of a book (the catalog's primary key)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BookId(pub i64);

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Represents a single book in the library
#[derive(Debug, Clone, PartialEq)]
pub struct Book {
    /// Identity, fixed at creation
    id: BookId,
    pub title: String,
    pub author: String,
    /// Free-text review (None until the reader writes one)
    pub review: Option<String>,
    /// Cover image as PNG bytes (None shows the letter-square placeholder)
    pub cover: Option<Vec<u8>>,
    /// Bookmarked to read (true) versus finished (false)
    pub read_me: bool,
}

impl Book {
    /// Create a book with the given identity and no review, cover or bookmark
    pub fn new(id: BookId, title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            author: author.into(),
            review: None,
            cover: None,
            read_me: false,
        }
    }

    pub fn id(&self) -> BookId {
        self.id
    }

    /// Builder-style helper used by the stores and by tests
    pub fn with_read_me(mut self, read_me: bool) -> Self {
        self.read_me = read_me;
        self
    }
}

/// Fields needed to create a book ("Add New Book" flow)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub read_me: bool,
}

impl NewBook {
    pub fn new(title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            read_me: false,
        }
    }

    /// Trim both text fields and reject empty ones
    pub fn validate(self) -> AppResult<Self> {
        let title = self.title.trim().to_string();
        let author = self.author.trim().to_string();

        if title.is_empty() {
            return Err(AppError::MissingField("title"));
        }
        if author.is_empty() {
            return Err(AppError::MissingField("author"));
        }

        Ok(Self {
            title,
            author,
            read_me: self.read_me,
        })
    }

    /// Turn the validated fields into a book with its assigned identity
    pub fn into_book(self, id: BookId) -> Book {
        Book::new(id, self.title, self.author).with_read_me(self.read_me)
    }
}

/// The comparison key used inside the read-me and finished sections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortStyle {
    Title,
    Author,
    /// Manual order: the store's order is kept as is
    #[default]
    ReadMe,
}

impl SortStyle {
    pub const ALL: [SortStyle; 3] = [SortStyle::Title, SortStyle::Author, SortStyle::ReadMe];

    /// Toolbar button label
    pub fn label(self) -> &'static str {
        match self {
            SortStyle::Title => "Title",
            SortStyle::Author => "Author",
            SortStyle::ReadMe => "Read Me",
        }
    }
}
