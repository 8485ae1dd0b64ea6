use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::data::{Book, BookId, NewBook};
use super::store::{move_to_position, BookStore};
use crate::error::{AppError, AppResult};

const BOOK_COLUMNS: &str = "id, title, author, review, cover, read_me";

/// The Library manages the SQLite book catalog.
/// It stores every book's fields and its place in the manual ("Read Me") order.
pub struct Library {
    conn: Connection,
    db_path: PathBuf,
}

impl Library {
    /// Open (or create) the catalog at the given path.
    ///
    /// The default location lives in the user's data directory:
    /// - Linux: ~/.local/share/read-me/read_me.db
    /// - macOS: ~/Library/Application Support/read-me/read_me.db
    /// - Windows: %APPDATA%\read-me\read_me.db
    pub fn open(db_path: &Path) -> AppResult<Self> {
        // Ensure the parent directory exists
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(db_path)?;
        info!("📁 Database opened at: {}", db_path.display());

        let mut library = Library {
            conn,
            db_path: db_path.to_path_buf(),
        };
        library.init_schema()?;

        Ok(library)
    }

    /// A throwaway catalog that lives only as long as this value
    #[cfg(test)]
    pub fn in_memory() -> AppResult<Self> {
        let conn = Connection::open_in_memory()?;
        let mut library = Library {
            conn,
            db_path: PathBuf::from(":memory:"),
        };
        library.init_schema()?;
        Ok(library)
    }

    /// Get the path where the database should be stored by default
    pub fn default_db_path() -> AppResult<PathBuf> {
        let mut path = dirs::data_dir()
            .or_else(dirs::home_dir)
            .ok_or(AppError::NoDataDirectory)?;

        path.push("read-me");
        path.push("read_me.db");
        Ok(path)
    }

    /// Initialize the database schema.
    /// Creates the table and indexes if they don't exist.
    fn init_schema(&mut self) -> AppResult<()> {
        // position holds the manual order; ids never change
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS books (
                id              INTEGER PRIMARY KEY AUTOINCREMENT,
                title           TEXT NOT NULL,
                author          TEXT NOT NULL,
                review          TEXT,
                cover           BLOB,
                read_me         INTEGER NOT NULL DEFAULT 0,
                position        INTEGER NOT NULL,
                added_at        INTEGER NOT NULL
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_books_position
             ON books(position)",
            [],
        )?;

        debug!("✅ Database schema initialized");

        Ok(())
    }

    /// Get the path to the database file
    pub fn path(&self) -> &PathBuf {
        &self.db_path
    }

    /// Get a count of books in the library
    pub fn book_count(&self) -> AppResult<i64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM books", [], |row| row.get(0))?;
        Ok(count)
    }

    fn book_from_row(row: &Row<'_>) -> rusqlite::Result<Book> {
        let mut book = Book::new(BookId(row.get(0)?), row.get::<_, String>(1)?, row.get::<_, String>(2)?);
        book.review = row.get(3)?;
        book.cover = row.get(4)?;
        book.read_me = row.get(5)?;
        Ok(book)
    }

    fn ordered_ids(&self) -> AppResult<Vec<BookId>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id FROM books ORDER BY position, id")?;

        let ids = stmt
            .query_map([], |row| row.get(0).map(BookId))?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(ids)
    }
}

impl BookStore for Library {
    fn list(&self) -> AppResult<Vec<Book>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM books ORDER BY position, id",
            BOOK_COLUMNS
        ))?;

        let book_iter = stmt.query_map([], Self::book_from_row)?;

        let mut books = Vec::new();
        for book in book_iter {
            books.push(book?);
        }

        Ok(books)
    }

    fn get(&self, id: BookId) -> AppResult<Option<Book>> {
        let book = self
            .conn
            .query_row(
                &format!("SELECT {} FROM books WHERE id = ?1", BOOK_COLUMNS),
                params![id.0],
                Self::book_from_row,
            )
            .optional()?;
        Ok(book)
    }

    fn insert(&mut self, new_book: NewBook) -> AppResult<Book> {
        let new_book = new_book.validate()?;

        let next_position: i64 = self.conn.query_row(
            "SELECT COALESCE(MAX(position), -1) + 1 FROM books",
            [],
            |row| row.get(0),
        )?;

        self.conn.execute(
            "INSERT INTO books (title, author, read_me, position, added_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                &new_book.title,
                &new_book.author,
                new_book.read_me,
                next_position,
                Utc::now().timestamp(),
            ],
        )?;

        let book = new_book.into_book(BookId(self.conn.last_insert_rowid()));
        info!("➕ Added {} \"{}\"", book.id(), book.title);
        Ok(book)
    }

    fn update(&mut self, book: &Book) -> AppResult<()> {
        let changed = self.conn.execute(
            "UPDATE books SET title = ?1, author = ?2, review = ?3, cover = ?4, read_me = ?5
             WHERE id = ?6",
            params![
                &book.title,
                &book.author,
                &book.review,
                &book.cover,
                book.read_me,
                book.id().0,
            ],
        )?;

        if changed == 0 {
            debug!("Update skipped, {} is not in the catalog", book.id());
        }
        Ok(())
    }

    fn delete(&mut self, id: BookId) -> AppResult<bool> {
        let removed = self
            .conn
            .execute("DELETE FROM books WHERE id = ?1", params![id.0])?;

        if removed > 0 {
            info!("🗑️  Deleted {}", id);
        }
        Ok(removed > 0)
    }

    fn reorder(&mut self, moved: BookId, target: BookId) -> AppResult<bool> {
        if moved == target {
            return Ok(false);
        }

        let mut order = self.ordered_ids()?;
        let from = order.iter().position(|&id| id == moved);
        let to = order.iter().position(|&id| id == target);
        let (Some(from), Some(to)) = (from, to) else {
            return Ok(false);
        };

        move_to_position(&mut order, from, to);

        // All positions are rewritten inside one transaction
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare("UPDATE books SET position = ?1 WHERE id = ?2")?;
            for (position, id) in order.iter().enumerate() {
                stmt.execute(params![position as i64, id.0])?;
            }
        }
        tx.commit()?;

        debug!("↕️  Moved {} to the position of {}", moved, target);
        Ok(true)
    }
}

// Implement Debug for better error messages
impl std::fmt::Debug for Library {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Library")
            .field("db_path", &self.db_path)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::store::seed_samples_if_empty;

    fn titles(library: &Library) -> Vec<String> {
        library
            .list()
            .unwrap()
            .into_iter()
            .map(|b| b.title)
            .collect()
    }

    fn library_with(titles: &[&str]) -> Library {
        let mut library = Library::in_memory().unwrap();
        for title in titles {
            library.insert(NewBook::new(*title, "Author")).unwrap();
        }
        library
    }

    #[test]
    fn test_insert_and_list_in_manual_order() {
        let library = library_with(&["A", "B", "C"]);
        assert_eq!(titles(&library), vec!["A", "B", "C"]);
        assert_eq!(library.book_count().unwrap(), 3);
    }

    #[test]
    fn test_update_round_trips_all_fields() {
        let mut library = library_with(&["Kindred"]);
        let mut book = library.list().unwrap().remove(0);
        book.review = Some("Unsettling and brilliant".into());
        book.cover = Some(vec![1, 2, 3]);
        book.read_me = true;

        library.update(&book).unwrap();

        assert_eq!(library.get(book.id()).unwrap(), Some(book));
    }

    #[test]
    fn test_delete_twice_is_not_an_error() {
        let mut library = library_with(&["A", "B"]);
        let id = library.list().unwrap()[0].id();
        assert!(library.delete(id).unwrap());
        assert!(!library.delete(id).unwrap());
        assert_eq!(titles(&library), vec!["B"]);
    }

    #[test]
    fn test_reorder_persists_positions() {
        let mut library = library_with(&["A", "B", "C", "D"]);
        let books = library.list().unwrap();

        assert!(library.reorder(books[3].id(), books[1].id()).unwrap());
        assert_eq!(titles(&library), vec!["A", "D", "B", "C"]);

        // C sits last now, so A lands after it
        assert!(library.reorder(books[0].id(), books[2].id()).unwrap());
        assert_eq!(titles(&library), vec!["D", "B", "C", "A"]);
    }

    #[test]
    fn test_reorder_unknown_book_changes_nothing() {
        let mut library = library_with(&["A", "B"]);
        let first = library.list().unwrap()[0].id();
        assert!(!library.reorder(first, BookId(999)).unwrap());
        assert_eq!(titles(&library), vec!["A", "B"]);
    }

    #[test]
    fn test_insert_after_delete_appends_last() {
        let mut library = library_with(&["A", "B"]);
        let first = library.list().unwrap()[0].id();
        library.delete(first).unwrap();
        library.insert(NewBook::new("C", "Author")).unwrap();
        assert_eq!(titles(&library), vec!["B", "C"]);
    }

    #[test]
    fn test_seed_only_fills_empty_catalog() {
        let mut library = Library::in_memory().unwrap();
        let seeded = seed_samples_if_empty(&mut library).unwrap();
        assert!(seeded > 0);
        assert_eq!(seed_samples_if_empty(&mut library).unwrap(), 0);
        assert_eq!(library.book_count().unwrap(), seeded as i64);
    }

    #[test]
    fn test_open_creates_parent_directories() {
        let dir = std::env::temp_dir().join(format!("read-me-test-{}", std::process::id()));
        let path = dir.join("nested").join("catalog.db");

        {
            let mut library = Library::open(&path).unwrap();
            library.insert(NewBook::new("Beloved", "Toni Morrison")).unwrap();
        }
        let reopened = Library::open(&path).unwrap();
        assert_eq!(titles(&reopened), vec!["Beloved"]);

        let _ = std::fs::remove_dir_all(&dir);
    }
}
