//! Grouping and sorting of the book list
//!
//! A `Listing` is what the library view draws: three sections in a fixed
//! order (the "add new" row, the books to read, the finished books), each
//! holding rows. It is rebuilt from scratch from the store on every refresh
//! and holds no widget types, so the same books always produce the same
//! rows and a renderer can match them up by book identity.

use std::cmp::Ordering;

use super::data::{Book, BookId, SortStyle};

/// The three display buckets, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionLabel {
    AddNew,
    ReadMe,
    Finished,
}

impl SectionLabel {
    /// Header shown above the section (the add-new section has none)
    pub fn title(self) -> Option<&'static str> {
        match self {
            SectionLabel::AddNew => None,
            SectionLabel::ReadMe => Some("Read Me!"),
            SectionLabel::Finished => Some("Finished!"),
        }
    }

    fn index(self) -> usize {
        match self {
            SectionLabel::AddNew => 0,
            SectionLabel::ReadMe => 1,
            SectionLabel::Finished => 2,
        }
    }
}

/// One row of the list
#[derive(Debug, Clone, PartialEq)]
pub enum Row {
    /// The synthetic "Add New Book" placeholder
    AddNew,
    Book(Book),
}

impl Row {
    pub fn book(&self) -> Option<&Book> {
        match self {
            Row::AddNew => None,
            Row::Book(book) => Some(book),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub label: SectionLabel,
    pub rows: Vec<Row>,
}

/// Address of a row: which section, then which row inside it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RowPath {
    pub section: SectionLabel,
    pub row: usize,
}

impl RowPath {
    pub fn new(section: SectionLabel, row: usize) -> Self {
        Self { section, row }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    pub sort_style: SortStyle,
    pub sections: Vec<Section>,
}

/// Case-insensitive ordering that doesn't allocate lowercase copies
pub fn compare_ignore_case(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
}

impl Listing {
    /// Group `books` by their read-me flag and order each group by `sort_style`.
    ///
    /// Sorting is stable, so books that compare equal keep the order they
    /// have in `books`. `SortStyle::ReadMe` keeps that order outright.
    pub fn build(books: &[Book], sort_style: SortStyle) -> Self {
        let (mut read_me, mut finished): (Vec<&Book>, Vec<&Book>) =
            books.iter().partition(|book| book.read_me);

        for group in [&mut read_me, &mut finished] {
            match sort_style {
                SortStyle::Title => group.sort_by(|a, b| compare_ignore_case(&a.title, &b.title)),
                SortStyle::Author => group.sort_by(|a, b| compare_ignore_case(&a.author, &b.author)),
                SortStyle::ReadMe => {}
            }
        }

        let rows = |group: Vec<&Book>| -> Vec<Row> { group.into_iter().cloned().map(Row::Book).collect() };

        Listing {
            sort_style,
            sections: vec![
                Section {
                    label: SectionLabel::AddNew,
                    rows: vec![Row::AddNew],
                },
                Section {
                    label: SectionLabel::ReadMe,
                    rows: rows(read_me),
                },
                Section {
                    label: SectionLabel::Finished,
                    rows: rows(finished),
                },
            ],
        }
    }

    pub fn section(&self, label: SectionLabel) -> &Section {
        &self.sections[label.index()]
    }

    pub fn row(&self, path: RowPath) -> Option<&Row> {
        self.section(path.section).rows.get(path.row)
    }

    /// The book shown at `path`, if that row exists and isn't the placeholder
    pub fn book_at(&self, path: RowPath) -> Option<&Book> {
        self.row(path).and_then(Row::book)
    }

    /// Identities of the books in a section, in display order
    pub fn book_ids(&self, label: SectionLabel) -> Vec<BookId> {
        self.section(label)
            .rows
            .iter()
            .filter_map(Row::book)
            .map(Book::id)
            .collect()
    }

    /// Number of book rows across the read-me and finished sections
    pub fn book_count(&self) -> usize {
        self.section(SectionLabel::ReadMe).rows.len() + self.section(SectionLabel::Finished).rows.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(id: i64, title: &str, author: &str, read_me: bool) -> Book {
        Book::new(BookId(id), title, author).with_read_me(read_me)
    }

    fn sample() -> Vec<Book> {
        vec![
            book(1, "Zed", "maya", true),
            book(2, "Ann", "Lu", true),
            book(3, "Mid", "Kim", false),
            book(4, "bee", "Abe", false),
            book(5, "apple", "zoe", true),
        ]
    }

    #[test]
    fn test_sort_by_title_example() {
        let books = vec![
            book(1, "Zed", "x", true),
            book(2, "Ann", "x", true),
            book(3, "Mid", "x", false),
        ];
        let listing = Listing::build(&books, SortStyle::Title);

        assert_eq!(listing.book_ids(SectionLabel::ReadMe), vec![BookId(2), BookId(1)]);
        assert_eq!(listing.book_ids(SectionLabel::Finished), vec![BookId(3)]);
    }

    #[test]
    fn test_sections_come_in_fixed_order_with_one_placeholder() {
        let listing = Listing::build(&sample(), SortStyle::Author);
        let labels: Vec<_> = listing.sections.iter().map(|s| s.label).collect();
        assert_eq!(
            labels,
            vec![SectionLabel::AddNew, SectionLabel::ReadMe, SectionLabel::Finished]
        );
        assert_eq!(listing.section(SectionLabel::AddNew).rows, vec![Row::AddNew]);
    }

    #[test]
    fn test_grouping_partitions_every_book_once() {
        let books = sample();
        let listing = Listing::build(&books, SortStyle::Title);

        let mut seen = listing.book_ids(SectionLabel::ReadMe);
        seen.extend(listing.book_ids(SectionLabel::Finished));
        seen.sort();
        let mut expected: Vec<_> = books.iter().map(Book::id).collect();
        expected.sort();
        assert_eq!(seen, expected);

        for row in &listing.section(SectionLabel::ReadMe).rows {
            assert!(row.book().unwrap().read_me);
        }
        for row in &listing.section(SectionLabel::Finished).rows {
            assert!(!row.book().unwrap().read_me);
        }
    }

    #[test]
    fn test_title_and_author_sorts_ignore_case() {
        let listing = Listing::build(&sample(), SortStyle::Title);
        assert_eq!(
            listing.book_ids(SectionLabel::ReadMe),
            vec![BookId(2), BookId(5), BookId(1)]
        );
        assert_eq!(listing.book_ids(SectionLabel::Finished), vec![BookId(4), BookId(3)]);

        let listing = Listing::build(&sample(), SortStyle::Author);
        let authors: Vec<_> = listing
            .section(SectionLabel::ReadMe)
            .rows
            .iter()
            .map(|r| r.book().unwrap().author.clone())
            .collect();
        assert_eq!(authors, vec!["Lu", "maya", "zoe"]);
    }

    #[test]
    fn test_read_me_style_keeps_store_order() {
        let listing = Listing::build(&sample(), SortStyle::ReadMe);
        assert_eq!(
            listing.book_ids(SectionLabel::ReadMe),
            vec![BookId(1), BookId(2), BookId(5)]
        );
        assert_eq!(listing.book_ids(SectionLabel::Finished), vec![BookId(3), BookId(4)]);
    }

    #[test]
    fn test_equal_keys_keep_input_order() {
        let books = vec![
            book(7, "Same", "b", true),
            book(3, "same", "a", true),
            book(5, "SAME", "c", true),
        ];
        let listing = Listing::build(&books, SortStyle::Title);
        assert_eq!(
            listing.book_ids(SectionLabel::ReadMe),
            vec![BookId(7), BookId(3), BookId(5)]
        );
    }

    #[test]
    fn test_build_is_idempotent() {
        let books = sample();
        assert_eq!(
            Listing::build(&books, SortStyle::Author),
            Listing::build(&books, SortStyle::Author)
        );
    }

    #[test]
    fn test_row_lookup() {
        let listing = Listing::build(&sample(), SortStyle::ReadMe);
        assert_eq!(listing.row(RowPath::new(SectionLabel::AddNew, 0)), Some(&Row::AddNew));
        assert!(listing.book_at(RowPath::new(SectionLabel::AddNew, 0)).is_none());
        assert_eq!(
            listing.book_at(RowPath::new(SectionLabel::Finished, 1)).map(Book::id),
            Some(BookId(4))
        );
        assert!(listing.row(RowPath::new(SectionLabel::Finished, 9)).is_none());
        assert_eq!(listing.book_count(), 5);
    }

    #[test]
    fn test_empty_library_still_has_placeholder() {
        let listing = Listing::build(&[], SortStyle::Title);
        assert_eq!(listing.book_count(), 0);
        assert_eq!(listing.section(SectionLabel::AddNew).rows.len(), 1);
        assert_eq!(SectionLabel::ReadMe.title(), Some("Read Me!"));
        assert_eq!(SectionLabel::AddNew.title(), None);
    }
}
