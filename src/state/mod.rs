/// State management module
///
/// This module handles all application state, including:
/// - Shared data structures (data.rs)
/// - The book store trait and its in-memory version (store.rs)
/// - The SQLite catalog (library.rs)
/// - Grouping and sorting for display (listing.rs)
/// - Delete and reorder rules of the list (book_list.rs)
/// - In-progress detail edits (draft.rs)

pub mod book_list;
pub mod data;
pub mod draft;
pub mod library;
pub mod listing;
pub mod store;
