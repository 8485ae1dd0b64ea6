/// User interface module
///
/// Screens are plain functions/structs that turn state into iced widgets:
/// - The library list (library_view.rs)
/// - The book detail editor (detail_view.rs)
/// - The add-new form (new_book.rs)
/// - The letter-square placeholder cover (letter_square.rs)

pub mod detail_view;
pub mod letter_square;
pub mod library_view;
pub mod new_book;
