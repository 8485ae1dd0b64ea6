//! Unified error type for the library app.
//!
//! Every fallible operation on the catalog, the settings file or a cover
//! image returns `Result<T, AppError>`. The UI never panics on these; it
//! reports them in the status line and logs them.

use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// SQLite catalog error.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Cover image could not be decoded or encoded.
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// Standard IO error, auto-converted from `io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Settings file could not be parsed or written.
    #[error("Settings error: {0}")]
    Settings(#[from] serde_json::Error),

    /// The window or event loop failed.
    #[error("GUI error: {0}")]
    Gui(#[from] iced::Error),

    /// A required book field was left empty.
    #[error("A book needs a {0}")]
    MissingField(&'static str),

    /// Neither a data directory nor a home directory could be found.
    #[error("Could not determine user data directory")]
    NoDataDirectory,
}

pub type AppResult<T> = Result<T, AppError>;
