//! Error types for the file tailer library.

use thiserror::Error;

/// The main error type for tailing operations.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O errors when opening, measuring or reading the tailed file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The tailed file does not exist (yet, or any more).
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    /// The file grew but reading made no progress from `position`.
    #[error("Illegal position {position}, retrying as rotation")]
    IllegalPosition { position: u64 },

    /// Rejected session configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
}

/// A convenient Result type for tailing operations.
pub type Result<T> = std::result::Result<T, Error>;
