//! Unified error types for the media preview application.

use std::fmt;

/// Application-specific errors.
///
/// None of these reach the gallery controller: a file that cannot be read is
/// never turned into a selection handle, and a thumbnail that cannot be decoded
/// keeps its placeholder tile.
#[derive(Debug)]
pub enum AppError {
    /// Error reading a selected file into memory
    FileRead(String),
    /// Error decoding image bytes into a thumbnail
    Decode(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::FileRead(msg) => write!(f, "File read error: {}", msg),
            AppError::Decode(msg) => write!(f, "Decode error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<image::ImageError> for AppError {
    fn from(err: image::ImageError) -> Self {
        AppError::Decode(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::FileRead(err.to_string())
    }
}

/// Type alias for Results in this application.
pub type Result<T> = std::result::Result<T, AppError>;
