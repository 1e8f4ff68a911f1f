//! Error types for splitzip-lib

use std::path::PathBuf;
use thiserror::Error;

/// Core error types for the splitzip library
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Selected source or archive does not exist
    #[error("Not found: {0}")]
    NotFound(PathBuf),

    /// Selected source contains no files (soft outcome, not a crash)
    #[error("Source contains no files to pack")]
    EmptySource,

    /// Archive container could not be opened or parsed
    #[error("Invalid archive: {0}")]
    InvalidArchive(String),

    /// An archive entry name resolves outside the destination root
    #[error("Entry {0:?} would escape the destination directory")]
    UnsafePath(String),

    /// Supplied byte budget is non-positive
    #[error("Size limit must be a positive number of bytes")]
    InvalidBudget,

    /// Operation was cancelled between entries
    #[error("Operation cancelled")]
    Cancelled,

    /// Configuration-related error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        match err {
            zip::result::ZipError::Io(e) => Error::Io(e),
            other => Error::InvalidArchive(other.to_string()),
        }
    }
}

impl From<walkdir::Error> for Error {
    fn from(err: walkdir::Error) -> Self {
        Error::Io(err.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
