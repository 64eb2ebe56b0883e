//! Error types for pdfsplit.

use std::io;
use thiserror::Error;

/// Result type alias for pdfsplit operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while splitting a document.
///
/// Only the document-level variants abort a run. Page-level failures are
/// caught by the splitter and recorded as warnings in the run report.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading input or writing output files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input is not recognized as PDF.
    #[error("Unknown file format: not a valid PDF")]
    UnknownFormat,

    /// The PDF version is not supported.
    #[error("Unsupported PDF version: {0}")]
    UnsupportedVersion(String),

    /// The PDF document is encrypted.
    #[error("Document is encrypted")]
    Encrypted,

    /// The input bytes could not be parsed as a document.
    #[error("Failed to load document: {0}")]
    DocumentLoad(String),

    /// Error extracting the text of a page.
    #[error("Text extraction error: {0}")]
    TextExtract(String),

    /// Page index is out of range (zero-based index, page count).
    #[error("Page {0} is out of range (document has {1} pages)")]
    PageOutOfRange(usize, usize),

    /// A single page could not be materialized as its own document.
    #[error("Page extraction error: {0}")]
    PageExtraction(String),

    /// An artifact could not be written into the archive.
    #[error("Archive error: {0}")]
    ArchiveBuild(String),

    /// Invalid option value.
    #[error("Invalid option: {0}")]
    InvalidOption(String),

    /// The run report could not be serialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        Error::ArchiveBuild(err.to_string())
    }
}

impl From<tempfile::PersistError> for Error {
    fn from(err: tempfile::PersistError) -> Self {
        Error::Io(err.error)
    }
}
