//! Error types for archive reading, KML parsing and CSV output

use std::io;
use std::path::PathBuf;
use std::str::Utf8Error;
use thiserror::Error;

/// Errors that abort a conversion
#[derive(Debug, Error)]
pub enum Error {
    /// Input path does not resolve to a file
    #[error("archive not found: {}", path.display())]
    ArchiveNotFound { path: PathBuf },

    /// Input is not a zip archive this reader understands
    #[error("invalid archive: {0}")]
    InvalidArchive(String),

    /// The archive holds no entry ending in `.kml`
    #[error("no KML document found in archive")]
    NoDocumentEntry,

    /// The KML entry is not valid UTF-8
    #[error("KML document {entry} is not valid UTF-8: {source}")]
    InvalidEncoding {
        entry: String,
        #[source]
        source: Utf8Error,
    },

    /// The KML entry is not well-formed XML
    #[error("malformed KML document {entry}: {source}")]
    MalformedDocument {
        entry: String,
        #[source]
        source: roxmltree::Error,
    },

    /// Classification table could not be loaded
    #[error("invalid classification table {path}: {source}")]
    InvalidConfig {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl Error {
    pub(crate) fn invalid_archive(reason: impl Into<String>) -> Self {
        Error::InvalidArchive(reason.into())
    }
}

/// Result type for kmz2csv operations
pub type Result<T> = std::result::Result<T, Error>;
