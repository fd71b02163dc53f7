//! Error types for the docstamp-core library.

use thiserror::Error;

/// Main error type for the docstamp library.
///
/// Extraction itself never fails; these errors only surface from
/// configuration handling and the I/O done by callers.
#[derive(Error, Debug)]
pub enum DocstampError {
    /// Calendar or field extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON configuration.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised inside individual rules.
///
/// Rules treat these as "no candidate" and fall through to the next
/// pattern or keyword; they never reach the public extraction functions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    /// The era name is not in the calendar table.
    #[error("unknown era: {0}")]
    UnknownEra(String),

    /// The era year cannot belong to the era.
    #[error("era year {year} out of range for {era}")]
    EraYearOutOfRange { era: String, year: u32 },
}

/// Result type for the docstamp library.
pub type Result<T> = std::result::Result<T, DocstampError>;
