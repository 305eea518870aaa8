//! Error types for linkedin-activity-export.
//!
//! Decoders and extractors never fail: they degrade to `0`, `""` or today's
//! date. Only the page-level conversion and the export adapter return errors.

/// Error type for conversion operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No records were found in the document (likely the wrong page was saved).
    #[error("No data found – did you save the full page?")]
    EmptyResult,

    /// An unknown export mode was requested.
    #[error("Unknown mode '{0}' (expected 'posts' or 'comments')")]
    InvalidMode(String),

    /// A conversion was triggered while another one was still running.
    #[error("A conversion is already running")]
    Busy,

    /// The workbook could not be serialized.
    #[error("Workbook export failed: {0}")]
    Export(String),

    /// The workbook zip container could not be written.
    #[error("Workbook packaging failed: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Reading or writing bytes failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for conversion operations.
pub type Result<T> = std::result::Result<T, Error>;
