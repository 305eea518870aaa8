//! # linkedin-activity-export
//!
//! Turns a browser-saved LinkedIn activity page into structured records and
//! an Excel workbook.
//!
//! The page is a list of feed updates. Each update is parsed into either a
//! [`PostRecord`] (posts tab) or a [`CommentRecord`] (comments tab). Dates are
//! recovered from the time-ordered activity id in the post URL, engagement
//! counts are read from whatever labels the page happens to carry, and the
//! post format is classified by an ordered rule table.
//!
//! ## Quick Start
//!
//! ```rust
//! use linkedin_activity_export::{extract, Records};
//!
//! let html = r#"<html><body>
//! <div class="feed-shared-update-v2" data-urn="urn:li:activity:7123456789012345678">
//!   <div class="update-components-text"><span class="break-words">Hello world</span></div>
//!   <span>1,204 reactions</span> <span>37 comments</span>
//! </div>
//! </body></html>"#;
//!
//! let records = extract(html)?;
//! let Records::Posts(posts) = &records else { unreachable!() };
//! assert_eq!(posts[0].caption, "Hello world");
//! assert_eq!(posts[0].likes, 1204);
//! assert_eq!(posts[0].comments, 37);
//! # Ok::<(), linkedin_activity_export::Error>(())
//! ```
//!
//! ## Workbook output
//!
//! [`convert`] runs the same extraction and serializes the rows into XLSX
//! bytes. [`Session`] wraps that in a single-attempt state machine for front
//! ends that need to disable their trigger while a conversion runs.

mod error;
mod options;
mod patterns;

/// DOM adapter: the [`dom::Fragment`] trait over `dom_query`.
pub mod dom;

/// Count, identifier and date decoders.
pub mod decode;

/// Character encoding detection and transcoding.
pub mod encoding;

/// Workbook serialization.
pub mod export;

/// Field extractors (likes, counts, images, format, URL).
pub mod extractor;

/// Page-level orchestration (mode detection, fragment selection, dedup).
pub mod page;

/// Post and comment record parsers.
pub mod parser;

/// Record types.
pub mod record;

/// Single-attempt conversion session and download naming.
pub mod session;

/// URL utilities for canonicalization and link classification.
pub mod url_utils;

use tracing::{debug, warn};

// Public API - re-exports
pub use error::{Error, Result};
pub use options::{Options, DEFAULT_BASE_URL, DEFAULT_SHEET_NAME};
pub use record::{CommentKind, CommentRecord, DateParts, Mode, PostFormat, PostRecord, Records};
pub use session::{suggested_filename, Download, Session, SessionState};

/// Extracts records from a saved activity page using default options.
///
/// The mode is detected from the page.
///
/// # Errors
///
/// Returns [`Error::EmptyResult`] if the page holds no records for its mode.
pub fn extract(html: &str) -> Result<Records> {
    extract_with_options(html, &Options::default())
}

/// Extracts records from a saved activity page with custom options.
///
/// # Example
///
/// ```rust
/// use linkedin_activity_export::{extract_with_options, Error, Mode, Options};
///
/// let options = Options {
///     mode: Some(Mode::Comments),
///     ..Options::default()
/// };
/// let result = extract_with_options("<html><body></body></html>", &options);
/// assert!(matches!(result, Err(Error::EmptyResult)));
/// ```
///
/// # Errors
///
/// Returns [`Error::EmptyResult`] if the page holds no records for its mode.
pub fn extract_with_options(html: &str, options: &Options) -> Result<Records> {
    let mode = options.mode.unwrap_or_else(|| page::detect_mode(html));
    let doc = dom::parse(html);

    let records = match mode {
        Mode::Posts => Records::Posts(page::posts(&doc, options).collect()),
        Mode::Comments => {
            let rows: Vec<CommentRecord> = page::comments(&doc, options).collect();
            if options.deduplicate_comments {
                Records::Comments(page::dedup_comments(rows))
            } else {
                Records::Comments(rows)
            }
        }
    };

    if records.is_empty() {
        warn!(%mode, "no records found in page");
        return Err(Error::EmptyResult);
    }

    debug!(%mode, rows = records.len(), "extracted records");
    Ok(records)
}

/// Converts a saved activity page into XLSX bytes using default options.
///
/// # Errors
///
/// [`Error::EmptyResult`] for a page without records, or an export error.
pub fn convert(html: &str) -> Result<Vec<u8>> {
    convert_with_options(html, &Options::default())
}

/// Converts a saved activity page into XLSX bytes with custom options.
///
/// # Errors
///
/// [`Error::EmptyResult`] for a page without records, or an export error.
pub fn convert_with_options(html: &str, options: &Options) -> Result<Vec<u8>> {
    let records = extract_with_options(html, options)?;
    export::write_records(&records, &options.sheet_name)
}

/// Converts raw page bytes into XLSX bytes, honoring a declared charset.
///
/// # Character Encoding
///
/// The encoding is taken from `<meta charset="...">` or the
/// `Content-Type` meta tag, defaulting to UTF-8. Invalid sequences become
/// U+FFFD rather than errors.
///
/// # Errors
///
/// Same as [`convert_with_options`].
pub fn convert_bytes(html: &[u8], options: &Options) -> Result<Vec<u8>> {
    let html_str = encoding::transcode_to_utf8(html);
    convert_with_options(&html_str, options)
}
