//! Configuration options for activity conversion.
//!
//! The `Options` struct controls how a saved activity page is read and how the
//! workbook is written.

use crate::record::Mode;

/// Default origin used to resolve relative post links.
pub const DEFAULT_BASE_URL: &str = "https://www.linkedin.com";

/// Default worksheet name (matches what spreadsheet tools create for a new sheet).
pub const DEFAULT_SHEET_NAME: &str = "Sheet1";

/// Configuration options for conversion.
///
/// All fields are public for easy configuration. Use `Default::default()`
/// for standard settings.
///
/// # Example
///
/// ```rust
/// use linkedin_activity_export::{Mode, Options};
///
/// // Use defaults
/// let options = Options::default();
///
/// // Force comments mode regardless of what the page says
/// let options = Options {
///     mode: Some(Mode::Comments),
///     ..Options::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Options {
    /// Export mode override.
    ///
    /// When `None`, the mode is detected from the page's own
    /// "Loaded N ... posts" status text.
    ///
    /// Default: `None`
    pub mode: Option<Mode>,

    /// Origin used to make relative post links absolute.
    ///
    /// Default: `"https://www.linkedin.com"`
    pub base_url: String,

    /// Drop comment rows that repeat an earlier (comment, date) pair.
    ///
    /// Default: `true`
    pub deduplicate_comments: bool,

    /// Name of the single worksheet in the exported workbook.
    ///
    /// Default: `"Sheet1"`
    pub sheet_name: String,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            mode: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            deduplicate_comments: true,
            sheet_name: DEFAULT_SHEET_NAME.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_detect_mode_and_deduplicate() {
        let options = Options::default();
        assert!(options.mode.is_none());
        assert!(options.deduplicate_comments);
        assert_eq!(options.base_url, "https://www.linkedin.com");
        assert_eq!(options.sheet_name, "Sheet1");
    }
}
