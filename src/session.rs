//! Conversion session.
//!
//! A [`Session`] drives one user-triggered conversion at a time. Its state
//! tells a front end whether the trigger control should be enabled and what
//! happened to the last attempt.
//!
//! ```text
//! Idle ──begin──▶ Running ──finish(ok)──▶ Done
//!                    │
//!                    └────finish(err)───▶ Failed
//! ```
//!
//! `Done` and `Failed` accept a new `begin`; `Running` refuses it with
//! [`Error::Busy`].

use std::ffi::OsStr;
use std::path::Path;

use chrono::{Local, NaiveDateTime};
use tracing::{debug, error};

use crate::error::{Error, Result};
use crate::export::write_records;
use crate::options::Options;
use crate::patterns::{FILENAME_PERSON, WHITESPACE_NORMALIZE};
use crate::record::Mode;

/// Person placeholder when the source filename names nobody.
const DEFAULT_PERSON: &str = "output";

/// Where a session is in its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    /// Nothing has run yet.
    #[default]
    Idle,
    /// A conversion is in progress; the trigger is disabled.
    Running,
    /// The last conversion produced a workbook.
    Done {
        /// Mode the page was converted in.
        mode: Mode,
        /// Rows written to the sheet.
        rows: usize,
    },
    /// The last conversion failed with this message.
    Failed(String),
}

/// A finished conversion, ready to be saved or offered for download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    /// XLSX workbook bytes.
    pub bytes: Vec<u8>,
    /// Suggested download name.
    pub filename: String,
    /// Mode the page was converted in.
    pub mode: Mode,
    /// Rows written to the sheet.
    pub rows: usize,
}

/// Single-attempt conversion driver.
#[derive(Debug, Default)]
pub struct Session {
    options: Options,
    state: SessionState,
}

impl Session {
    #[must_use]
    pub fn new(options: Options) -> Self {
        Self {
            options,
            state: SessionState::Idle,
        }
    }

    #[must_use]
    pub const fn state(&self) -> &SessionState {
        &self.state
    }

    #[must_use]
    pub const fn options(&self) -> &Options {
        &self.options
    }

    /// Whether the trigger control may be used. False exactly while running.
    #[must_use]
    pub const fn control_enabled(&self) -> bool {
        !matches!(self.state, SessionState::Running)
    }

    /// Enter `Running`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Busy`] if a conversion is already running.
    pub fn begin(&mut self) -> Result<()> {
        if self.state == SessionState::Running {
            return Err(Error::Busy);
        }
        self.state = SessionState::Running;
        Ok(())
    }

    /// Leave `Running` with the outcome of the attempt.
    pub fn finish(&mut self, outcome: &Result<Download>) {
        self.state = match outcome {
            Ok(download) => SessionState::Done {
                mode: download.mode,
                rows: download.rows,
            },
            Err(err) => SessionState::Failed(err.to_string()),
        };
    }

    /// Convert one saved page.
    ///
    /// `source_name` is the name of the file the HTML came from; it only
    /// feeds the suggested download filename. The session always leaves
    /// `Running` before this returns.
    ///
    /// # Errors
    ///
    /// [`Error::Busy`] if another conversion is running, otherwise any
    /// conversion error (most commonly [`Error::EmptyResult`]).
    pub fn run(&mut self, html: &str, source_name: &str) -> Result<Download> {
        self.begin()?;
        let outcome = self.convert(html, source_name);
        if let Err(err) = &outcome {
            error!(source = source_name, error = ?err, "conversion failed");
        }
        self.finish(&outcome);
        outcome
    }

    fn convert(&self, html: &str, source_name: &str) -> Result<Download> {
        let records = crate::extract_with_options(html, &self.options)?;
        let bytes = write_records(&records, &self.options.sheet_name)?;
        let mode = records.mode();
        let filename = suggested_filename(mode, source_name, Local::now().naive_local());
        debug!(%mode, rows = records.len(), %filename, "conversion finished");
        Ok(Download {
            bytes,
            filename,
            mode,
            rows: records.len(),
        })
    }
}

/// Default download name: `social_{mode}_{YYYYmmdd_HHMMSS}_{person}.xlsx`.
///
/// The person comes from a saved-page name such as
/// `"Activity | Jane Doe | LinkedIn.html"`, with whitespace replaced by `_`.
#[must_use]
pub fn suggested_filename(mode: Mode, source_name: &str, now: NaiveDateTime) -> String {
    format!(
        "social_{mode}_{}_{}.xlsx",
        now.format("%Y%m%d_%H%M%S"),
        person_from_source(source_name)
    )
}

fn person_from_source(source_name: &str) -> String {
    let file_name = Path::new(source_name)
        .file_name()
        .and_then(OsStr::to_str)
        .unwrap_or(source_name);

    FILENAME_PERSON
        .captures(file_name)
        .and_then(|caps| caps.get(1))
        .map(|m| WHITESPACE_NORMALIZE.replace_all(m.as_str().trim(), "_").into_owned())
        .filter(|person| !person.is_empty())
        .unwrap_or_else(|| DEFAULT_PERSON.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn noon() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 17)
            .and_then(|d| d.and_hms_opt(12, 30, 5))
            .unwrap_or_default()
    }

    #[test]
    fn filename_with_person() {
        assert_eq!(
            suggested_filename(Mode::Posts, "Activity | Jane Doe | LinkedIn.html", noon()),
            "social_posts_20240517_123005_Jane_Doe.xlsx"
        );
        assert_eq!(
            suggested_filename(
                Mode::Comments,
                "/home/me/Downloads/(3) Comments Activity _ Mary Ann  Smith _ LinkedIn.htm",
                noon()
            ),
            "social_comments_20240517_123005_Mary_Ann_Smith.xlsx"
        );
    }

    #[test]
    fn filename_defaults_to_output() {
        assert_eq!(
            suggested_filename(Mode::Posts, "saved.html", noon()),
            "social_posts_20240517_123005_output.xlsx"
        );
    }

    #[test]
    fn control_disabled_only_while_running() {
        let mut session = Session::default();
        assert!(session.control_enabled());

        session.begin().unwrap();
        assert!(!session.control_enabled());
        assert!(matches!(session.begin(), Err(Error::Busy)));
        assert!(matches!(session.run("<html></html>", "x.html"), Err(Error::Busy)));
        assert_eq!(session.state(), &SessionState::Running);

        session.finish(&Err(Error::EmptyResult));
        assert!(session.control_enabled());
    }

    #[test]
    fn empty_page_fails_and_reenables() {
        let mut session = Session::default();
        let result = session.run("<html><body><p>Nothing</p></body></html>", "page.html");
        assert!(matches!(result, Err(Error::EmptyResult)));
        assert!(matches!(session.state(), SessionState::Failed(msg) if msg.starts_with("No data found")));
        assert!(session.control_enabled());
    }
}
