//! Counts written before a keyword ("37 comments", "4 reposts").

use regex::Regex;

use crate::decode::parse_count;
use crate::patterns::{COMMENT_COUNT, SHARE_COUNT};

/// First count immediately followed by the keyword `pattern` matches.
///
/// `pattern` must put the number in capture group 1, as the patterns built by
/// [`count_before_keyword`](crate::patterns::count_before_keyword) do.
/// Returns `0` when nothing matches.
#[must_use]
pub fn count_before(text: &str, pattern: &Regex) -> u64 {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map_or(0, |m| parse_count(m.as_str()))
}

/// Number of comments mentioned in a fragment's text.
#[must_use]
pub fn comment_count(text: &str) -> u64 {
    count_before(text, &COMMENT_COUNT)
}

/// Number of reposts/shares mentioned in a fragment's text.
#[must_use]
pub fn share_count(text: &str) -> u64 {
    count_before(text, &SHARE_COUNT)
}
