//! Primitive decoders.
//!
//! These never fail. Malformed input degrades to `0`, empty strings, or
//! today's date so one odd fragment cannot abort a whole page.

use chrono::{DateTime, Utc};

use crate::patterns::{ID19, NUMBER};
use crate::record::DateParts;

/// Parse a count written the way LinkedIn displays it.
///
/// Thousands separators (`,`, NBSP, narrow NBSP) are dropped, a trailing
/// K/M/B (any case) scales the value, and the result is truncated.
/// Without a suffix only the digits are kept. Garbage yields `0`.
///
/// # Example
///
/// ```rust
/// use linkedin_activity_export::decode::parse_count;
///
/// assert_eq!(parse_count("1,234"), 1234);
/// assert_eq!(parse_count("2.5K"), 2500);
/// assert_eq!(parse_count("n/a"), 0);
/// ```
#[must_use]
pub fn parse_count(raw: &str) -> u64 {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| !matches!(c, ',' | '\u{00A0}' | '\u{202F}'))
        .collect::<String>()
        .to_uppercase();

    let multiplier = match cleaned.chars().last() {
        Some('K') => Some(1_000.0),
        Some('M') => Some(1_000_000.0),
        Some('B') => Some(1_000_000_000.0),
        _ => None,
    };

    if let Some(multiplier) = multiplier {
        let number = cleaned[..cleaned.len() - 1].trim();
        return match number.parse::<f64>() {
            Ok(value) if value.is_finite() && value >= 0.0 => (value * multiplier) as u64,
            _ => 0,
        };
    }

    let digits: String = cleaned.chars().filter(char::is_ascii_digit).collect();
    digits.parse::<u64>().unwrap_or(0)
}

/// First count embedded anywhere in `text`.
#[must_use]
pub fn first_count(text: &str) -> Option<u64> {
    NUMBER
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| parse_count(m.as_str()))
}

/// The first 19-digit activity id in a URL or URN.
#[must_use]
pub fn id_from_url(url: &str) -> Option<u64> {
    ID19.captures(url)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<u64>().ok())
}

/// Creation time encoded in an activity id.
///
/// The id is time ordered: shifting it right by 22 bits gives milliseconds
/// since the Unix epoch.
#[must_use]
pub fn id_to_datetime(id: u64) -> Option<DateTime<Utc>> {
    let millis = i64::try_from(id >> 22).ok()?;
    DateTime::<Utc>::from_timestamp_millis(millis)
}

/// Date parts for the activity id in `url`, if there is one.
#[must_use]
pub fn date_parts_from_url(url: &str) -> Option<DateParts> {
    id_from_url(url)
        .and_then(id_to_datetime)
        .map(DateParts::from_datetime)
}
