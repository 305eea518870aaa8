//! Field extractors.
//!
//! Each extractor reads one typed field from an activity fragment through the
//! [`Fragment`](crate::dom::Fragment) trait and never fails: missing evidence
//! yields a default.
//!
//! # Module Structure
//!
//! - `likes`: reaction count, as an ordered rule chain
//! - `counts`: "N comments" / "N reposts" style counts
//! - `images`: content images outside the author/avatar region
//! - `format`: post format classifier, as an ordered rule table
//! - `link`: canonical post URL of a fragment

pub mod counts;
pub mod format;
pub mod images;
pub mod likes;
pub mod link;

pub use counts::{comment_count, count_before, share_count};
pub use format::{classify, FormatSignals};
pub use images::content_images;
pub use likes::extract_likes;
pub use link::resolve_post_url;
