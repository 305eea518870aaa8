//! Record parsers: one activity fragment in, one record out.

pub mod comment;
pub mod post;

pub use comment::{is_comment_update, parse_comment};
pub use post::parse_post;
