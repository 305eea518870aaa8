//! Compiled regex patterns and CSS selectors for LinkedIn activity pages.
//!
//! All patterns are compiled once at first use via `LazyLock`.
//! LinkedIn's class names change often; every selector here is a list of the
//! variants seen in saved pages, so one missing class does not break a field.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

// =============================================================================
// Number Patterns
// =============================================================================

/// A count as written in the UI: digits with `,` `.` NBSP or narrow NBSP
/// separators, optionally followed by a K/M/B magnitude suffix.
pub const NUM: &str = r"\d[\d.,\x{00A0}\x{202F}]*(?:[KMBkmb]\b)?";

/// First count anywhere in a string.
pub static NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!("({NUM})")).expect("NUMBER regex"));

/// A run of exactly 19 digits (snowflake-style activity id).
pub static ID19: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|\D)(\d{19})(?:\D|$)").expect("ID19 regex"));

// =============================================================================
// Engagement Patterns
// =============================================================================

/// Reaction names LinkedIn prints next to the reaction count.
pub const REACTIONS: &str =
    "like|celebrate|support|love|insightful|curious|funny|applaud|praise|interest";

/// One or more reaction names followed by a count ("Like Celebrate 42").
pub static REACTION_CLUSTER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)(?:\b(?:{REACTIONS})\s+)+({NUM})")).expect("REACTION_CLUSTER regex")
});

/// "and 23 others" inside a social-proof line.
pub static AND_OTHERS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)\band\s+({NUM})\s+others?\b")).expect("AND_OTHERS regex")
});

/// A count followed by an engagement noun.
pub static COUNT_BEFORE_ENGAGEMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)({NUM})\s*(?:comments?|others|reposts?|shares?)\b"))
        .expect("COUNT_BEFORE_ENGAGEMENT regex")
});

/// A count followed by "comment(s)".
pub static COMMENT_COUNT: LazyLock<Regex> = LazyLock::new(|| count_before_keyword("comments?"));

/// A count followed by "repost(s)" or "share(s)".
pub static SHARE_COUNT: LazyLock<Regex> =
    LazyLock::new(|| count_before_keyword("reposts?|shares?"));

/// Build a "count, optional separators, keyword" pattern.
///
/// The count is capture group 1.
#[must_use]
pub fn count_before_keyword(keyword: &str) -> Regex {
    Regex::new(&format!(r"(?i)({NUM})[\s·•|,:\-]*(?:{keyword})\b"))
        .expect("count-before-keyword regex")
}

// =============================================================================
// Header / Attribution Patterns
// =============================================================================

/// Header phrase marking a comment or reply, case-insensitive.
pub static COMMENT_ACTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)commented on|replied to").expect("COMMENT_ACTION regex"));

/// "replied to Jane Doe’s comment", capturing the person.
pub static HEADER_REPLY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)replied to\s+(.+?)(?:['’]s)?\s+comment").expect("HEADER_REPLY regex")
});

/// "... post by Jane Doe" in the control-menu trigger label.
pub static CONTROL_MENU_AUTHOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)post by\s+(.+)").expect("CONTROL_MENU_AUTHOR regex"));

/// Lazy-loading status text that tells which activity tab was saved.
pub static LOADED_STATUS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Loaded\s+\d+\s+(Comments|Posts)\s+posts").expect("LOADED_STATUS regex")
});

/// Person name inside a saved-page filename ("Activity | Jane Doe | LinkedIn").
pub static FILENAME_PERSON: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)activity[\s_|\-–—:]*(.+?)[\s_|\-–—:]*linkedin")
        .expect("FILENAME_PERSON regex")
});

// =============================================================================
// Format Patterns
// =============================================================================

/// Poll wording (open or closed poll).
pub static POLL_TEXT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(author can see how you vote|poll closed)").expect("POLL_TEXT regex")
});

/// Document viewer wording.
pub static DOCUMENT_TEXT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(loading document|document loaded|download)").expect("DOCUMENT_TEXT regex")
});

/// Matches multiple whitespace characters for normalization.
pub static WHITESPACE_NORMALIZE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("WHITESPACE_NORMALIZE regex"));

// =============================================================================
// CSS Selectors
// =============================================================================

/// One activity update (post, repost, or the wrapper of a comment).
pub const UPDATE_SELECTOR: &str = "div.feed-shared-update-v2";

/// Header line above an update ("Jane Doe commented on this").
pub const HEADER_SELECTOR: &str = ".update-components-header, .feed-shared-header";

/// Caption spans of a post.
pub const CAPTION_SELECTOR: &str =
    ".update-components-text span.break-words, .feed-shared-text span.break-words";

/// Post body container, used as the target of a direct comment.
pub const POST_BODY_SELECTOR: &str =
    ".feed-shared-update-v2__description, .update-components-update-v2__commentary, .feed-shared-inline-show-more-text";

/// Author metadata block; a repost with copy has one per author.
pub const ACTOR_META_SELECTOR: &str = ".update-components-actor__meta, .feed-shared-actor__meta";

/// Class fragment marking the author/avatar region.
pub const ACTOR_CLASS: &str = "actor";

/// Embedded LinkedIn article card.
pub const ARTICLE_SELECTOR: &str = ".update-components-article, .feed-shared-article";

/// Document / carousel viewer.
pub const DOCUMENT_SELECTOR: &str =
    ".update-components-document, .feed-shared-document, .document-s-container, .update-components-carousel, .feed-shared-carousel";

/// Native video player.
pub const VIDEO_SELECTOR: &str =
    "video, .update-components-linkedin-video, .feed-shared-linkedin-video";

/// Images that carry post content.
pub const CONTENT_IMAGE_SELECTOR: &str = ".update-components-image img, .feed-shared-image img, img.update-components-image__image, img.ivm-view-attr__img--centered";

/// Dedicated reaction counter.
pub const REACTION_COUNT_SELECTOR: &str =
    ".social-details-social-counts__reactions-count, .social-details-social-counts__reactions";

/// Generic social counter.
pub const SOCIAL_COUNT_SELECTOR: &str =
    ".social-details-social-counts__social-proof-fallback-number, .social-details-social-counts__count-value, [class*='social-counts__count']";

/// Attributes holding the activity URN on an update.
pub const ENTITY_ID_ATTRS: &[&str] = &["data-urn", "data-id"];

/// One comment (or reply) inside an update.
pub const COMMENT_ENTITY_SELECTOR: &str = ".comments-comment-entity, .comments-comment-item";

/// Author name inside a comment entity.
pub const COMMENT_AUTHOR_SELECTOR: &str =
    ".comments-comment-meta__description-title, .comments-post-meta__name-text, .comments-comment-item__post-meta a";

/// Comment body inside a comment entity.
pub const COMMENT_TEXT_SELECTOR: &str =
    ".comments-comment-item__main-content, .comments-comment-entity__content";

/// The "..." control-menu button, labelled with the post author.
pub const CONTROL_MENU_SELECTOR: &str =
    ".feed-shared-control-menu__trigger, button[aria-label*='control menu']";
