//! Page-level orchestration.
//!
//! A saved activity page is a list of feed updates. This module finds them,
//! decides which tab was saved and turns each update into a record.

use std::collections::HashSet;

use tracing::debug;

use crate::dom::{Document, Fragment, Selection};
use crate::options::Options;
use crate::parser::{is_comment_update, parse_comment, parse_post};
use crate::patterns::{LOADED_STATUS, UPDATE_SELECTOR};
use crate::record::{CommentRecord, Mode, PostRecord};

/// Class shared by every update container.
const UPDATE_CLASS: &str = "feed-shared-update-v2";

/// Which tab a page was saved from.
///
/// Looks for the page's own status line ("Loaded 12 Comments posts"). Pages
/// without it are treated as posts.
#[must_use]
pub fn detect_mode(html: &str) -> Mode {
    let mode = match LOADED_STATUS.captures(html).and_then(|caps| caps.get(1)) {
        Some(m) if m.as_str().to_lowercase().starts_with("comment") => Mode::Comments,
        _ => Mode::Posts,
    };
    debug!(%mode, "detected page mode");
    mode
}

/// Top-level update containers, in document order.
///
/// Updates quoted inside another update (a repost with commentary) belong to
/// their outer update and are not returned on their own.
#[must_use]
pub fn update_fragments(doc: &Document) -> Vec<Selection<'_>> {
    doc.select(UPDATE_SELECTOR)
        .nodes()
        .iter()
        .map(|node| Selection::from(*node))
        .filter(|update| !update.has_ancestor_with_class(UPDATE_CLASS))
        .collect()
}

/// Lazily parse every update as a post.
pub fn posts<'a>(
    doc: &'a Document,
    options: &'a Options,
) -> impl Iterator<Item = PostRecord> + 'a {
    update_fragments(doc)
        .into_iter()
        .map(move |fragment| parse_post(&fragment, options))
}

/// Lazily parse every comment or reply update.
///
/// Updates whose header does not describe a comment are skipped.
pub fn comments<'a>(
    doc: &'a Document,
    options: &'a Options,
) -> impl Iterator<Item = CommentRecord> + 'a {
    update_fragments(doc)
        .into_iter()
        .filter(|fragment| is_comment_update(fragment))
        .map(move |fragment| parse_comment(&fragment, options))
}

/// Drop rows repeating an earlier (comment, date) pair, keeping the first.
#[must_use]
pub fn dedup_comments(records: Vec<CommentRecord>) -> Vec<CommentRecord> {
    let before = records.len();
    let mut seen = HashSet::new();
    let kept: Vec<CommentRecord> = records
        .into_iter()
        .filter(|record| seen.insert((record.comment.clone(), record.when.date.clone())))
        .collect();
    if kept.len() < before {
        debug!(dropped = before - kept.len(), "removed duplicate comments");
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom;
    use crate::record::{CommentKind, DateParts};

    fn comment(text: &str, date: &str, likes: u64) -> CommentRecord {
        CommentRecord {
            comment: text.into(),
            when: DateParts {
                date: date.into(),
                ..DateParts::default()
            },
            likes,
            kind: CommentKind::Post,
            in_response_to: String::new(),
            url: String::new(),
        }
    }

    #[test]
    fn mode_from_status_line() {
        assert_eq!(detect_mode("<p>Loaded 12 Comments posts</p>"), Mode::Comments);
        assert_eq!(detect_mode("<p>Loaded 5 Posts posts</p>"), Mode::Posts);
        assert_eq!(detect_mode("<p>nothing here</p>"), Mode::Posts);
    }

    #[test]
    fn nested_updates_are_not_separate_fragments() {
        let doc = dom::parse(
            r#"<div class="feed-shared-update-v2" id="a">
                <div class="feed-shared-update-v2" id="inner"></div>
            </div>
            <div class="feed-shared-update-v2" id="b"></div>"#,
        );
        let ids: Vec<String> = update_fragments(&doc)
            .iter()
            .filter_map(|f| f.get_attribute("id"))
            .collect();
        assert_eq!(ids, ["a", "b"]);
    }

    #[test]
    fn update_inside_element_with_derived_class_is_kept() {
        let doc = dom::parse(
            r#"<div class="feed-shared-update-v2__wrapper">
                <div class="feed-shared-update-v2" id="a"></div>
            </div>"#,
        );
        let ids: Vec<String> = update_fragments(&doc)
            .iter()
            .filter_map(|f| f.get_attribute("id"))
            .collect();
        assert_eq!(ids, ["a"]);
    }

    #[test]
    fn comments_skip_non_comment_updates() {
        let doc = dom::parse(
            r#"<div class="feed-shared-update-v2"><div class="update-components-header">Jane reposted this</div></div>
            <div class="feed-shared-update-v2"><div class="update-components-header">Jane commented on this</div></div>"#,
        );
        let options = Options::default();
        assert_eq!(posts(&doc, &options).count(), 2);
        assert_eq!(comments(&doc, &options).count(), 1);
    }

    #[test]
    fn dedup_keeps_first_of_equal_pairs() {
        let records = vec![
            comment("Nice", "2024-01-01", 1),
            comment("Nice", "2024-01-02", 2),
            comment("Nice", "2024-01-01", 3),
            comment("Other", "2024-01-01", 4),
        ];
        let likes: Vec<u64> = dedup_comments(records).iter().map(|r| r.likes).collect();
        assert_eq!(likes, [1, 2, 4]);
    }
}
