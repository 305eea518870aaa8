//! Comment record parser.
//!
//! On the comments tab every update is the post that was commented on, with
//! a header naming the commenter ("Jane Doe commented on this" or "Jane Doe
//! replied to Sam Lee’s comment") and the comment thread underneath. The
//! parser finds the commenter's own comment entity in the thread and works out
//! what it responds to.

use crate::decode::date_parts_from_url;
use crate::dom::{Fragment, Scoped};
use crate::extractor::{extract_likes, resolve_post_url};
use crate::options::Options;
use crate::patterns::{
    COMMENT_ACTION, COMMENT_AUTHOR_SELECTOR, COMMENT_ENTITY_SELECTOR, COMMENT_TEXT_SELECTOR,
    CONTROL_MENU_AUTHOR, CONTROL_MENU_SELECTOR, HEADER_REPLY, HEADER_SELECTOR,
    POST_BODY_SELECTOR, WHITESPACE_NORMALIZE,
};
use crate::record::{CommentKind, CommentRecord, DateParts};

/// True if the update's header describes a comment or a reply.
#[must_use]
pub fn is_comment_update<N: Fragment>(fragment: &N) -> bool {
    COMMENT_ACTION.is_match(&header_text(fragment))
}

/// Build the comment record for one update.
#[must_use]
pub fn parse_comment<N: Fragment>(fragment: &N, options: &Options) -> CommentRecord {
    let header = fragment.query_selector(HEADER_SELECTOR);
    let header_text = header.as_ref().map(Fragment::text_content).unwrap_or_default();

    let commenter = header
        .as_ref()
        .and_then(|h| h.query_selector("a"))
        .map(|a| normalize_name(&a.text_content()))
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| commenter_from_header(&header_text));

    let url = resolve_post_url(fragment, &options.base_url);
    let when = date_parts_from_url(&url).unwrap_or_else(DateParts::empty);

    let replied_to = HEADER_REPLY
        .captures(&header_text)
        .and_then(|caps| caps.get(1))
        .map(|m| normalize_name(m.as_str().trim_end_matches(['’', '\''])))
        .filter(|name| !name.is_empty());

    // Replies nest inside the entity they answer; each entity only sees its
    // own author, text and reactions.
    let entities: Vec<Scoped<N>> = fragment
        .query_selector_all(COMMENT_ENTITY_SELECTOR)
        .into_iter()
        .map(|entity| Scoped::new(entity, COMMENT_ENTITY_SELECTOR))
        .collect();
    let own: Vec<&Scoped<N>> = entities
        .iter()
        .filter(|entity| same_person(&entity_author(*entity), &commenter))
        .collect();

    // A reply is rendered below the comment it answers, so the newest of the
    // commenter's entities is the reply itself.
    let selected = if replied_to.is_some() {
        own.last()
    } else {
        own.first()
    };

    let (comment, likes) = selected
        .map(|entity| (entity_text(*entity), extract_likes(*entity)))
        .unwrap_or_default();

    let (kind, in_response_to) = match replied_to {
        Some(person) => {
            let target = entities
                .iter()
                .find(|entity| same_person(&entity_author(*entity), &person))
                .map(entity_text)
                .unwrap_or_default();
            (CommentKind::Reply(person), target)
        }
        None => {
            let kind = match post_author(fragment) {
                Some(author) if same_person(&author, &commenter) => CommentKind::OwnPost,
                Some(author) => CommentKind::AuthorPost(author),
                None => CommentKind::Post,
            };
            let target = fragment
                .query_selector(POST_BODY_SELECTOR)
                .map(|body| body.text_content())
                .unwrap_or_default();
            (kind, target)
        }
    };

    CommentRecord {
        comment,
        when,
        likes,
        kind,
        in_response_to,
        url,
    }
}

fn header_text<N: Fragment>(fragment: &N) -> String {
    fragment
        .query_selector(HEADER_SELECTOR)
        .map(|h| h.text_content())
        .unwrap_or_default()
}

/// Name in front of the action phrase when the header has no profile link.
fn commenter_from_header(header: &str) -> String {
    COMMENT_ACTION
        .find(header)
        .map(|m| normalize_name(&header[..m.start()]))
        .unwrap_or_default()
}

/// Author named by the control-menu trigger ("Open control menu for post by Jane Doe").
fn post_author<N: Fragment>(fragment: &N) -> Option<String> {
    fragment
        .query_selector_all(CONTROL_MENU_SELECTOR)
        .into_iter()
        .filter_map(|button| button.get_attribute("aria-label"))
        .find_map(|label| {
            CONTROL_MENU_AUTHOR
                .captures(&label)
                .and_then(|caps| caps.get(1))
                .map(|m| normalize_name(m.as_str()))
        })
        .filter(|name| !name.is_empty())
}

fn entity_author<N: Fragment>(entity: &N) -> String {
    entity
        .query_selector(COMMENT_AUTHOR_SELECTOR)
        .map(|el| normalize_name(&el.text_content()))
        .unwrap_or_default()
}

fn entity_text<N: Fragment>(entity: &N) -> String {
    entity
        .query_selector(COMMENT_TEXT_SELECTOR)
        .map(|el| el.text_content())
        .unwrap_or_default()
}

fn normalize_name(name: &str) -> String {
    WHITESPACE_NORMALIZE.replace_all(name.trim(), " ").into_owned()
}

fn same_person(a: &str, b: &str) -> bool {
    !a.is_empty() && a.to_lowercase() == b.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom;

    fn entity(author: &str, text: &str, reactions: u32) -> String {
        format!(
            r#"<article class="comments-comment-entity">
                <span class="comments-comment-meta__description-title">{author}</span>
                <div class="comments-comment-item__main-content">{text}</div>
                <button aria-label="{reactions} Reactions on {author}'s comment">{reactions}</button>
            </article>"#
        )
    }

    fn update(header: &str, menu_label: &str, entities: &[String]) -> String {
        format!(
            r#"<div id="u" class="feed-shared-update-v2" data-urn="urn:li:activity:7123456789012345678">
                <div class="update-components-header">{header}</div>
                <button class="feed-shared-control-menu__trigger" aria-label="{menu_label}"></button>
                <div class="feed-shared-update-v2__description">The original post body</div>
                {}
            </div>"#,
            entities.join("\n")
        )
    }

    fn parse(html: &str) -> CommentRecord {
        let doc = dom::parse(html);
        parse_comment(&doc.select("#u"), &Options::default())
    }

    #[test]
    fn direct_comment_on_someone_elses_post() {
        let html = update(
            r#"<a href="/in/jane/">Jane Doe</a> commented on this"#,
            "Open control menu for post by Sam Lee",
            &[entity("Ann Other", "First!", 1), entity("Jane Doe", "Great insight", 3)],
        );
        let record = parse(&html);

        assert_eq!(record.comment, "Great insight");
        assert_eq!(record.likes, 3);
        assert_eq!(record.kind, CommentKind::AuthorPost("Sam Lee".into()));
        assert_eq!(record.in_response_to, "The original post body");
        assert_eq!(record.when.date.len(), 10);
        assert!(record.url.ends_with("urn:li:activity:7123456789012345678/"));
    }

    #[test]
    fn direct_comment_on_own_post() {
        let html = update(
            r#"<a href="/in/jane/">Jane Doe</a> commented on this"#,
            "Open control menu for post by jane doe",
            &[entity("Jane Doe", "Thanks everyone", 0)],
        );
        assert_eq!(parse(&html).kind, CommentKind::OwnPost);
    }

    #[test]
    fn direct_comment_without_author() {
        let html = update(
            r#"<a href="/in/jane/">Jane Doe</a> commented on this"#,
            "Open control menu",
            &[entity("Jane Doe", "Nice", 0)],
        );
        assert_eq!(parse(&html).kind, CommentKind::Post);
    }

    #[test]
    fn reply_takes_last_own_entity_and_parent_text() {
        let html = update(
            r#"<a href="/in/jane/">Jane Doe</a> replied to Sam Lee’s comment"#,
            "Open control menu for post by Pat Poster",
            &[
                entity("Jane Doe", "Earlier comment", 2),
                entity("Sam Lee", "What do you think?", 5),
                entity("Jane Doe", "I agree with you", 7),
            ],
        );
        let record = parse(&html);

        assert_eq!(record.kind, CommentKind::Reply("Sam Lee".into()));
        assert_eq!(record.kind.to_string(), "Reply to Sam Lee");
        assert_eq!(record.comment, "I agree with you");
        assert_eq!(record.likes, 7);
        assert_eq!(record.in_response_to, "What do you think?");
    }

    #[test]
    fn reply_to_missing_parent_has_empty_target() {
        let html = update(
            r#"<a href="/in/jane/">Jane Doe</a> replied to Sam Lee's comment"#,
            "",
            &[entity("Jane Doe", "Indeed", 0)],
        );
        let record = parse(&html);
        assert_eq!(record.kind, CommentKind::Reply("Sam Lee".into()));
        assert_eq!(record.in_response_to, "");
        assert_eq!(record.comment, "Indeed");
    }

    #[test]
    fn no_matching_entity_gives_empty_comment() {
        let html = update(
            r#"<a href="/in/jane/">Jane Doe</a> commented on this"#,
            "Open control menu for post by Sam Lee",
            &[entity("Ann Other", "Not hers", 9)],
        );
        let record = parse(&html);
        assert_eq!(record.comment, "");
        assert_eq!(record.likes, 0);
    }

    #[test]
    fn commenter_from_plain_header() {
        assert_eq!(commenter_from_header("Jane  Doe commented on this"), "Jane Doe");
        assert_eq!(commenter_from_header("Jane Doe replied to Sam’s comment"), "Jane Doe");
        assert_eq!(commenter_from_header("Jane Doe likes this"), "");
    }

    #[test]
    fn commenter_with_non_ascii_name() {
        assert_eq!(commenter_from_header("İlker Can commented on this"), "İlker Can");

        let html = update(
            "İlker Can commented on this",
            "Open control menu for post by Sam Lee",
            &[entity("Ann Other", "Tebrikler", 1), entity("İlker Can", "Merhaba", 2)],
        );
        let record = parse(&html);
        assert_eq!(record.comment, "Merhaba");
        assert_eq!(record.likes, 2);
    }

    /// Top-level comment by `author` with one nested reply by someone else.
    fn threaded(author: &str, text: &str, reply: &str) -> String {
        format!(
            r#"<article class="comments-comment-entity">
                <span class="comments-comment-meta__description-title">{author}</span>
                <div class="comments-comment-item__main-content">{text}</div>
                <div class="comments-replies-list">{reply}</div>
            </article>"#
        )
    }

    #[test]
    fn parent_comment_ignores_reactions_of_nested_reply() {
        let html = update(
            r#"<a href="/in/jane/">Jane Doe</a> commented on this"#,
            "Open control menu for post by Pat Poster",
            &[threaded("Jane Doe", "My comment", &entity("Sam Lee", "Good point", 9))],
        );
        let record = parse(&html);
        assert_eq!(record.comment, "My comment");
        assert_eq!(record.likes, 0);
    }

    #[test]
    fn parent_comment_ignores_counts_in_nested_reply_text() {
        let reply = r#"<article class="comments-comment-entity">
                <span class="comments-comment-meta__description-title">Sam Lee</span>
                <div class="comments-comment-item__main-content">Seen 4 others say so</div>
            </article>"#;
        let html = update(
            r#"<a href="/in/jane/">Jane Doe</a> commented on this"#,
            "Open control menu for post by Pat Poster",
            &[threaded("Jane Doe", "My comment", reply)],
        );
        assert_eq!(parse(&html).likes, 0);
    }

    #[test]
    fn nested_reply_keeps_its_own_reactions() {
        let html = update(
            r#"<a href="/in/jane/">Jane Doe</a> replied to Sam Lee’s comment"#,
            "Open control menu for post by Pat Poster",
            &[threaded("Sam Lee", "What do you think?", &entity("Jane Doe", "Agreed", 3))],
        );
        let record = parse(&html);
        assert_eq!(record.comment, "Agreed");
        assert_eq!(record.likes, 3);
        assert_eq!(record.in_response_to, "What do you think?");
    }

    #[test]
    fn missing_id_leaves_date_empty() {
        let doc = dom::parse(
            r#"<div id="u"><div class="update-components-header">Jane Doe commented on this</div></div>"#,
        );
        let record = parse_comment(&doc.select("#u"), &Options::default());
        assert!(record.when.is_empty());
        assert_eq!(record.url, "");
    }

    #[test]
    fn comment_update_detection() {
        let doc = dom::parse(
            r#"<div id="a"><div class="update-components-header">Jane Doe Commented on this</div></div>
               <div id="b"><div class="update-components-header">Jane Doe reposted this</div></div>
               <div id="c"><p>No header</p></div>"#,
        );
        assert!(is_comment_update(&doc.select("#a")));
        assert!(!is_comment_update(&doc.select("#b")));
        assert!(!is_comment_update(&doc.select("#c")));
    }
}
