//! Reaction ("likes") count extraction.
//!
//! LinkedIn renders the reaction count in several shapes depending on page
//! version and locale. The shapes are tried as an ordered rule list; the first
//! rule that yields a number wins and `0` is the fallback.

use tracing::trace;

use crate::decode::{first_count, parse_count};
use crate::dom::Fragment;
use crate::patterns::{
    AND_OTHERS, COUNT_BEFORE_ENGAGEMENT, REACTION_CLUSTER, REACTION_COUNT_SELECTOR,
    SOCIAL_COUNT_SELECTOR,
};

/// One likes rule: `Some(count)` when the rule recognizes its shape.
pub type LikesRule<N> = fn(&N) -> Option<u64>;

/// Rules in precedence order.
#[must_use]
pub fn likes_rules<N: Fragment>() -> [(&'static str, LikesRule<N>); 4] {
    [
        ("reaction label", reaction_label::<N>),
        ("count element", count_element::<N>),
        ("reaction cluster", reaction_cluster::<N>),
        ("count before engagement", count_before_engagement::<N>),
    ]
}

/// Reaction count of a fragment (a post, or a single comment entity).
#[must_use]
pub fn extract_likes<N: Fragment>(node: &N) -> u64 {
    for (name, rule) in likes_rules::<N>() {
        if let Some(count) = rule(node) {
            trace!(rule = name, count, "likes rule matched");
            return count;
        }
    }
    0
}

/// Rule 1: an element labelled or worded with "reaction".
///
/// `aria-label` is checked first since it usually holds the exact number
/// ("1,204 reactions"). Otherwise the first element whose own text mentions
/// reactions is used, reading the number from its whole text.
pub fn reaction_label<N: Fragment>(node: &N) -> Option<u64> {
    for el in node.query_selector_all("[aria-label]") {
        let label = el.get_attribute("aria-label").unwrap_or_default();
        if label.to_lowercase().contains("reaction") {
            if let Some(count) = first_count(&label).or_else(|| first_count(&el.text_content())) {
                return Some(count);
            }
        }
    }

    node.query_selector_all("*")
        .into_iter()
        .filter(|el| el.own_text().to_lowercase().contains("reaction"))
        .find_map(|el| first_count(&el.text_content()))
}

/// Rule 2: the dedicated reaction counter, else a generic social counter.
///
/// "Jane Doe and 41 others" prefers the number after "and".
pub fn count_element<N: Fragment>(node: &N) -> Option<u64> {
    for selector in [REACTION_COUNT_SELECTOR, SOCIAL_COUNT_SELECTOR] {
        let Some(el) = node.query_selector(selector) else {
            continue;
        };
        let text = el.text_content();
        let count = AND_OTHERS
            .captures(&text)
            .and_then(|caps| caps.get(1))
            .map(|m| parse_count(m.as_str()))
            .or_else(|| first_count(&text));
        if count.is_some() {
            return count;
        }
    }
    None
}

/// Rule 3: reaction names followed by a count ("Like Celebrate 57").
pub fn reaction_cluster<N: Fragment>(node: &N) -> Option<u64> {
    let text = node.text_content();
    REACTION_CLUSTER
        .captures(&text)
        .and_then(|caps| caps.get(1))
        .map(|m| parse_count(m.as_str()))
}

/// Rule 4: a count right before comments/others/reposts/shares.
pub fn count_before_engagement<N: Fragment>(node: &N) -> Option<u64> {
    let text = node.text_content();
    COUNT_BEFORE_ENGAGEMENT
        .captures(&text)
        .and_then(|caps| caps.get(1))
        .map(|m| parse_count(m.as_str()))
}
