//! Post URL resolution.

use crate::dom::Fragment;
use crate::patterns::ENTITY_ID_ATTRS;
use crate::url_utils::{absolute_url, canonical_post_url};

/// Canonical URL of the post a fragment shows.
///
/// Order of preference:
/// 1. the activity URN carried on the fragment itself (`data-urn`, `data-id`)
/// 2. the first link to `/feed/update/` or `/posts/`, query stripped and made
///    absolute against `base_url`
/// 3. empty string
#[must_use]
pub fn resolve_post_url<N: Fragment>(node: &N, base_url: &str) -> String {
    for attr in ENTITY_ID_ATTRS {
        if let Some(value) = node.get_attribute(attr) {
            if !value.trim().is_empty() {
                return canonical_post_url(&value);
            }
        }
    }

    node.query_selector_all("a[href]")
        .into_iter()
        .filter_map(|a| a.get_attribute("href"))
        .find(|href| href.contains("/feed/update/") || href.contains("/posts/"))
        .map(|href| absolute_url(&href, base_url))
        .unwrap_or_default()
}
