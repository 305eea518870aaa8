//! Content image collection.

use crate::dom::Fragment;
use crate::patterns::{ACTOR_CLASS, CONTENT_IMAGE_SELECTOR};

/// Images that belong to the post body.
///
/// Avatars use the same image classes as content, so anything nested inside
/// the author/avatar region is dropped.
#[must_use]
pub fn content_images<N: Fragment>(node: &N) -> Vec<N> {
    node.query_selector_all(CONTENT_IMAGE_SELECTOR)
        .into_iter()
        .filter(|img| !img.has_ancestor_class(ACTOR_CLASS))
        .collect()
}
