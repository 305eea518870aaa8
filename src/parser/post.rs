//! Post record parser.

use crate::decode::date_parts_from_url;
use crate::dom::Fragment;
use crate::extractor::{classify, comment_count, extract_likes, resolve_post_url, share_count};
use crate::options::Options;
use crate::patterns::CAPTION_SELECTOR;
use crate::record::{DateParts, PostRecord};

/// Build the record for one feed update.
///
/// The date comes from the activity id in the post URL; when the page gives
/// no id the post is dated today with an empty time.
#[must_use]
pub fn parse_post<N: Fragment>(fragment: &N, options: &Options) -> PostRecord {
    let caption = fragment
        .query_selector_all(CAPTION_SELECTOR)
        .iter()
        .map(Fragment::text_content)
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    let url = resolve_post_url(fragment, &options.base_url);
    let when = date_parts_from_url(&url).unwrap_or_else(DateParts::today);

    let text = fragment.text_content();

    PostRecord {
        caption,
        when,
        likes: extract_likes(fragment),
        comments: comment_count(&text),
        shares: share_count(&text),
        format: classify(fragment),
        url,
    }
}
