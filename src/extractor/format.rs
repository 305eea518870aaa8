//! Post format classification.
//!
//! Classification runs in two steps: [`FormatSignals::collect`] reads every
//! piece of DOM evidence once, then [`classify`] walks [`FORMAT_RULES`] in
//! order and returns the first verdict. Every signal set maps to exactly one
//! [`PostFormat`]; `Text` is the fallback.

use tracing::trace;

use crate::dom::Fragment;
use crate::extractor::images::content_images;
use crate::patterns::{
    ACTOR_META_SELECTOR, ARTICLE_SELECTOR, DOCUMENT_SELECTOR, DOCUMENT_TEXT, HEADER_SELECTOR,
    POLL_TEXT, VIDEO_SELECTOR,
};
use crate::record::PostFormat;
use crate::url_utils::{is_external_link, is_linkedin_article_link};

/// DOM evidence the format rules look at.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormatSignals {
    /// Full fragment text, lowercase.
    pub text: String,
    /// Header line text, lowercase.
    pub header: String,
    /// Number of author metadata blocks.
    pub actor_blocks: usize,
    /// An embedded article card is present.
    pub article_container: bool,
    /// A link to a LinkedIn `/pulse/` or `/articles/` page is present.
    pub article_link: bool,
    /// A document or carousel viewer is present.
    pub document_container: bool,
    /// Number of links pointing off LinkedIn.
    pub external_links: usize,
    /// A video element is present.
    pub video: bool,
    /// Number of content images (avatars excluded).
    pub content_images: usize,
}

impl FormatSignals {
    /// Read all signals from a fragment.
    #[must_use]
    pub fn collect<N: Fragment>(node: &N) -> Self {
        let hrefs: Vec<String> = node
            .query_selector_all("a[href]")
            .into_iter()
            .filter_map(|a| a.get_attribute("href"))
            .collect();

        Self {
            text: node.text_content().to_lowercase(),
            header: node
                .query_selector(HEADER_SELECTOR)
                .map(|h| h.text_content().to_lowercase())
                .unwrap_or_default(),
            actor_blocks: node.query_selector_all(ACTOR_META_SELECTOR).len(),
            article_container: node.query_selector(ARTICLE_SELECTOR).is_some(),
            article_link: hrefs.iter().any(|href| is_linkedin_article_link(href)),
            document_container: node.query_selector(DOCUMENT_SELECTOR).is_some(),
            external_links: hrefs.iter().filter(|href| is_external_link(href)).count(),
            video: node.query_selector(VIDEO_SELECTOR).is_some(),
            content_images: content_images(node).len(),
        }
    }
}

/// One format rule: `Some(format)` when the rule decides.
pub type FormatRule = fn(&FormatSignals) -> Option<PostFormat>;

/// Format rules in precedence order.
pub static FORMAT_RULES: &[(&str, FormatRule)] = &[
    ("poll", poll),
    ("repost", repost),
    ("repost with copy", repost_with_copy),
    ("article", article),
    ("carousel", carousel),
    ("link", link),
    ("video", video),
    ("image", image),
];

/// Format of a fragment.
#[must_use]
pub fn classify<N: Fragment>(node: &N) -> PostFormat {
    classify_signals(&FormatSignals::collect(node))
}

/// Format for already collected signals.
#[must_use]
pub fn classify_signals(signals: &FormatSignals) -> PostFormat {
    for (name, rule) in FORMAT_RULES {
        if let Some(format) = rule(signals) {
            trace!(rule = name, %format, "format rule matched");
            return format;
        }
    }
    PostFormat::Text
}

/// Rule 1: poll wording.
#[must_use]
pub fn poll(s: &FormatSignals) -> Option<PostFormat> {
    POLL_TEXT.is_match(&s.text).then_some(PostFormat::Poll)
}

/// Rule 2: "reposted this" header.
#[must_use]
pub fn repost(s: &FormatSignals) -> Option<PostFormat> {
    s.header.contains("reposted this").then_some(PostFormat::Repost)
}

/// Rule 3: more than one author block means a quoted post.
#[must_use]
pub fn repost_with_copy(s: &FormatSignals) -> Option<PostFormat> {
    (s.actor_blocks > 1).then_some(PostFormat::RepostWithCopy)
}

/// Rule 4: LinkedIn long-form article.
#[must_use]
pub fn article(s: &FormatSignals) -> Option<PostFormat> {
    (s.article_container || s.article_link).then_some(PostFormat::LinkedInArticle)
}

/// Rule 5: document viewer or its wording.
#[must_use]
pub fn carousel(s: &FormatSignals) -> Option<PostFormat> {
    (s.document_container || DOCUMENT_TEXT.is_match(&s.text)).then_some(PostFormat::Carousel)
}

/// Rule 6: external link without rich media.
#[must_use]
pub fn link(s: &FormatSignals) -> Option<PostFormat> {
    (s.external_links > 0 && !s.video && !s.document_container).then_some(PostFormat::Link)
}

/// Rule 7: native video.
#[must_use]
pub fn video(s: &FormatSignals) -> Option<PostFormat> {
    s.video.then_some(PostFormat::Video)
}

/// Rule 8: one image or several.
#[must_use]
pub fn image(s: &FormatSignals) -> Option<PostFormat> {
    match s.content_images {
        0 => None,
        1 => Some(PostFormat::Image),
        _ => Some(PostFormat::Images),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom;

    fn format_of(html: &str) -> PostFormat {
        let doc = dom::parse(html);
        classify(&doc.select("#post"))
    }

    #[test]
    fn poll_beats_everything() {
        let signals = FormatSignals {
            text: "which one? the author can see how you vote".into(),
            header: "jane reposted this".into(),
            actor_blocks: 2,
            video: true,
            content_images: 3,
            ..FormatSignals::default()
        };
        assert_eq!(classify_signals(&signals), PostFormat::Poll);
    }

    #[test]
    fn empty_signals_are_text() {
        assert_eq!(classify_signals(&FormatSignals::default()), PostFormat::Text);
    }

    #[test]
    fn each_rule_in_isolation() {
        let cases = [
            (FormatSignals { text: "poll closed".into(), ..Default::default() }, PostFormat::Poll),
            (FormatSignals { header: "sam reposted this".into(), ..Default::default() }, PostFormat::Repost),
            (FormatSignals { actor_blocks: 2, ..Default::default() }, PostFormat::RepostWithCopy),
            (FormatSignals { article_link: true, ..Default::default() }, PostFormat::LinkedInArticle),
            (FormatSignals { text: "loading document".into(), ..Default::default() }, PostFormat::Carousel),
            (FormatSignals { external_links: 1, ..Default::default() }, PostFormat::Link),
            (FormatSignals { video: true, ..Default::default() }, PostFormat::Video),
            (FormatSignals { content_images: 1, ..Default::default() }, PostFormat::Image),
            (FormatSignals { content_images: 4, ..Default::default() }, PostFormat::Images),
        ];
        for (signals, expected) in cases {
            assert_eq!(classify_signals(&signals), expected, "{signals:?}");
        }
    }

    #[test]
    fn external_link_with_video_is_video() {
        let signals = FormatSignals { external_links: 2, video: true, ..Default::default() };
        assert_eq!(classify_signals(&signals), PostFormat::Video);
    }

    #[test]
    fn classifies_from_dom() {
        assert_eq!(
            format_of(r#"<div id="post"><div class="update-components-header">Jane reposted this</div><p>x</p></div>"#),
            PostFormat::Repost
        );
        assert_eq!(
            format_of(
                r#"<div id="post">
                    <div class="update-components-actor__meta">Jane</div>
                    <div class="update-components-actor__meta">Sam</div>
                </div>"#
            ),
            PostFormat::RepostWithCopy
        );
        assert_eq!(
            format_of(r#"<div id="post"><a href="https://www.linkedin.com/pulse/my-story-jane">Read</a></div>"#),
            PostFormat::LinkedInArticle
        );
        assert_eq!(
            format_of(r#"<div id="post"><div class="document-s-container"></div></div>"#),
            PostFormat::Carousel
        );
        assert_eq!(
            format_of(r#"<div id="post"><a href="https://example.com/news">news</a></div>"#),
            PostFormat::Link
        );
        assert_eq!(
            format_of(r#"<div id="post"><video src="v.mp4"></video></div>"#),
            PostFormat::Video
        );
        assert_eq!(
            format_of(
                r#"<div id="post">
                    <div class="update-components-actor__container"><img class="ivm-view-attr__img--centered" src="a.jpg"></div>
                    <div class="update-components-image"><img src="p.jpg"></div>
                </div>"#
            ),
            PostFormat::Image
        );
        assert_eq!(
            format_of(r#"<div id="post"><div class="update-components-image"><img src="1.jpg"><img src="2.jpg"></div></div>"#),
            PostFormat::Images
        );
        assert_eq!(format_of(r#"<div id="post"><p>Just words</p></div>"#), PostFormat::Text);
    }

    #[test]
    fn every_format_is_reachable() {
        let reachable: Vec<PostFormat> = [
            FormatSignals { text: "poll closed".into(), ..Default::default() },
            FormatSignals { header: "reposted this".into(), ..Default::default() },
            FormatSignals { actor_blocks: 3, ..Default::default() },
            FormatSignals { article_container: true, ..Default::default() },
            FormatSignals { document_container: true, ..Default::default() },
            FormatSignals { external_links: 1, ..Default::default() },
            FormatSignals { video: true, ..Default::default() },
            FormatSignals { content_images: 1, ..Default::default() },
            FormatSignals { content_images: 2, ..Default::default() },
            FormatSignals::default(),
        ]
        .iter()
        .map(classify_signals)
        .collect();
        assert_eq!(reachable, PostFormat::ALL);
    }
}
