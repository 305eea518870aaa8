//! URL utilities for post links.
//!
//! Canonicalizes activity URNs, resolves relative hrefs against the LinkedIn
//! origin, and tells LinkedIn links from external ones.

use url::Url;

/// Prefix of every canonical post URL.
pub const FEED_UPDATE_PREFIX: &str = "https://www.linkedin.com/feed/update/";

/// Check if a string is a valid absolute http(s) URL.
///
/// # Returns
/// * `(is_absolute, parsed_url)` - Whether URL is absolute and the parsed URL if valid
#[must_use]
pub fn is_absolute_url(s: &str) -> (bool, Option<Url>) {
    let s = s.trim();

    if !s.starts_with("http://") && !s.starts_with("https://") {
        return (false, None);
    }

    match Url::parse(s) {
        Ok(url) if url.host().is_some() => (true, Some(url)),
        _ => (false, None),
    }
}

/// Drop the query string and fragment from a URL-ish string.
#[must_use]
pub fn strip_query(url_str: &str) -> &str {
    let end = url_str.find(['?', '#']).unwrap_or(url_str.len());
    &url_str[..end]
}

/// Rewrite an activity URN to its canonical post URL.
///
/// `urn:li:activity:123?x=1` becomes
/// `https://www.linkedin.com/feed/update/urn:li:activity:123/`.
/// Anything that is not a `urn:li:` value passes through unchanged.
///
/// # Example
///
/// ```rust
/// use linkedin_activity_export::url_utils::canonical_post_url;
///
/// assert_eq!(
///     canonical_post_url("urn:li:activity:7123456789012345678"),
///     "https://www.linkedin.com/feed/update/urn:li:activity:7123456789012345678/"
/// );
/// assert_eq!(canonical_post_url("https://example.com/x"), "https://example.com/x");
/// ```
#[must_use]
pub fn canonical_post_url(value: &str) -> String {
    let value = value.trim();
    if value.starts_with("urn:li:") {
        format!("{FEED_UPDATE_PREFIX}{}/", strip_query(value))
    } else {
        value.to_string()
    }
}

/// Resolve `href` against `base`, without query string.
///
/// Absolute URLs are kept as they are (minus the query). If the base cannot be
/// parsed the stripped href is returned unchanged.
#[must_use]
pub fn absolute_url(href: &str, base: &str) -> String {
    let href = strip_query(href.trim());

    if href.is_empty() {
        return String::new();
    }

    let (is_abs, _) = is_absolute_url(href);
    if is_abs {
        return href.to_string();
    }

    match Url::parse(base).and_then(|b| b.join(href)) {
        Ok(resolved) => strip_query(resolved.as_str()).to_string(),
        Err(_) => href.to_string(),
    }
}

/// True when `host` is linkedin.com or one of its subdomains.
#[must_use]
pub fn is_linkedin_host(host: &str) -> bool {
    let host = host.trim_end_matches('.').to_ascii_lowercase();
    host == "linkedin.com" || host.ends_with(".linkedin.com")
}

/// True when `href` points off LinkedIn.
///
/// Relative links, fragments and non-http schemes are not external.
#[must_use]
pub fn is_external_link(href: &str) -> bool {
    match is_absolute_url(href) {
        (true, Some(url)) => url.host_str().is_some_and(|host| !is_linkedin_host(host)),
        _ => false,
    }
}

/// True when `href` is a LinkedIn long-form article (`/pulse/` or `/articles/`).
#[must_use]
pub fn is_linkedin_article_link(href: &str) -> bool {
    let path = match is_absolute_url(href) {
        (true, Some(url)) => {
            if !url.host_str().is_some_and(is_linkedin_host) {
                return false;
            }
            url.path().to_string()
        }
        _ if href.starts_with('/') => strip_query(href).to_string(),
        _ => return false,
    };
    path.contains("/pulse/") || path.contains("/articles/")
}
