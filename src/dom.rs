//! DOM Operations Adapter
//!
//! Extraction code never touches `dom_query` directly. It is written against
//! the [`Fragment`] trait, a small capability set (select, attribute, text,
//! ancestor test) that `dom_query::Selection` implements here. Tests can
//! supply their own implementation.
//!
//! [`Scoped`] narrows a fragment to its own content, hiding subtrees that
//! match a selector (a comment's nested replies).

pub use dom_query::{Document, NodeId, NodeRef, Selection};

/// Read-only view of one DOM subtree.
pub trait Fragment: Sized {
    /// All descendants matching a CSS selector, in document order.
    fn query_selector_all(&self, selector: &str) -> Vec<Self>;

    /// First descendant matching a CSS selector.
    fn query_selector(&self, selector: &str) -> Option<Self> {
        self.query_selector_all(selector).into_iter().next()
    }

    /// Attribute value, if present.
    fn get_attribute(&self, name: &str) -> Option<String>;

    /// All descendant text, each text node trimmed, joined by single spaces.
    fn text_content(&self) -> String;

    /// Text of direct child text nodes only.
    fn own_text(&self) -> String;

    /// True if some ancestor's class attribute contains `needle`.
    fn has_ancestor_class(&self, needle: &str) -> bool;

    /// True if some ancestor carries exactly `class` as one of its classes.
    fn has_ancestor_with_class(&self, class: &str) -> bool;

    /// Like [`Fragment::query_selector_all`], skipping matches that are, or
    /// sit inside, a descendant matching `nested`.
    ///
    /// Fragments without element structure have nothing to skip.
    fn query_selector_all_outside(&self, selector: &str, _nested: &str) -> Vec<Self> {
        self.query_selector_all(selector)
    }

    /// Like [`Fragment::text_content`], leaving out descendants matching `nested`.
    fn text_content_outside(&self, _nested: &str) -> String {
        self.text_content()
    }
}

/// A fragment limited to its own content.
///
/// Everything inside a descendant matching `nested` is invisible to selects
/// and text, so a comment entity does not pick up its replies' reactions or
/// text.
#[derive(Debug, Clone)]
pub struct Scoped<N> {
    node: N,
    nested: &'static str,
}

impl<N: Fragment> Scoped<N> {
    /// Scope `node`, hiding descendants that match `nested`.
    #[must_use]
    pub const fn new(node: N, nested: &'static str) -> Self {
        Self { node, nested }
    }

    /// The unscoped fragment.
    pub const fn inner(&self) -> &N {
        &self.node
    }
}

impl<N: Fragment> Fragment for Scoped<N> {
    fn query_selector_all(&self, selector: &str) -> Vec<Self> {
        self.node
            .query_selector_all_outside(selector, self.nested)
            .into_iter()
            .map(|node| Self::new(node, self.nested))
            .collect()
    }

    fn get_attribute(&self, name: &str) -> Option<String> {
        self.node.get_attribute(name)
    }

    fn text_content(&self) -> String {
        self.node.text_content_outside(self.nested)
    }

    fn own_text(&self) -> String {
        self.node.own_text()
    }

    fn has_ancestor_class(&self, needle: &str) -> bool {
        self.node.has_ancestor_class(needle)
    }

    fn has_ancestor_with_class(&self, class: &str) -> bool {
        self.node.has_ancestor_with_class(class)
    }
}

impl<'a> Fragment for Selection<'a> {
    fn query_selector_all(&self, selector: &str) -> Vec<Self> {
        self.select(selector)
            .nodes()
            .iter()
            .map(|node| Selection::from(*node))
            .collect()
    }

    fn get_attribute(&self, name: &str) -> Option<String> {
        get_attribute(self, name)
    }

    fn text_content(&self) -> String {
        joined_text(self)
    }

    fn own_text(&self) -> String {
        let Some(root) = self.nodes().first() else {
            return String::new();
        };

        let mut parts = Vec::new();
        for child in root.children() {
            if child.is_text() {
                let text = child.text();
                let trimmed = text.trim();
                if !trimmed.is_empty() {
                    parts.push(trimmed.to_string());
                }
            }
        }
        parts.join(" ")
    }

    fn has_ancestor_class(&self, needle: &str) -> bool {
        any_ancestor_class(self, |class| class.contains(needle))
    }

    fn has_ancestor_with_class(&self, class: &str) -> bool {
        any_ancestor_class(self, |classes| classes.split_whitespace().any(|c| c == class))
    }

    fn query_selector_all_outside(&self, selector: &str, nested: &str) -> Vec<Self> {
        let Some(root) = self.nodes().first() else {
            return Vec::new();
        };
        self.select(selector)
            .nodes()
            .iter()
            .filter(|node| !within_nested(node, root.id, nested))
            .map(|node| Selection::from(*node))
            .collect()
    }

    fn text_content_outside(&self, nested: &str) -> String {
        collect_text(self, Some(nested))
    }
}

fn any_ancestor_class(sel: &Selection, test: impl Fn(&str) -> bool) -> bool {
    let mut current = sel.nodes().first().and_then(|n| n.parent());
    while let Some(node) = current {
        if node.is_element() && Selection::from(node).attr("class").is_some_and(|c| test(&*c)) {
            return true;
        }
        current = node.parent();
    }
    false
}

/// True if `node`, or an ancestor below `root`, matches `nested`.
fn within_nested(node: &NodeRef, root: NodeId, nested: &str) -> bool {
    let mut current = Some(*node);
    while let Some(n) = current {
        if n.id == root {
            return false;
        }
        if n.is_element() && Selection::from(n).is(nested) {
            return true;
        }
        current = n.parent();
    }
    false
}

// === Attribute Operations ===

/// Get any attribute value
#[inline]
#[must_use]
pub fn get_attribute(sel: &Selection, name: &str) -> Option<String> {
    sel.attr(name).map(|s| s.to_string())
}

// === Text Content ===

/// Text of every descendant text node, trimmed and joined with a space.
///
/// Text inside `script`, `style` and `noscript` is skipped. Adjacent inline
/// elements ("1,204" + "reactions") stay separated, which the count patterns
/// rely on.
#[must_use]
pub fn joined_text(sel: &Selection) -> String {
    collect_text(sel, None)
}

fn collect_text(sel: &Selection, nested: Option<&str>) -> String {
    let Some(root) = sel.nodes().first() else {
        return String::new();
    };

    let mut parts: Vec<String> = Vec::new();
    for node in root.descendants() {
        if !node.is_text() {
            continue;
        }
        if let Some(parent) = node.parent() {
            if let Some(tag) = parent.node_name() {
                if tag.eq_ignore_ascii_case("script")
                    || tag.eq_ignore_ascii_case("style")
                    || tag.eq_ignore_ascii_case("noscript")
                {
                    continue;
                }
            }
            if nested.is_some_and(|nested| within_nested(&parent, root.id, nested)) {
                continue;
            }
        }
        let text = node.text();
        let trimmed = text.trim();
        if !trimmed.is_empty() {
            parts.push(trimmed.to_string());
        }
    }

    parts.join(" ")
}

// === Parsing ===

/// Parse HTML string into document
#[inline]
#[must_use]
pub fn parse(html: &str) -> Document {
    Document::from(html)
}
