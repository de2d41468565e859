//! Input documents and the mutable tree each pipeline run works on.

use scraper::node::Element;
use scraper::{ElementRef, Html, Node};
use tracing::debug;

use crate::error::{ExtractionError, Result};

/// Raw markup as fetched, with where it came from and what the server said
/// it was.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub html: String,
    pub url: String,
    pub content_type: Option<String>,
}

impl Document {
    pub fn new(html: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            html: html.into(),
            url: url.into(),
            content_type: None,
        }
    }

    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Rejects payloads that declare a non-HTML media type. A missing header
    /// is given the benefit of the doubt.
    pub fn ensure_html(&self) -> Result<()> {
        let Some(content_type) = self.content_type.as_deref() else {
            return Ok(());
        };

        let media_type = content_type
            .split(';')
            .next()
            .unwrap_or("")
            .trim()
            .to_ascii_lowercase();
        if matches!(media_type.as_str(), "" | "text/html" | "application/xhtml+xml") {
            return Ok(());
        }

        Err(ExtractionError::UnsupportedContent {
            content_type: content_type.to_string(),
        })
    }
}

/// Read access to a node's identifying attributes. Nodes that carry no
/// attribute map answer "nothing" rather than failing.
pub trait AttributeProbe {
    fn has_attributes(&self) -> bool;
    fn attribute(&self, name: &str) -> Option<&str>;

    /// id, class, role and aria-label joined and case-folded, the string
    /// hint vocabularies are matched against.
    fn hint_text(&self) -> String {
        if !self.has_attributes() {
            return String::new();
        }

        let mut combined = String::new();
        for name in ["id", "class", "role", "aria-label"] {
            if let Some(value) = self.attribute(name) {
                let value = value.trim();
                if value.is_empty() {
                    continue;
                }
                if !combined.is_empty() {
                    combined.push(' ');
                }
                combined.push_str(value);
            }
        }
        combined.to_lowercase()
    }
}

impl AttributeProbe for Element {
    fn has_attributes(&self) -> bool {
        self.attrs().next().is_some()
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.attr(name)
    }
}

impl AttributeProbe for Node {
    fn has_attributes(&self) -> bool {
        self.as_element().is_some_and(AttributeProbe::has_attributes)
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.as_element().and_then(|el| el.attr(name))
    }
}

impl AttributeProbe for ElementRef<'_> {
    fn has_attributes(&self) -> bool {
        self.value().has_attributes()
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.value().attr(name)
    }
}

/// A parsed DOM owned by a single extraction run.
pub struct ParsedTree {
    pub(crate) html: Html,
}

impl ParsedTree {
    pub fn parse_document(markup: &str) -> Self {
        Self::recovered(Html::parse_document(markup))
    }

    pub fn parse_fragment(markup: &str) -> Self {
        Self::recovered(Html::parse_fragment(markup))
    }

    /// Copies the children of `element` into a tree of their own, leaving
    /// the source tree untouched.
    pub fn from_element(element: ElementRef<'_>) -> Self {
        Self::parse_fragment(&element.inner_html())
    }

    fn recovered(html: Html) -> Self {
        if !html.errors.is_empty() {
            debug!(
                parse_errors = html.errors.len(),
                "recovered from malformed markup"
            );
        }
        Self { html }
    }

    pub fn root(&self) -> ElementRef<'_> {
        self.html.root_element()
    }

    pub fn html(&self) -> &Html {
        &self.html
    }

    /// Serialized markup, mostly useful for comparing trees.
    pub fn to_html(&self) -> String {
        self.html.html()
    }

    /// Detaches every element under the root matching `predicate`. The root
    /// itself is never removed.
    pub(crate) fn remove_where(&mut self, predicate: impl Fn(&Element) -> bool) -> usize {
        let doomed = self
            .html
            .root_element()
            .descendants()
            .skip(1)
            .filter(|node| node.value().as_element().is_some_and(&predicate))
            .map(|node| node.id())
            .collect::<Vec<_>>();

        let mut removed = 0usize;
        for id in doomed {
            if let Some(mut node) = self.html.tree.get_mut(id) {
                node.detach();
                removed += 1;
            }
        }
        removed
    }
}
