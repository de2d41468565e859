//! Removal of page chrome from a parsed tree.

use scraper::node::Element;
use tracing::debug;

use crate::config::NoiseVocabulary;
use crate::document::{AttributeProbe, ParsedTree};

/// Strips structural chrome and attribute-tagged noise in place.
///
/// Matched elements are detached, so pruning an already pruned tree finds
/// nothing left to remove.
#[derive(Debug, Clone)]
pub struct NoisePruner {
    tags: Vec<String>,
    hints: Vec<String>,
}

impl NoisePruner {
    pub fn new(vocabulary: NoiseVocabulary) -> Self {
        Self {
            tags: vocabulary
                .tags
                .into_iter()
                .map(|t| t.to_ascii_lowercase())
                .collect(),
            hints: vocabulary
                .hints
                .into_iter()
                .map(|h| h.to_lowercase())
                .collect(),
        }
    }

    /// Prunes every element below the tree's root. Returns how many
    /// elements were detached.
    pub fn prune(&self, tree: &mut ParsedTree) -> usize {
        let by_tag = tree.remove_where(|el| self.is_noise_tag(el));
        let by_hint = tree.remove_where(|el| self.looks_like_noise(el));
        if by_tag + by_hint > 0 {
            debug!(by_tag, by_hint, "pruned noise elements");
        }
        by_tag + by_hint
    }

    fn is_noise_tag(&self, element: &Element) -> bool {
        let name = element.name();
        self.tags.iter().any(|tag| tag.eq_ignore_ascii_case(name))
    }

    /// Whether the node's identifying attributes contain a noise hint.
    /// Nodes without attributes never match.
    pub fn looks_like_noise(&self, node: &impl AttributeProbe) -> bool {
        matches_any(&node.hint_text(), &self.hints)
    }
}

impl Default for NoisePruner {
    fn default() -> Self {
        Self::new(NoiseVocabulary::default())
    }
}

pub(crate) fn matches_any(haystack: &str, needles: &[String]) -> bool {
    !haystack.is_empty() && needles.iter().any(|needle| haystack.contains(needle.as_str()))
}
