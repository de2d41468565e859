//! Whole-document main-content extraction, used as a rescue strategy.

use readabilityrs::{Readability, ReadabilityOptions};
use tracing::debug;

use crate::document::ParsedTree;
use crate::paragraphs::ParagraphExtractor;
use crate::prune::NoisePruner;

/// An algorithm that finds the main content of a full HTML document on its
/// own terms and returns it as an HTML fragment.
pub trait MainContentExtractor: Send + Sync {
    fn name(&self) -> &'static str;

    /// `None` when the algorithm finds nothing usable.
    fn extract_main_content(&self, html: &str, base_url: &str) -> Option<String>;
}

/// Mozilla Readability, via `readabilityrs`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ReadabilityEngine;

impl MainContentExtractor for ReadabilityEngine {
    fn name(&self) -> &'static str {
        "readability"
    }

    fn extract_main_content(&self, html: &str, base_url: &str) -> Option<String> {
        let base_url = (!base_url.trim().is_empty()).then_some(base_url);
        let options = ReadabilityOptions::default();
        let readability = Readability::new(html, base_url, Some(options)).ok()?;
        let parsed = readability.parse()?;

        let content = parsed.content.or(parsed.raw_content)?;
        (!content.trim().is_empty()).then_some(content)
    }
}

/// Runs a [`MainContentExtractor`] over the raw document, then prunes and
/// paragraph-extracts the smaller subtree it hands back.
pub struct ReadabilityFallback {
    engine: Box<dyn MainContentExtractor>,
    pruner: NoisePruner,
    paragraphs: ParagraphExtractor,
}

impl ReadabilityFallback {
    pub fn new(
        engine: Box<dyn MainContentExtractor>,
        pruner: NoisePruner,
        paragraphs: ParagraphExtractor,
    ) -> Self {
        Self {
            engine,
            pruner,
            paragraphs,
        }
    }

    pub fn engine_name(&self) -> &'static str {
        self.engine.name()
    }

    /// Cleaned text of the engine's main content; empty when the engine
    /// found nothing.
    pub fn extract(&self, html: &str, base_url: &str) -> String {
        let Some(fragment) = self.engine.extract_main_content(html, base_url) else {
            debug!(engine = self.engine.name(), "no main content found");
            return String::new();
        };

        let mut tree = ParsedTree::parse_fragment(&fragment);
        self.pruner.prune(&mut tree);
        self.paragraphs.extract(&tree.root())
    }
}

impl std::fmt::Debug for ReadabilityFallback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReadabilityFallback")
            .field("engine", &self.engine.name())
            .finish_non_exhaustive()
    }
}
