//! The extraction pipeline: container selection, pruning, paragraph
//! extraction and the fallback ladder around them.

use tracing::debug;

use crate::config::{ExtractorConfig, LadderThresholds};
use crate::container::{ContainerOrigin, ContainerSelector};
use crate::document::{Document, ParsedTree};
use crate::error::{ConfigError, ExtractionError, Result};
use crate::links::LinkScorer;
use crate::models::{ExtractionResult, LinkCandidate, Strategy};
use crate::paragraphs::ParagraphExtractor;
use crate::prune::NoisePruner;
use crate::readability::{MainContentExtractor, ReadabilityEngine, ReadabilityFallback};
use crate::text::word_count;

/// Rungs of the fallback ladder. Each state either settles on a result or
/// escalates to the next, more expensive one.
#[derive(Debug)]
enum LadderState {
    Primary,
    WholeDocumentRetry,
    ReadabilityRescue { best: String, strategy: Strategy },
    Done(ExtractionResult),
    Failed,
}

/// Extracts readable text and ranked links from HTML pages.
#[derive(Debug)]
pub struct Extractor {
    pruner: NoisePruner,
    selector: ContainerSelector,
    paragraphs: ParagraphExtractor,
    readability: Option<ReadabilityFallback>,
    links: LinkScorer,
    prune_link_container: bool,
    thresholds: LadderThresholds,
}

impl Extractor {
    /// Builds an extractor backed by the bundled readability engine.
    pub fn new(config: ExtractorConfig) -> Result<Self, ConfigError> {
        let pruner = NoisePruner::new(config.noise.clone());
        let selector = ContainerSelector::new(config.container, &config.noise);
        let paragraphs = ParagraphExtractor::new(config.paragraphs);
        let links = LinkScorer::from_config(&config.links)?;
        let readability = ReadabilityFallback::new(
            Box::new(ReadabilityEngine),
            pruner.clone(),
            paragraphs.clone(),
        );

        Ok(Self {
            pruner,
            selector,
            paragraphs,
            readability: Some(readability),
            links,
            prune_link_container: config.links.prune_container,
            thresholds: config.thresholds,
        })
    }

    /// Swaps in a different main-content engine for the readability rungs.
    #[must_use]
    pub fn with_main_content_extractor(
        mut self,
        engine: impl MainContentExtractor + 'static,
    ) -> Self {
        self.readability = Some(ReadabilityFallback::new(
            Box::new(engine),
            self.pruner.clone(),
            self.paragraphs.clone(),
        ));
        self
    }

    /// Drops the readability rungs; only the primary path and the
    /// whole-document retry remain.
    #[must_use]
    pub fn without_readability(mut self) -> Self {
        self.readability = None;
        self
    }

    /// Gatekeeps the content type, then extracts.
    pub fn extract_document(&self, document: &Document) -> Result<ExtractionResult> {
        document.ensure_html()?;
        self.extract(&document.html, &document.url)
    }

    /// Runs the fallback ladder over `html`.
    ///
    /// A readability result long enough to stand on its own wins outright.
    /// Otherwise the selected container is pruned and paragraph-extracted;
    /// a thin result is replaced by a retry over the whole pruned document,
    /// and a still-thin result is rescued by readability output when there
    /// is any.
    pub fn extract(&self, html: &str, base_url: &str) -> Result<ExtractionResult> {
        let readability_text = match &self.readability {
            Some(fallback) => {
                let text = fallback.extract(html, base_url);
                debug!(
                    engine = fallback.engine_name(),
                    words = word_count(&text),
                    "readability pass"
                );
                text
            }
            None => String::new(),
        };
        let readability_words = word_count(&readability_text);

        let mut state = if readability_words >= self.thresholds.readability_min_words {
            LadderState::Done(ExtractionResult::new(
                readability_text.clone(),
                Strategy::Readability,
            ))
        } else {
            LadderState::Primary
        };

        loop {
            state = match state {
                LadderState::Primary => {
                    let document = ParsedTree::parse_document(html);
                    let container = self.selector.isolate(document);
                    let mut tree = container.tree;
                    self.pruner.prune(&mut tree);
                    let text = self.paragraphs.extract(&tree.root());
                    let words = word_count(&text);
                    debug!(
                        origin = ?container.origin,
                        container_words = container.word_count,
                        words,
                        "primary extraction"
                    );

                    if words >= self.thresholds.primary_min_words {
                        LadderState::Done(ExtractionResult::new(text, Strategy::Primary))
                    } else if container.origin == ContainerOrigin::WholeDocument {
                        // The retry would prune and read the very same tree.
                        LadderState::ReadabilityRescue {
                            best: text,
                            strategy: Strategy::Primary,
                        }
                    } else {
                        LadderState::WholeDocumentRetry
                    }
                }
                LadderState::WholeDocumentRetry => {
                    let mut tree = ParsedTree::parse_document(html);
                    self.pruner.prune(&mut tree);
                    let text = self.paragraphs.extract(&tree.root());
                    debug!(words = word_count(&text), "whole-document retry");

                    LadderState::ReadabilityRescue {
                        best: text,
                        strategy: Strategy::Fallback,
                    }
                }
                LadderState::ReadabilityRescue { best, strategy } => {
                    let best_words = word_count(&best);
                    let thin = best_words < self.thresholds.whole_document_min_words;
                    if thin && readability_words > 0 {
                        LadderState::Done(ExtractionResult::new(
                            readability_text.clone(),
                            Strategy::Readability,
                        ))
                    } else if best.is_empty() {
                        LadderState::Failed
                    } else {
                        LadderState::Done(ExtractionResult::new(best, strategy))
                    }
                }
                LadderState::Done(result) => {
                    debug!(
                        strategy = result.strategy_used.name(),
                        words = result.word_count,
                        "extraction settled"
                    );
                    return Ok(result);
                }
                LadderState::Failed => {
                    return Err(ExtractionError::EmptyExtraction {
                        url: base_url.to_string(),
                    });
                }
            };
        }
    }

    /// Ranks outbound links found in the page's content container.
    pub fn score_links(
        &self,
        html: &str,
        base_url: &str,
        max_links: usize,
    ) -> Vec<LinkCandidate> {
        let document = ParsedTree::parse_document(html);
        let mut container = self.selector.isolate(document);
        if self.prune_link_container {
            self.pruner.prune(&mut container.tree);
        }
        self.links.rank(&container.tree.root(), base_url, max_links)
    }
}
