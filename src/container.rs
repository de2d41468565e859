//! Locating the subtree that most likely holds the article body.

use scraper::{ElementRef, Selector};
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::{ContainerRules, NoiseVocabulary};
use crate::document::{AttributeProbe, ParsedTree};
use crate::prune::matches_any;
use crate::text::element_word_count;

/// How a container was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContainerOrigin {
    /// One of the preferred selectors matched with enough text.
    Preferred,
    /// Best content-hinted element from the scan.
    Hinted,
    /// Nothing qualified; the whole document is the container.
    WholeDocument,
}

/// A candidate subtree and its raw word count.
#[derive(Debug, Clone, Copy)]
pub struct ContentCandidate<'a> {
    pub element: ElementRef<'a>,
    pub word_count: usize,
    pub origin: ContainerOrigin,
}

impl ContentCandidate<'_> {
    /// Gives the container a tree of its own so it can be pruned without
    /// touching the document. `None` means the document itself is the
    /// container.
    pub fn detach_subtree(&self) -> Option<ParsedTree> {
        match self.origin {
            ContainerOrigin::WholeDocument => None,
            ContainerOrigin::Preferred | ContainerOrigin::Hinted => {
                Some(ParsedTree::from_element(self.element))
            }
        }
    }
}

/// The working tree for one extraction run, after container selection.
pub struct Container {
    pub tree: ParsedTree,
    pub origin: ContainerOrigin,
    pub word_count: usize,
}

#[derive(Debug, Clone)]
pub struct ContainerSelector {
    preferred: Vec<Selector>,
    min_preferred_words: usize,
    scan: Option<Selector>,
    content_hints: Vec<String>,
    noise_hints: Vec<String>,
}

impl ContainerSelector {
    /// Builds a selector from its rules and the noise hints shared with the
    /// pruner. Selectors that fail to parse are skipped.
    pub fn new(rules: ContainerRules, noise: &NoiseVocabulary) -> Self {
        let preferred = rules
            .preferred_selectors
            .iter()
            .filter_map(|css| match Selector::parse(css) {
                Ok(selector) => Some(selector),
                Err(error) => {
                    warn!(selector = %css, ?error, "ignoring unparsable container selector");
                    None
                }
            })
            .collect();

        let scan = match Selector::parse(&rules.scan_selector) {
            Ok(selector) => Some(selector),
            Err(error) => {
                warn!(selector = %rules.scan_selector, ?error, "ignoring unparsable scan selector");
                None
            }
        };

        Self {
            preferred,
            min_preferred_words: rules.min_preferred_words,
            scan,
            content_hints: lowercase(rules.content_hints),
            noise_hints: lowercase(noise.hints.clone()),
        }
    }

    /// Picks the container. Never fails: with no qualifying element the
    /// document root is returned.
    pub fn select<'a>(&self, document: &'a ParsedTree) -> ContentCandidate<'a> {
        let html = document.html();

        for selector in &self.preferred {
            if let Some(element) = html.select(selector).next() {
                let word_count = element_word_count(&element);
                if word_count >= self.min_preferred_words {
                    debug!(word_count, "container from preferred selector");
                    return ContentCandidate {
                        element,
                        word_count,
                        origin: ContainerOrigin::Preferred,
                    };
                }
            }
        }

        if let Some(best) = self.best_hinted(document) {
            debug!(word_count = best.word_count, "container from hint scan");
            return best;
        }

        let root = document.root();
        ContentCandidate {
            element: root,
            word_count: element_word_count(&root),
            origin: ContainerOrigin::WholeDocument,
        }
    }

    /// Selects the container and moves it into its own tree.
    pub fn isolate(&self, document: ParsedTree) -> Container {
        let (subtree, origin, word_count) = {
            let candidate = self.select(&document);
            (
                candidate.detach_subtree(),
                candidate.origin,
                candidate.word_count,
            )
        };

        Container {
            tree: subtree.unwrap_or(document),
            origin,
            word_count,
        }
    }

    /// Largest content-hinted, noise-free element. Ties keep the element
    /// that comes first in document order.
    fn best_hinted<'a>(&self, document: &'a ParsedTree) -> Option<ContentCandidate<'a>> {
        let scan = self.scan.as_ref()?;
        let mut best: Option<ContentCandidate<'a>> = None;

        for element in document.html().select(scan) {
            let hints = element.hint_text();
            if !matches_any(&hints, &self.content_hints) || matches_any(&hints, &self.noise_hints)
            {
                continue;
            }

            let word_count = element_word_count(&element);
            if word_count == 0 {
                continue;
            }

            match &best {
                Some(current) if word_count <= current.word_count => {}
                _ => {
                    best = Some(ContentCandidate {
                        element,
                        word_count,
                        origin: ContainerOrigin::Hinted,
                    })
                }
            }
        }

        best
    }
}

impl Default for ContainerSelector {
    fn default() -> Self {
        Self::new(ContainerRules::default(), &NoiseVocabulary::default())
    }
}

fn lowercase(values: Vec<String>) -> Vec<String> {
    values.into_iter().map(|v| v.to_lowercase()).collect()
}
