use serde::{Deserialize, Serialize};

use crate::text::word_count;

/// Which rung of the fallback ladder produced the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// The whole-document main-content algorithm.
    Readability,
    /// Container selection followed by paragraph extraction.
    Primary,
    /// Paragraph extraction over the pruned whole document.
    Fallback,
}

impl Strategy {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Readability => "readability",
            Strategy::Primary => "primary",
            Strategy::Fallback => "fallback",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub text: String,
    pub word_count: usize,
    pub strategy_used: Strategy,
}

impl ExtractionResult {
    /// Wraps already normalized text, deriving the word count from it.
    #[must_use]
    pub fn new(text: String, strategy_used: Strategy) -> Self {
        Self {
            word_count: word_count(&text),
            text,
            strategy_used,
        }
    }

    #[must_use]
    pub fn summary(&self, target_words: usize) -> String {
        crate::summarize::summarize(&self.text, target_words)
    }
}

/// A deduplicated, absolute, scored outbound link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkCandidate {
    pub absolute_url: String,
    pub anchor_text: String,
    pub score: i32,
    /// Position of the anchor among the container's anchors.
    pub discovery_index: usize,
}
