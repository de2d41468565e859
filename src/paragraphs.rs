//! Paragraph-level text recovery from a pruned container.

use scraper::{ElementRef, Selector};

use crate::config::ParagraphRules;
use crate::text::{clean_text, element_text, word_count};

#[derive(Debug, Clone)]
pub struct ParagraphExtractor {
    min_words: usize,
    noise_phrases: Vec<String>,
}

impl ParagraphExtractor {
    pub fn new(rules: ParagraphRules) -> Self {
        Self {
            min_words: rules.min_words,
            noise_phrases: rules
                .noise_phrases
                .into_iter()
                .map(|p| p.to_lowercase())
                .collect(),
        }
    }

    /// Joined text of the substantial paragraphs under `root`, or the
    /// root's flattened text when no paragraph survives filtering.
    pub fn extract(&self, root: &ElementRef<'_>) -> String {
        let paragraphs = self.paragraphs(root);
        if !paragraphs.is_empty() {
            return paragraphs.join(" ");
        }
        clean_text(&element_text(root))
    }

    pub fn paragraphs(&self, root: &ElementRef<'_>) -> Vec<String> {
        let selector = match Selector::parse("p") {
            Ok(s) => s,
            Err(_) => return Vec::new(),
        };

        let mut paragraphs = Vec::new();
        for p in root.select(&selector) {
            let text = clean_text(&element_text(&p));
            if self.is_noise_paragraph(&text) {
                continue;
            }
            paragraphs.push(text);
        }
        paragraphs
    }

    fn is_noise_paragraph(&self, text: &str) -> bool {
        if word_count(text) < self.min_words {
            return true;
        }
        let lower = text.to_lowercase();
        self.noise_phrases
            .iter()
            .any(|phrase| lower.contains(phrase.as_str()))
    }
}

impl Default for ParagraphExtractor {
    fn default() -> Self {
        Self::new(ParagraphRules::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::ParsedTree;

    #[test]
    fn keeps_substantial_paragraphs_only() {
        let tree = ParsedTree::parse_fragment(
            "<div>\
               <p>Too short to keep.</p>\
               <p>The council approved the new budget after a long   debate on Tuesday.</p>\
               <p>We use cookies to improve your experience on this website today.</p>\
               <p>Read our Privacy Policy for details about how your data is used.</p>\
               <p>Residents will see the changes reflected in their bills from next spring.</p>\
             </div>",
        );
        let text = ParagraphExtractor::default().extract(&tree.root());

        assert_eq!(
            text,
            "The council approved the new budget after a long debate on Tuesday. \
             Residents will see the changes reflected in their bills from next spring."
        );
    }

    #[test]
    fn normalizes_paragraph_text() {
        let tree = ParsedTree::parse_fragment(
            "<p>It\u{2019}s a \u{201C}quoted\u{201D} line \u{2014} with <b>inline</b>\n markup and more words.</p>",
        );
        let text = ParagraphExtractor::default().extract(&tree.root());
        assert_eq!(
            text,
            "It's a \"quoted\" line - with inline markup and more words."
        );
    }

    #[test]
    fn falls_back_to_flattened_text() {
        let tree = ParsedTree::parse_fragment(
            "<div><h2>Headline</h2><span>Body without paragraphs</span><p>short</p></div>",
        );
        let text = ParagraphExtractor::default().extract(&tree.root());
        assert_eq!(text, "Headline Body without paragraphs short");
    }

    #[test]
    fn empty_container_yields_empty_string() {
        let tree = ParsedTree::parse_fragment("");
        assert_eq!(ParagraphExtractor::default().extract(&tree.root()), "");
    }
}
