//! Free functions over a shared, default-configured [`Extractor`].

use std::sync::LazyLock;

use crate::config::ExtractorConfig;
use crate::error::Result;
use crate::models::{ExtractionResult, LinkCandidate};
use crate::reader::Extractor;

pub use crate::summarize::summarize;

static DEFAULT_EXTRACTOR: LazyLock<Extractor> = LazyLock::new(|| {
    Extractor::new(ExtractorConfig::default()).expect("built-in link patterns compile")
});

/// Readable text of `html` using the built-in heuristics.
///
/// `base_url` only labels errors and seeds the readability engine; no
/// request is ever made.
pub fn extract(html: &str, base_url: &str) -> Result<ExtractionResult> {
    DEFAULT_EXTRACTOR.extract(html, base_url)
}

/// Up to `max_links` outbound links of `html`, best first.
pub fn score_links(html: &str, base_url: &str, max_links: usize) -> Vec<LinkCandidate> {
    DEFAULT_EXTRACTOR.score_links(html, base_url, max_links)
}

/// The shared extractor behind [`extract`] and [`score_links`].
pub fn default_extractor() -> &'static Extractor {
    &DEFAULT_EXTRACTOR
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_extractor_reads_articles() {
        let body = (0..7)
            .map(|p| {
                let words = (0..10).map(|w| format!("p{p}w{w}")).collect::<Vec<_>>();
                format!("<p>{}</p>", words.join(" "))
            })
            .collect::<String>();
        let html = format!("<html><body><article>{body}</article></body></html>");

        let result = extract(&html, "https://example.com/story").unwrap();
        assert!(result.word_count >= 60);
        assert!(result.text.starts_with("p0w0"));
    }

    #[test]
    fn free_functions_share_one_extractor() {
        assert!(std::ptr::eq(default_extractor(), default_extractor()));
        assert_eq!(summarize("a b c", 2), "a b");
        assert!(score_links("<p>no links</p>", "https://example.com/", 5).is_empty());
    }
}
