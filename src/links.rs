//! Outbound link extraction and ranking for link-following crawls.

use std::collections::HashSet;

use regex::Regex;
use scraper::{ElementRef, Selector};
use tracing::{debug, warn};
use url::Url;

use crate::config::{LinkConfig, LinkVocabulary, LinkWeights};
use crate::error::ConfigError;
use crate::models::LinkCandidate;
use crate::text::{element_text, normalize_whitespace, word_count};

const REJECTED_PREFIXES: &[&str] = &["javascript:", "mailto:", "tel:"];

/// Scores links by how likely they lead to article content.
///
/// Scores depend only on the start host, the normalized URL and the anchor
/// text, so ranking the same markup twice gives the same order.
#[derive(Debug, Clone)]
pub struct LinkScorer {
    content_path_tokens: Vec<String>,
    non_content_hints: Vec<String>,
    low_signal_anchor_text: HashSet<String>,
    section_paths: HashSet<String>,
    index_path: Regex,
    article_id_path: Regex,
    weights: LinkWeights,
}

impl LinkScorer {
    pub fn new(vocabulary: LinkVocabulary, weights: LinkWeights) -> Result<Self, ConfigError> {
        let index_path = Regex::new(&vocabulary.index_path_pattern).map_err(|source| {
            ConfigError::InvalidPattern {
                name: "index_path",
                source,
            }
        })?;
        let article_id_path = Regex::new(&vocabulary.article_id_pattern).map_err(|source| {
            ConfigError::InvalidPattern {
                name: "article_id",
                source,
            }
        })?;

        Ok(Self {
            content_path_tokens: lowercase(vocabulary.content_path_tokens),
            non_content_hints: lowercase(vocabulary.non_content_hints),
            low_signal_anchor_text: lowercase(vocabulary.low_signal_anchor_text)
                .into_iter()
                .collect(),
            section_paths: lowercase(vocabulary.section_paths)
                .into_iter()
                .collect(),
            index_path,
            article_id_path,
            weights,
        })
    }

    pub fn from_config(config: &LinkConfig) -> Result<Self, ConfigError> {
        Self::new(config.vocabulary.clone(), config.weights)
    }

    /// Ranks the anchors under `root` against `start_url` and keeps at most
    /// `max_links` of them. An unusable start URL yields no links.
    pub fn rank(
        &self,
        root: &ElementRef<'_>,
        start_url: &str,
        max_links: usize,
    ) -> Vec<LinkCandidate> {
        let start = match Url::parse(start_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => url,
            Ok(url) => {
                warn!(scheme = url.scheme(), "start URL is not http(s); no links ranked");
                return Vec::new();
            }
            Err(error) => {
                warn!(url = start_url, %error, "unparsable start URL; no links ranked");
                return Vec::new();
            }
        };

        let ranked = self.candidates(root, &start);
        let selected = self.select(&ranked, max_links);
        debug!(
            discovered = ranked.len(),
            selected = selected.len(),
            "ranked outbound links"
        );
        selected
    }

    /// Every usable, deduplicated anchor under `root`, scored and sorted by
    /// score descending then discovery order.
    pub fn candidates(&self, root: &ElementRef<'_>, start: &Url) -> Vec<LinkCandidate> {
        let selector = match Selector::parse("a[href]") {
            Ok(s) => s,
            Err(_) => return Vec::new(),
        };
        let start_host = start.host_str().unwrap_or("").to_ascii_lowercase();

        let mut seen = HashSet::new();
        let mut candidates = Vec::new();
        for (index, anchor) in root.select(&selector).enumerate() {
            let Some(href) = anchor.value().attr("href") else {
                continue;
            };
            let Some(url) = resolve_link(start, href) else {
                continue;
            };

            let normalized = url.to_string();
            if !seen.insert(normalized.clone()) {
                continue;
            }

            let anchor_text = normalize_whitespace(&element_text(&anchor));
            let score = self.score(&start_host, &url, &anchor_text);
            candidates.push(LinkCandidate {
                absolute_url: normalized,
                anchor_text,
                score,
                discovery_index: index,
            });
        }

        candidates.sort_by(|a, b| {
            b.score
                .cmp(&a.score)
                .then(a.discovery_index.cmp(&b.discovery_index))
        });
        candidates
    }

    /// Fills up to `max_links` slots from a ranked list. Once the admission
    /// floor is reached, negative candidates are no longer taken. If nothing
    /// at all was admitted, the head of the ranked list is returned as is.
    pub fn select(&self, ranked: &[LinkCandidate], max_links: usize) -> Vec<LinkCandidate> {
        let floor = self.weights.admission_floor.max(max_links / 2);

        let mut selected = Vec::new();
        for candidate in ranked {
            if selected.len() >= max_links {
                break;
            }
            if candidate.score < 0 && selected.len() >= floor {
                continue;
            }
            selected.push(candidate.clone());
        }

        if selected.is_empty() {
            return ranked.iter().take(max_links).cloned().collect();
        }
        selected
    }

    /// Content-likelihood score for one normalized link.
    pub fn score(&self, start_host: &str, url: &Url, anchor_text: &str) -> i32 {
        let w = &self.weights;
        let host = url.host_str().unwrap_or("").to_ascii_lowercase();
        let path = url.path().to_lowercase();
        let anchor_lower = anchor_text.to_lowercase();

        let mut score = 0i32;

        if is_same_site(&host, start_host) {
            score += w.same_site;
        }

        let depth = path.split('/').filter(|segment| !segment.is_empty()).count();
        if depth >= w.deep_path_min_segments {
            score += w.deep_path;
        }

        if self
            .content_path_tokens
            .iter()
            .any(|token| path.contains(token.as_str()))
        {
            score += w.content_path;
        }

        let anchor_words = word_count(anchor_text);
        if (w.descriptive_anchor_min_words..=w.descriptive_anchor_max_words).contains(&anchor_words)
        {
            score += w.descriptive_anchor;
        } else if anchor_words <= 1 {
            score += w.bare_anchor;
        }

        if self.low_signal_anchor_text.contains(anchor_lower.as_str()) {
            score += w.low_signal_anchor;
        }

        let haystack = format!("{path} {anchor_lower}");
        if self
            .non_content_hints
            .iter()
            .any(|hint| haystack.contains(hint.as_str()))
        {
            score += w.non_content_hint;
        }

        let trimmed_path = if path == "/" {
            path.as_str()
        } else {
            path.trim_end_matches('/')
        };
        if self.section_paths.contains(trimmed_path) {
            score += w.section_path;
        }

        if self.index_path.is_match(&path) {
            score += w.index_path;
        }
        if self.article_id_path.is_match(&path) {
            score += w.article_id_path;
        }

        score
    }
}

/// Resolves `href` against the page URL, keeping only http(s) targets and
/// dropping the fragment.
fn resolve_link(start: &Url, href: &str) -> Option<Url> {
    let href = href.trim();
    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    let lower = href.to_ascii_lowercase();
    if REJECTED_PREFIXES.iter().any(|prefix| lower.starts_with(prefix)) {
        return None;
    }

    let mut url = start.join(href).ok()?;
    if !matches!(url.scheme(), "http" | "https") {
        return None;
    }
    url.set_fragment(None);
    Some(url)
}

fn is_same_site(host: &str, start_host: &str) -> bool {
    if host.is_empty() || start_host.is_empty() {
        return false;
    }
    host == start_host
        || host
            .strip_suffix(start_host)
            .is_some_and(|prefix| prefix.ends_with('.'))
}

fn lowercase(values: Vec<String>) -> Vec<String> {
    values.into_iter().map(|v| v.to_lowercase()).collect()
}

impl Default for LinkScorer {
    fn default() -> Self {
        Self::new(LinkVocabulary::default(), LinkWeights::default())
            .expect("built-in link patterns compile")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::ParsedTree;
    use pretty_assertions::assert_eq;

    const START: &str = "https://www.example.com/news";

    fn start() -> Url {
        Url::parse(START).unwrap()
    }

    fn score(href: &str, anchor: &str) -> i32 {
        let url = Url::parse(href).unwrap();
        LinkScorer::default().score("www.example.com", &url, anchor)
    }

    fn rank(html: &str, max_links: usize) -> Vec<LinkCandidate> {
        let tree = ParsedTree::parse_fragment(html);
        LinkScorer::default().rank(&tree.root(), START, max_links)
    }

    fn urls(links: &[LinkCandidate]) -> Vec<&str> {
        links.iter().map(|l| l.absolute_url.as_str()).collect()
    }

    #[test]
    fn article_links_score_high() {
        assert_eq!(
            score(
                "https://www.example.com/news/articles/c123abc",
                "Council approves new budget for schools"
            ),
            10
        );
    }

    #[test]
    fn chrome_links_score_low() {
        assert_eq!(score("https://www.example.com/", "Home"), -8);
        assert_eq!(score("https://www.example.com/account/login", "Sign in"), -4);
        assert_eq!(score("https://www.example.com/sport/", "Sport"), -7);
    }

    #[test]
    fn live_and_topic_indexes_are_penalized() {
        let live = score(
            "https://www.example.com/news/live/uk-12345",
            "Follow the latest updates as they happen",
        );
        let article = score(
            "https://www.example.com/news/uk-12345",
            "Follow the latest updates as they happen",
        );
        assert_eq!(live, article - 2);
        assert_eq!(score("https://www.example.com/news/topics", "Topics"), 1);
    }

    #[test]
    fn subdomains_count_as_same_site_but_lookalikes_do_not() {
        assert!(is_same_site("news.www.example.com", "www.example.com"));
        assert!(is_same_site("www.example.com", "www.example.com"));
        assert!(!is_same_site("notwww.example.com", "www.example.com"));
        assert!(!is_same_site("example.com", "www.example.com"));
    }

    #[test]
    fn rejects_unusable_targets_and_dedupes() {
        let links = rank(
            r##"<a href="#top">Top</a>
               <a href="javascript:void(0)">Click</a>
               <a href="mailto:desk@example.com">Mail</a>
               <a href="TEL:123">Call</a>
               <a href="ftp://example.com/file">File</a>
               <a href="">Empty</a>
               <a>No href</a>
               <a href="/news/story-one#comments">Story one is a good read today</a>
               <a href="https://www.example.com/news/story-one#top">Duplicate story</a>"##,
            10,
        );

        assert_eq!(urls(&links), vec!["https://www.example.com/news/story-one"]);
        assert_eq!(links[0].anchor_text, "Story one is a good read today");
        assert_eq!(links[0].discovery_index, 6);
    }

    #[test]
    fn sorts_by_score_then_discovery_order() {
        let links = rank(
            r#"<a href="/about">About</a>
               <a href="/news/world-1">Storm batters the northern coast overnight</a>
               <a href="/news/world-2">Markets rally after surprise rate decision</a>"#,
            5,
        );

        assert_eq!(
            urls(&links),
            vec![
                "https://www.example.com/news/world-1",
                "https://www.example.com/news/world-2",
                "https://www.example.com/about",
            ]
        );
        assert!(links[0].score == links[1].score);
        assert!(links[1].score > links[2].score);
    }

    #[test]
    fn negative_links_stop_at_admission_floor() {
        let links = rank(
            r#"<a href="/login">Login</a>
               <a href="/account">Account</a>
               <a href="/register">Register</a>
               <a href="/account/settings">Settings</a>
               <a href="/signin">Sign in</a>"#,
            3,
        );

        assert_eq!(links.len(), 2);
        assert!(links.iter().all(|l| l.score < 0));
    }

    #[test]
    fn positive_links_fill_all_slots() {
        let html = (0..6)
            .map(|i| format!(r#"<a href="/news/item-{i}">Long enough anchor text number {i}</a>"#))
            .collect::<String>();
        let links = rank(&html, 4);
        assert_eq!(links.len(), 4);
        assert_eq!(links[0].discovery_index, 0);
        assert_eq!(links[3].discovery_index, 3);
    }

    #[test]
    fn select_falls_back_to_head_when_nothing_is_admitted() {
        let scorer = LinkScorer::new(
            LinkVocabulary::default(),
            LinkWeights {
                admission_floor: 0,
                ..LinkWeights::default()
            },
        )
        .unwrap();
        let ranked = vec![
            LinkCandidate {
                absolute_url: "https://a.example/1".to_string(),
                anchor_text: "x".to_string(),
                score: -3,
                discovery_index: 0,
            },
            LinkCandidate {
                absolute_url: "https://a.example/2".to_string(),
                anchor_text: "y".to_string(),
                score: -5,
                discovery_index: 1,
            },
        ];

        assert_eq!(scorer.select(&ranked, 1), ranked[..1].to_vec());
    }

    #[test]
    fn zero_max_or_bad_start_url_yields_nothing() {
        let html = r#"<a href="/news/a">A long and useful anchor text</a>"#;
        assert!(rank(html, 0).is_empty());

        let tree = ParsedTree::parse_fragment(html);
        assert!(LinkScorer::default()
            .rank(&tree.root(), "not a url", 5)
            .is_empty());
        assert!(LinkScorer::default()
            .rank(&tree.root(), "file:///tmp/x.html", 5)
            .is_empty());
    }

    #[test]
    fn invalid_pattern_is_reported() {
        let err = LinkScorer::new(
            LinkVocabulary {
                article_id_pattern: "(".to_string(),
                ..LinkVocabulary::default()
            },
            LinkWeights::default(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidPattern {
                name: "article_id",
                ..
            }
        ));
    }

    #[test]
    fn candidates_resolve_relative_paths() {
        let tree = ParsedTree::parse_fragment(r#"<a href="../world/x">World story</a>"#);
        let links = LinkScorer::default().candidates(&tree.root(), &start());
        assert_eq!(urls(&links), vec!["https://www.example.com/world/x"]);
    }
}
